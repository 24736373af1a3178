//! Dense 3×3 linear solver.

/// Pivots smaller than this are treated as zero.
pub const PIVOT_EPSILON: f64 = 1e-12;

/// Solve `a · x = b` by Gauss-Jordan elimination with partial pivoting.
///
/// For each column the row with the largest-magnitude entry among the rows
/// not yet used is swapped into place before eliminating. Returns `None`
/// when that pivot is below [`PIVOT_EPSILON`], i.e. the system is singular
/// or too close to it to trust.
pub fn solve3(a: [[f64; 3]; 3], b: [f64; 3]) -> Option<[f64; 3]> {
    // Augmented matrix [A | b]
    let mut m = [
        [a[0][0], a[0][1], a[0][2], b[0]],
        [a[1][0], a[1][1], a[1][2], b[1]],
        [a[2][0], a[2][1], a[2][2], b[2]],
    ];

    for col in 0..3 {
        let best = pivot_row(&m, col);
        if m[best][col].abs() < PIVOT_EPSILON {
            return None;
        }
        m.swap(col, best);

        let pivot = m[col][col];
        for c in col..4 {
            m[col][c] /= pivot;
        }

        for r in 0..3 {
            if r == col {
                continue;
            }
            let factor = m[r][col];
            for c in col..4 {
                m[r][c] -= factor * m[col][c];
            }
        }
    }

    Some([m[0][3], m[1][3], m[2][3]])
}

/// Row at or below `col` with the largest entry in `col`; ties keep the
/// earliest row.
fn pivot_row(m: &[[f64; 4]; 3], col: usize) -> usize {
    (col + 1..3).fold(col, |best, r| {
        if m[r][col].abs() > m[best][col].abs() { r } else { best }
    })
}
