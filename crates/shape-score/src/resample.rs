//! Arc-length resampling.
//!
//! Raw strokes arrive at whatever rate the input device reports: dense where
//! the hand moved slowly, sparse where it moved fast. Every scorer works on
//! a resampled copy where consecutive points are the same path length apart.

use crate::geometry::Point;

/// Number of points a stroke is resampled to before fitting.
pub const DEFAULT_RESAMPLE_COUNT: usize = 200;

/// Redistribute `points` into exactly `n` points spaced evenly by arc length.
///
/// Output points are linear interpolations along the input polyline, in
/// input order. An empty input yields an empty output; a zero-length path
/// yields `n` copies of its first point.
///
/// # Algorithm
///
/// 1. Build the cumulative arc-length table `d` (`d[0] = 0`)
/// 2. Walk targets `i * total / (n - 1)` for `i` in `0..n`
/// 3. Advance the segment cursor monotonically until it brackets the target
/// 4. Interpolate inside that segment
pub fn resample(points: &[Point], n: usize) -> Vec<Point> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    if n <= 1 {
        return vec![first; n];
    }

    let mut d = Vec::with_capacity(points.len());
    d.push(0.0);
    for w in points.windows(2) {
        let prev = d[d.len() - 1];
        d.push(prev + w[0].distance(w[1]));
    }

    let total = d[d.len() - 1];
    if total == 0.0 {
        return vec![first; n];
    }

    let step = total / (n - 1) as f64;
    let mut out = Vec::with_capacity(n);
    let mut j = 0;

    for i in 0..n {
        // Clamp so rounding on the last step can't run past the final segment
        let target = (i as f64 * step).min(total);
        while j + 2 < d.len() && d[j + 1] < target {
            j += 1;
        }

        let (t0, t1) = (d[j], d[j + 1]);
        let span = t1 - t0;
        let f = (target - t0) / if span == 0.0 { 1.0 } else { span };
        out.push(points[j].lerp(points[j + 1], f));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{distance_to_polyline, path_length};

    fn zigzag() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.5, 0.0),
            Point::new(40.0, 30.0),
            Point::new(40.0, 30.0),
            Point::new(80.0, 0.0),
            Point::new(80.5, 2.0),
        ]
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(resample(&[], 200).is_empty());
    }

    #[test]
    fn always_yields_requested_count() {
        let pts = zigzag();
        for n in [2, 3, 10, 57, 200, 1000] {
            assert_eq!(resample(&pts, n).len(), n, "n = {}", n);
        }
        assert_eq!(resample(&pts[..1], 200).len(), 200);
    }

    #[test]
    fn repeated_point_yields_copies() {
        let p = Point::new(12.5, -3.0);
        let out = resample(&[p; 25], 200);
        assert_eq!(out.len(), 200);
        assert!(out.iter().all(|q| *q == p));
    }

    #[test]
    fn single_output_point_is_first_input() {
        let pts = zigzag();
        assert_eq!(resample(&pts, 1), vec![pts[0]]);
        assert!(resample(&pts, 0).is_empty());
    }

    #[test]
    fn outputs_lie_on_the_input_polyline() {
        let pts = zigzag();
        for p in resample(&pts, 200) {
            let d = distance_to_polyline(p, &pts);
            assert!(d < 1e-9, "point {:?} is {} off the path", p, d);
        }
    }

    #[test]
    fn endpoints_are_preserved() {
        let pts = zigzag();
        let out = resample(&pts, 200);
        assert_eq!(out[0], pts[0]);
        let last = out[out.len() - 1];
        assert!(last.distance(pts[pts.len() - 1]) < 1e-9);
    }

    #[test]
    fn spacing_is_uniform_along_a_straight_line() {
        // Irregularly sampled straight line: spacing is exact on a line
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(0.5, 0.0),
            Point::new(7.0, 0.0),
            Point::new(7.1, 0.0),
            Point::new(99.0, 0.0),
        ];
        let out = resample(&pts, 100);
        let step = path_length(&pts) / 99.0;
        for w in out.windows(2) {
            assert!((w[0].distance(w[1]) - step).abs() < 1e-9);
        }
    }

    #[test]
    fn preserves_traversal_order() {
        let pts = vec![Point::new(10.0, 0.0), Point::new(0.0, 0.0)];
        let out = resample(&pts, 11);
        for (i, p) in out.iter().enumerate() {
            assert!((p.x - (10.0 - i as f64)).abs() < 1e-9);
        }
    }
}
