//! Ideal-shape fitting.
//!
//! Each fitter derives the idealized shape a stroke is judged against. The
//! circle is a genuine least-squares fit; the rectangle and triangle are
//! read straight off the stroke's bounding box.
//!
//! Fits hold only derived geometry and never keep a reference to the
//! points they were computed from.

use std::f64::consts::{PI, TAU};

use crate::geometry::{Bounds, Point};
use crate::solve::solve3;

/// Circle `(x - h)² + (y - k)² = r²`.
///
/// `r == 0.0` marks a degenerate fit: the solver succeeded but the
/// implied radius² was not positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleFit {
    pub h: f64,
    pub k: f64,
    pub r: f64,
}

/// Axis-aligned rectangle, the bounding box of the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleFit {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Triangle given by its three vertices.
///
/// Fitted triangles are equilateral with the apex `p1` on top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleFit {
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

/// Fit geometry for any shape kind, as handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitGeometry {
    Circle(CircleFit),
    Rectangle(RectangleFit),
    Triangle(TriangleFit),
}

impl CircleFit {
    pub fn center(&self) -> Point {
        Point::new(self.h, self.k)
    }

    pub fn is_degenerate(&self) -> bool {
        self.r <= 0.0
    }
}

impl RectangleFit {
    pub fn from_bounds(b: &Bounds) -> Self {
        Self {
            min_x: b.min_x,
            min_y: b.min_y,
            width: b.width(),
            height: b.height(),
        }
    }

    /// Corners in drawing order, starting top-left.
    pub fn corners(&self) -> [Point; 4] {
        let (x0, y0) = (self.min_x, self.min_y);
        let (x1, y1) = (self.min_x + self.width, self.min_y + self.height);
        [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }
}

impl TriangleFit {
    /// Equilateral, apex-up triangle inscribed around the box center.
    ///
    /// Side length is the longer box side; the centroid sits on the box
    /// center, so the apex is `2/3` of the triangle height above it and the
    /// base `1/3` below.
    pub fn equilateral_in(b: &Bounds) -> Self {
        let side = b.longest_side();
        let c = b.center();
        let height = side * 3f64.sqrt() / 2.0;
        Self {
            p1: Point::new(c.x, c.y - 2.0 / 3.0 * height),
            p2: Point::new(c.x - side / 2.0, c.y + height / 3.0),
            p3: Point::new(c.x + side / 2.0, c.y + height / 3.0),
        }
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.p1, self.p2, self.p3]
    }
}

impl FitGeometry {
    /// Closed outline for drawing: the last point repeats the first.
    ///
    /// Circles are approximated with `circle_segments` chords (at least 3).
    pub fn outline(&self, circle_segments: usize) -> Vec<Point> {
        match self {
            FitGeometry::Circle(c) => {
                let n = circle_segments.max(3);
                (0..=n)
                    .map(|i| {
                        let a = TAU * (i % n) as f64 / n as f64;
                        Point::new(c.h + c.r * a.cos(), c.k + c.r * a.sin())
                    })
                    .collect()
            }
            FitGeometry::Rectangle(r) => {
                let [a, b, c, d] = r.corners();
                vec![a, b, c, d, a]
            }
            FitGeometry::Triangle(t) => vec![t.p1, t.p2, t.p3, t.p1],
        }
    }

    /// Bounding box of the fitted shape itself.
    pub fn bounds(&self) -> Bounds {
        match self {
            FitGeometry::Circle(c) => Bounds {
                min_x: c.h - c.r,
                min_y: c.k - c.r,
                max_x: c.h + c.r,
                max_y: c.k + c.r,
            },
            FitGeometry::Rectangle(r) => Bounds {
                min_x: r.min_x,
                min_y: r.min_y,
                max_x: r.min_x + r.width,
                max_y: r.min_y + r.height,
            },
            FitGeometry::Triangle(t) => {
                // Three vertices always give a box
                Bounds::of(&t.vertices()).unwrap_or(Bounds {
                    min_x: t.p1.x,
                    min_y: t.p1.y,
                    max_x: t.p1.x,
                    max_y: t.p1.y,
                })
            }
        }
    }

    /// Area enclosed by the ideal shape.
    pub fn area(&self) -> f64 {
        match self {
            FitGeometry::Circle(c) => PI * c.r * c.r,
            FitGeometry::Rectangle(r) => r.width * r.height,
            FitGeometry::Triangle(t) => {
                ((t.p2.x - t.p1.x) * (t.p3.y - t.p1.y) - (t.p3.x - t.p1.x) * (t.p2.y - t.p1.y))
                    .abs()
                    / 2.0
            }
        }
    }
}

/// Algebraic least-squares circle fit.
///
/// Minimizes the residual of `x² + y² + Dx + Ey + F = 0` over all points by
/// solving the 3×3 normal equations for `(D, E, F)`. Returns `None` when
/// fewer than three points are given or the normal matrix is singular
/// (e.g. all points collinear). A non-positive radius² yields a
/// degenerate fit with `r = 0` rather than `None`.
pub fn fit_circle(points: &[Point]) -> Option<CircleFit> {
    if points.len() < 3 {
        return None;
    }

    let n = points.len() as f64;
    let (mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut sxb, mut syb, mut sb) = (0.0, 0.0, 0.0);

    for p in points {
        let b = -(p.x * p.x + p.y * p.y);
        sx += p.x;
        sy += p.y;
        sxx += p.x * p.x;
        syy += p.y * p.y;
        sxy += p.x * p.y;
        sxb += p.x * b;
        syb += p.y * b;
        sb += b;
    }

    let m = [
        [sxx, sxy, sx],
        [sxy, syy, sy],
        [sx, sy, n],
    ];
    let [d, e, f] = solve3(m, [sxb, syb, sb])?;

    let h = -d / 2.0;
    let k = -e / 2.0;
    let r2 = h * h + k * k - f;
    let r = if r2 > 0.0 { r2.sqrt() } else { 0.0 };

    Some(CircleFit { h, k, r })
}

/// The ideal rectangle: the stroke's axis-aligned bounding box.
pub fn fit_rectangle(points: &[Point]) -> Option<RectangleFit> {
    Bounds::of(points).map(|b| RectangleFit::from_bounds(&b))
}

/// The ideal triangle: equilateral, apex up, sized by the bounding box.
pub fn fit_triangle(points: &[Point]) -> Option<TriangleFit> {
    Bounds::of(points).map(|b| TriangleFit::equilateral_in(&b))
}
