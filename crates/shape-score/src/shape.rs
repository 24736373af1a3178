//! Shape kinds and their fitter/scorer pairs.

use std::fmt;
use std::str::FromStr;

use crate::fit::{fit_circle, fit_rectangle, fit_triangle, CircleFit, FitGeometry, RectangleFit, TriangleFit};
use crate::geometry::Point;
use crate::score::{score_circle, score_rectangle, score_triangle, ScoreResult, Tolerances};

/// The shapes a stroke can be judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Rectangle,
    Triangle,
}

/// Fits an ideal shape to resampled points.
pub type FitFn = fn(&[Point]) -> Option<FitGeometry>;

/// Scores resampled points, optionally against a fit from the paired [`FitFn`].
pub type ScoreFn = fn(&[Point], Option<&FitGeometry>, &Tolerances) -> ScoreResult;

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub struct ShapeScorer {
    pub kind: ShapeKind,
    pub fit: FitFn,
    pub score: ScoreFn,
}

/// Dispatch table, indexed by `ShapeKind as usize`.
static SCORERS: [ShapeScorer; 3] = [
    ShapeScorer { kind: ShapeKind::Circle, fit: circle_fit, score: circle_score },
    ShapeScorer { kind: ShapeKind::Rectangle, fit: rectangle_fit, score: rectangle_score },
    ShapeScorer { kind: ShapeKind::Triangle, fit: triangle_fit, score: triangle_score },
];

fn circle_fit(points: &[Point]) -> Option<FitGeometry> {
    fit_circle(points).map(FitGeometry::Circle)
}

fn rectangle_fit(points: &[Point]) -> Option<FitGeometry> {
    fit_rectangle(points).map(FitGeometry::Rectangle)
}

fn triangle_fit(points: &[Point]) -> Option<FitGeometry> {
    fit_triangle(points).map(FitGeometry::Triangle)
}

fn circle_score(points: &[Point], fit: Option<&FitGeometry>, tolerances: &Tolerances) -> ScoreResult {
    let circle = match fit {
        Some(FitGeometry::Circle(c)) => Some(c),
        _ => None,
    };
    score_circle(points, circle, tolerances)
}

// Rectangle and triangle scorers recompute the bounding box themselves.

fn rectangle_score(points: &[Point], _fit: Option<&FitGeometry>, tolerances: &Tolerances) -> ScoreResult {
    score_rectangle(points, tolerances)
}

fn triangle_score(points: &[Point], _fit: Option<&FitGeometry>, _tolerances: &Tolerances) -> ScoreResult {
    score_triangle(points)
}

impl ShapeKind {
    /// Get all shape kinds.
    pub fn all() -> &'static [ShapeKind] {
        &[ShapeKind::Circle, ShapeKind::Rectangle, ShapeKind::Triangle]
    }

    /// Get shape name as string.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Triangle => "triangle",
        }
    }

    /// Alternative names accepted by [`ShapeKind::from_name`].
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            ShapeKind::Circle => &["round"],
            ShapeKind::Rectangle => &["rect", "square", "box"],
            ShapeKind::Triangle => &["tri"],
        }
    }

    /// Parse shape from string (case-insensitive).
    pub fn from_name(name: &str) -> Option<ShapeKind> {
        match name.trim().to_lowercase().as_str() {
            "circle" | "round" => Some(ShapeKind::Circle),
            "rectangle" | "rect" | "square" | "box" => Some(ShapeKind::Rectangle),
            "triangle" | "tri" => Some(ShapeKind::Triangle),
            _ => None,
        }
    }

    /// The fitter/scorer pair for this shape.
    pub fn scorer(self) -> &'static ShapeScorer {
        &SCORERS[self as usize]
    }

    /// Template drawn in the 120×120 preview box.
    pub fn preview(&self) -> FitGeometry {
        match self {
            ShapeKind::Circle => FitGeometry::Circle(CircleFit { h: 60.0, k: 60.0, r: 40.0 }),
            ShapeKind::Rectangle => FitGeometry::Rectangle(RectangleFit {
                min_x: 20.0,
                min_y: 20.0,
                width: 80.0,
                height: 80.0,
            }),
            ShapeKind::Triangle => FitGeometry::Triangle(TriangleFit {
                p1: Point::new(60.0, 20.0),
                p2: Point::new(100.0, 100.0),
                p3: Point::new(20.0, 100.0),
            }),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a shape name that matches no [`ShapeKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown shape `{0}` (expected circle, rectangle or triangle)")]
pub struct UnknownShape(pub String);

impl FromStr for ShapeKind {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeKind::from_name(s).ok_or_else(|| UnknownShape(s.to_string()))
    }
}
