//! # shape-score
//!
//! Scores freehand strokes against ideal shapes: circle, rectangle and
//! triangle. A stroke is resampled to evenly spaced points, an ideal shape
//! is fitted to it, and the fit is turned into a score from 0 to 10.
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are declared, not discovered:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Callers mostly need the re-exports below and never touch the modules.

pub mod fit;
pub mod geometry;
pub mod pipeline;
pub mod resample;
pub mod score;
pub mod shape;
pub mod sketch;
pub mod solve;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use fit::{fit_circle, fit_rectangle, fit_triangle, CircleFit, FitGeometry, RectangleFit, TriangleFit};
pub use geometry::{Bounds, Point};
pub use pipeline::{score_stroke, Assessment, ScoreError, ScoringConfig, DEFAULT_MIN_POINTS};
pub use resample::{resample, DEFAULT_RESAMPLE_COUNT};
pub use score::{format_score, ScoreBand, ScoreResult, Tolerances};
pub use shape::{ShapeKind, UnknownShape};
pub use sketch::{sketch_stroke, SketchConfig};
pub use solve::solve3;
pub use svg::{extract_strokes_from_svg, SvgError};
