//! The scoring pipeline: resample, fit, score.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Only one thing here is a genuine error: a stroke too short to judge.
//! Everything past that point is total. A terrible drawing is not an
//! error, it's a score of 0, so scorers return `ScoreResult` directly and
//! only [`score_stroke`] returns a `Result`.

use tracing::debug;

use crate::fit::FitGeometry;
use crate::geometry::Point;
use crate::resample::{resample, DEFAULT_RESAMPLE_COUNT};
use crate::score::{ScoreBand, ScoreResult, Tolerances};
use crate::shape::ShapeKind;

/// Fewest raw points a stroke needs before it is scored.
pub const DEFAULT_MIN_POINTS: usize = 10;

/// Errors from [`score_stroke`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("stroke has {got} points, need at least {required} to score")]
    InsufficientInput { got: usize, required: usize },
    #[error("invalid scoring config: {0}")]
    InvalidConfig(String),
}

/// Knobs for the scoring pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    /// Strokes with fewer raw points are rejected.
    pub min_points: usize,
    /// Number of points each stroke is resampled to.
    pub resample_count: usize,
    pub tolerances: Tolerances,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_points: DEFAULT_MIN_POINTS,
            resample_count: DEFAULT_RESAMPLE_COUNT,
            tolerances: Tolerances::default(),
        }
    }
}

impl ScoringConfig {
    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    pub fn with_resample_count(mut self, resample_count: usize) -> Self {
        self.resample_count = resample_count;
        self
    }

    pub fn with_circle_tolerance(mut self, relative_error: f64) -> Self {
        self.tolerances.circle_relative_error = relative_error;
        self
    }

    pub fn with_rectangle_edge_divisor(mut self, divisor: f64) -> Self {
        self.tolerances.rectangle_edge_divisor = divisor;
        self
    }

    /// Reject settings the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ScoreError> {
        if self.min_points == 0 {
            return Err(ScoreError::InvalidConfig("min_points must be at least 1".into()));
        }
        if self.resample_count < 2 {
            return Err(ScoreError::InvalidConfig(format!(
                "resample_count must be at least 2, got {}",
                self.resample_count
            )));
        }
        let t = &self.tolerances;
        if !(t.circle_relative_error.is_finite() && t.circle_relative_error > 0.0) {
            return Err(ScoreError::InvalidConfig(format!(
                "circle tolerance must be a positive number, got {}",
                t.circle_relative_error
            )));
        }
        if !(t.rectangle_edge_divisor.is_finite() && t.rectangle_edge_divisor > 0.0) {
            return Err(ScoreError::InvalidConfig(format!(
                "rectangle edge divisor must be a positive number, got {}",
                t.rectangle_edge_divisor
            )));
        }
        Ok(())
    }
}

/// Everything a caller needs to show the result of one scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub shape: ShapeKind,
    /// Score in `[0, 10]`.
    pub score: f64,
    pub band: ScoreBand,
    /// Ideal shape to draw over the stroke; `None` when fitting failed.
    pub fit: Option<FitGeometry>,
    /// Score plus named diagnostics.
    pub result: ScoreResult,
    /// Raw points the stroke arrived with.
    pub raw_len: usize,
}

/// Score one finished stroke against `shape`.
///
/// The stroke is borrowed for the duration of the call and never retained.
/// Fails only when the stroke has fewer than `config.min_points` points or
/// `config` itself is unusable; any stroke past that gate gets a score,
/// possibly 0.
pub fn score_stroke(
    shape: ShapeKind,
    raw: &[Point],
    config: &ScoringConfig,
) -> Result<Assessment, ScoreError> {
    config.validate()?;
    if raw.len() < config.min_points {
        return Err(ScoreError::InsufficientInput {
            got: raw.len(),
            required: config.min_points,
        });
    }

    let points = resample(raw, config.resample_count);
    debug!(shape = %shape, raw = raw.len(), resampled = points.len(), "resampled stroke");

    let scorer = shape.scorer();
    let fit = (scorer.fit)(&points);
    debug!(shape = %shape, ?fit, "fitted ideal shape");

    let result = (scorer.score)(&points, fit.as_ref(), &config.tolerances);
    debug!(shape = %shape, score = result.score, message = ?result.message, "scored stroke");

    Ok(Assessment {
        shape,
        score: result.score,
        band: result.band(),
        fit,
        result,
        raw_len: raw.len(),
    })
}
