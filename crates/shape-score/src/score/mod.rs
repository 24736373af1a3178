//! Per-shape scorers.
//!
//! Each scorer turns a resampled stroke into a score on a 0–10 scale plus a
//! handful of named diagnostics. Scorers are total: a stroke that cannot be
//! judged (no points, degenerate fit) scores 0 with a message instead of
//! returning an error.

mod circle;
mod rectangle;
mod triangle;

use std::collections::BTreeMap;

pub use circle::{angular_coverage, score_circle};
pub use rectangle::score_rectangle;
pub use triangle::score_triangle;

/// Highest possible score.
pub const MAX_SCORE: f64 = 10.0;

/// Message for a missing or zero-radius circle fit.
pub const MSG_BAD_FIT: &str = "bad-fit";
/// Message for an empty stroke.
pub const MSG_NO_POINTS: &str = "no-points";
/// Message for a stroke whose bounding box has no usable size.
pub const MSG_DEGENERATE_BOX: &str = "degenerate-box";

/// Tunable tolerances used by the scorers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Relative radial error at which a circle's quality factor reaches 0.
    pub circle_relative_error: f64,
    /// The rectangle's allowed average edge distance is the shorter box
    /// side divided by this.
    pub rectangle_edge_divisor: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            circle_relative_error: 0.25,
            rectangle_edge_divisor: 3.0,
        }
    }
}

/// A score with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    /// Score in `[0, 10]`.
    pub score: f64,
    /// Named diagnostic values, e.g. `"coverage"` or `"avg_dist"`.
    pub metrics: BTreeMap<&'static str, f64>,
    /// Why the stroke could not be scored normally, if it couldn't.
    pub message: Option<&'static str>,
}

impl ScoreResult {
    /// Build a result, clamping `score` into `[0, 10]` (NaN becomes 0).
    pub fn new(score: f64, metrics: impl IntoIterator<Item = (&'static str, f64)>) -> Self {
        Self {
            score: clamp_score(score),
            metrics: metrics.into_iter().collect(),
            message: None,
        }
    }

    /// A zero score explained by `message`.
    pub fn failed(message: &'static str) -> Self {
        Self {
            score: 0.0,
            metrics: BTreeMap::new(),
            message: Some(message),
        }
    }

    /// Attach a message, keeping any metrics already collected.
    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Clamp a raw score into `[0, MAX_SCORE]`.
pub fn clamp_score(score: f64) -> f64 {
    // f64::max ignores NaN, so NaN collapses to 0 here
    score.max(0.0).min(MAX_SCORE)
}

/// Coarse rating of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 8 and above
    High,
    /// 5 up to 8
    Medium,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreBand::High
        } else if score >= 5.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Format a score the way it is shown to the player: `"7.4 / 10"`.
pub fn format_score(score: f64) -> String {
    format!("{:.1} / 10", score)
}
