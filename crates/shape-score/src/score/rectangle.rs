//! Rectangle scoring: how closely the stroke hugs its own bounding box.

use tracing::warn;

use super::{ScoreResult, Tolerances, MAX_SCORE, MSG_DEGENERATE_BOX, MSG_NO_POINTS};
use crate::geometry::{Bounds, Point};

/// Score `points` against their axis-aligned bounding box.
///
/// Every point is measured to the nearest of the four box edges. The
/// average of those distances is compared to an allowance of
/// `min(width, height) / tolerances.rectangle_edge_divisor`; an average of 0
/// scores 10 and anything at or beyond the allowance scores 0.
pub fn score_rectangle(points: &[Point], tolerances: &Tolerances) -> ScoreResult {
    let Some(b) = Bounds::of(points) else {
        return ScoreResult::failed(MSG_NO_POINTS);
    };

    let total: f64 = points.iter().map(|p| edge_distance(*p, &b)).sum();
    let avg_dist = total / points.len() as f64;

    let drawn_width = b.width();
    let drawn_height = b.height();
    let max_dist = drawn_width.min(drawn_height) / tolerances.rectangle_edge_divisor;

    let metrics = [
        ("avg_dist", avg_dist),
        ("drawn_width", drawn_width),
        ("drawn_height", drawn_height),
    ];

    if max_dist <= 0.0 {
        warn!(drawn_width, drawn_height, "rectangle stroke has no area");
        return ScoreResult::new(0.0, metrics).with_message(MSG_DEGENERATE_BOX);
    }

    let score = (1.0 - avg_dist / max_dist).max(0.0) * MAX_SCORE;
    ScoreResult::new(score, metrics)
}

/// Distance from `p` to the nearest edge line of `b`.
fn edge_distance(p: Point, b: &Bounds) -> f64 {
    let dist_x = (p.x - b.min_x).abs().min((p.x - b.max_x).abs());
    let dist_y = (p.y - b.min_y).abs().min((p.y - b.max_y).abs());
    dist_x.min(dist_y)
}
