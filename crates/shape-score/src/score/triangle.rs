//! Triangle scoring: perimeter against the ideal equilateral triangle.

use tracing::warn;

use super::{ScoreResult, MAX_SCORE, MSG_DEGENERATE_BOX, MSG_NO_POINTS};
use crate::geometry::{closed_path_length, Bounds, Point};

/// Score `points` by comparing the closed stroke's perimeter to that of an
/// equilateral triangle whose side is the longer bounding-box side.
///
/// The score falls off linearly with the relative perimeter difference:
/// equal perimeters score 10, a difference of 100% or more scores 0.
pub fn score_triangle(points: &[Point]) -> ScoreResult {
    let Some(b) = Bounds::of(points) else {
        return ScoreResult::failed(MSG_NO_POINTS);
    };

    let ideal_perimeter = 3.0 * b.longest_side();
    let perimeter = closed_path_length(points);
    let metrics = [("perimeter", perimeter), ("ideal_perimeter", ideal_perimeter)];

    if ideal_perimeter <= 0.0 {
        warn!("triangle stroke collapsed to a single point");
        return ScoreResult::new(0.0, metrics).with_message(MSG_DEGENERATE_BOX);
    }

    let score = (1.0 - (perimeter - ideal_perimeter).abs() / ideal_perimeter).max(0.0) * MAX_SCORE;
    ScoreResult::new(score, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equilateral(side: f64) -> Vec<Point> {
        let h = side * 3f64.sqrt() / 2.0;
        vec![
            Point::new(side / 2.0, 0.0),
            Point::new(side, h),
            Point::new(0.0, h),
            Point::new(side / 2.0, 0.0),
        ]
    }

    /// Walk each edge in `per_edge` steps so every corner is a sample.
    fn densify(corners: &[Point], per_edge: usize) -> Vec<Point> {
        let mut out = Vec::new();
        for w in corners.windows(2) {
            for i in 0..per_edge {
                out.push(w[0].lerp(w[1], i as f64 / per_edge as f64));
            }
        }
        out.extend(corners.last().copied());
        out
    }

    #[test]
    fn equilateral_triangle_scores_ten() {
        let side = 150.0;
        let pts = densify(&equilateral(side), 66);
        let result = score_triangle(&pts);

        let perimeter = result.metric("perimeter").unwrap();
        let ideal = result.metric("ideal_perimeter").unwrap();
        assert!((perimeter - 3.0 * side).abs() < 1e-6, "perimeter = {}", perimeter);
        assert!((ideal - 3.0 * side).abs() < 1e-9);
        assert!((result.score - 10.0).abs() < 1e-6, "score = {}", result.score);
    }

    #[test]
    fn open_stroke_is_closed_for_perimeter() {
        // Missing the last edge: the closing segment adds it back
        let mut pts = equilateral(90.0);
        pts.pop();
        let result = score_triangle(&pts);
        assert!((result.metric("perimeter").unwrap() - 270.0).abs() < 1e-9);
    }

    #[test]
    fn straight_line_scores_lower() {
        let pts: Vec<Point> = (0..=100).map(|i| Point::new(i as f64, 0.0)).collect();
        let result = score_triangle(&pts);
        // perimeter 200 (there and back) vs ideal 300
        assert!((result.score - 10.0 * (1.0 - 100.0 / 300.0)).abs() < 1e-9);
    }

    #[test]
    fn long_scribble_scores_zero() {
        // Back and forth across a 10x10 box many times
        let pts: Vec<Point> = (0..200)
            .map(|i| Point::new(if i % 2 == 0 { 0.0 } else { 10.0 }, (i % 11) as f64))
            .collect();
        assert_eq!(score_triangle(&pts).score, 0.0);
    }

    #[test]
    fn single_point_is_degenerate() {
        let result = score_triangle(&[Point::new(3.0, 3.0); 12]);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.message, Some(MSG_DEGENERATE_BOX));
    }

    #[test]
    fn empty_stroke_has_no_points() {
        let result = score_triangle(&[]);
        assert_eq!(result.message, Some(MSG_NO_POINTS));
    }
}
