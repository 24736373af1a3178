//! Circle scoring: radial accuracy times angular coverage.

use std::f64::consts::TAU;

use tracing::warn;

use super::{ScoreResult, Tolerances, MSG_BAD_FIT, MSG_NO_POINTS};
use crate::fit::CircleFit;
use crate::geometry::Point;

/// Score `points` against a fitted circle.
///
/// - radial error per point is `|dist(p, center) - r|`; its mean is the MAE
/// - relative error is `MAE / r`, mapped linearly to a quality factor that
///   hits 0 at `tolerances.circle_relative_error`
/// - coverage is the fraction of the full turn around the center that the
///   stroke actually sweeps, from the largest angular gap between points
///
/// The final score is `coverage * quality` on a 0–10 scale, rounded to one
/// decimal. A missing or zero-radius fit scores 0 with `"bad-fit"`.
pub fn score_circle(points: &[Point], fit: Option<&CircleFit>, tolerances: &Tolerances) -> ScoreResult {
    let Some(fit) = fit.filter(|f| !f.is_degenerate()) else {
        warn!("circle fit missing or degenerate");
        return ScoreResult::failed(MSG_BAD_FIT);
    };
    if points.is_empty() {
        return ScoreResult::failed(MSG_NO_POINTS);
    }

    let center = fit.center();
    let mae = points
        .iter()
        .map(|p| (p.distance(center) - fit.r).abs())
        .sum::<f64>()
        / points.len() as f64;
    let relative_error = mae / fit.r;

    let coverage = angular_coverage(points, center);
    let quality = (1.0 - relative_error / tolerances.circle_relative_error).max(0.0);

    let raw = coverage * quality;
    let score = (raw * 100.0).round() / 10.0;

    ScoreResult::new(
        score,
        [
            ("mae", mae),
            ("relative_error", relative_error),
            ("coverage", coverage),
            ("radius", fit.r),
        ],
    )
}

/// Fraction of a full revolution around `center` swept by `points`.
///
/// Sorts the polar angles and treats the widest gap between neighbours
/// (including the wrap from the last angle back round to the first) as the
/// part of the circle that was never drawn.
pub fn angular_coverage(points: &[Point], center: Point) -> f64 {
    let mut angles: Vec<f64> = points
        .iter()
        .map(|p| (p.y - center.y).atan2(p.x - center.x))
        .collect();
    if angles.is_empty() {
        return 0.0;
    }
    angles.sort_by(f64::total_cmp);

    let inner_gap = angles
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(0.0, f64::max);
    let wrap_gap = angles[0] + TAU - angles[angles.len() - 1];
    let max_gap = inner_gap.max(wrap_gap);

    ((TAU - max_gap) / TAU).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::fit_circle;
    use std::f64::consts::PI;

    fn arc(cx: f64, cy: f64, r: f64, n: usize, sweep: f64) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let a = sweep * i as f64 / n as f64;
                Point::new(cx + r * a.cos(), cy + r * a.sin())
            })
            .collect()
    }

    #[test]
    fn perfect_circle_scores_ten() {
        let pts = arc(0.0, 0.0, 100.0, 200, TAU);
        let fit = fit_circle(&pts).unwrap();
        let result = score_circle(&pts, Some(&fit), &Tolerances::default());

        // 200 samples leave one sample-wide gap, so coverage is 0.995
        assert!(result.score >= 9.9, "score = {}", result.score);
        let coverage = result.metric("coverage").unwrap();
        assert!((coverage - 1.0).abs() < 0.01, "coverage = {}", coverage);
        assert!(result.metric("mae").unwrap() < 1e-6);
        assert!((result.metric("radius").unwrap() - 100.0).abs() < 1e-3);
        assert_eq!(result.message, None);
    }

    #[test]
    fn quarter_arc_has_quarter_coverage() {
        // 200 points spanning exactly 90 degrees, endpoints included
        let pts: Vec<Point> = (0..200)
            .map(|i| {
                let a = (PI / 2.0) * i as f64 / 199.0;
                Point::new(50.0 * a.cos(), 50.0 * a.sin())
            })
            .collect();
        let fit = fit_circle(&pts).unwrap();
        let result = score_circle(&pts, Some(&fit), &Tolerances::default());

        let coverage = result.metric("coverage").unwrap();
        assert!((coverage - 0.25).abs() < 0.01, "coverage = {}", coverage);
        assert!(result.score <= 2.5, "score = {}", result.score);
    }

    #[test]
    fn missing_fit_is_bad_fit() {
        let pts = arc(0.0, 0.0, 10.0, 20, TAU);
        let result = score_circle(&pts, None, &Tolerances::default());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.message, Some(MSG_BAD_FIT));
    }

    #[test]
    fn zero_radius_is_bad_fit() {
        let pts = arc(0.0, 0.0, 10.0, 20, TAU);
        let fit = CircleFit { h: 0.0, k: 0.0, r: 0.0 };
        let result = score_circle(&pts, Some(&fit), &Tolerances::default());
        assert_eq!(result.score, 0.0);
        assert_eq!(result.message, Some(MSG_BAD_FIT));
    }

    #[test]
    fn wobbly_circle_loses_points() {
        // Radius alternates 90/110 around a center at (0,0): MAE = 10, rel = 0.1
        let pts: Vec<Point> = (0..200)
            .map(|i| {
                let a = TAU * i as f64 / 200.0;
                let r = if i % 2 == 0 { 90.0 } else { 110.0 };
                Point::new(r * a.cos(), r * a.sin())
            })
            .collect();
        let fit = CircleFit { h: 0.0, k: 0.0, r: 100.0 };
        let result = score_circle(&pts, Some(&fit), &Tolerances::default());

        assert!((result.metric("relative_error").unwrap() - 0.1).abs() < 1e-9);
        // quality = 1 - 0.1 / 0.25 = 0.6, coverage ~ 0.995
        assert!((result.score - 6.0).abs() < 0.11, "score = {}", result.score);
    }

    #[test]
    fn tolerance_is_configurable() {
        let pts: Vec<Point> = (0..200)
            .map(|i| {
                let a = TAU * i as f64 / 200.0;
                let r = if i % 2 == 0 { 90.0 } else { 110.0 };
                Point::new(r * a.cos(), r * a.sin())
            })
            .collect();
        let fit = CircleFit { h: 0.0, k: 0.0, r: 100.0 };
        let strict = Tolerances { circle_relative_error: 0.1, ..Tolerances::default() };
        assert_eq!(score_circle(&pts, Some(&fit), &strict).score, 0.0);
    }

    #[test]
    fn score_has_one_decimal() {
        let pts = arc(0.0, 0.0, 100.0, 200, TAU * 0.737);
        let fit = fit_circle(&pts).unwrap();
        let score = score_circle(&pts, Some(&fit), &Tolerances::default()).score;
        assert!(((score * 10.0) - (score * 10.0).round()).abs() < 1e-9);
    }

    #[test]
    fn coverage_of_empty_is_zero() {
        assert_eq!(angular_coverage(&[], Point::new(0.0, 0.0)), 0.0);
    }
}
