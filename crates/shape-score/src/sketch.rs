//! Hand-drawn stroke generator.
//!
//! Produces strokes that look like someone traced an ideal shape with a
//! mouse: the outline is walked part or all of the way round, bowed by a
//! slow wobble and roughened by per-point jitter. Useful for demos and for
//! exercising the scorers with realistic input.
//!
//! # Example
//! ```ignore
//! use shape_score::{sketch_stroke, ShapeKind, SketchConfig};
//!
//! let geometry = ShapeKind::Circle.preview();
//! let stroke = sketch_stroke(&geometry, &SketchConfig::default().with_seed(7));
//! ```

use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::fit::FitGeometry;
use crate::geometry::{path_length, Point};
use crate::resample::resample;

/// Chords used to trace circle outlines before resampling.
const CIRCLE_SEGMENTS: usize = 128;

/// Configuration for generated strokes.
#[derive(Clone, Debug, PartialEq)]
pub struct SketchConfig {
    /// Number of points in the generated stroke
    pub points: usize,
    /// Fraction of the outline traced, 0.0..=1.0
    pub sweep: f64,
    /// Per-point jitter amplitude (in pixels)
    pub roughness: f64,
    /// Amplitude of the slow wobble across the whole stroke (in pixels)
    pub bowing: f64,
    /// Seed for reproducible strokes (None = random each time)
    pub seed: Option<u64>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            points: 120,
            sweep: 1.0,
            roughness: 1.0,
            bowing: 3.0,
            seed: None,
        }
    }
}

impl SketchConfig {
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    pub fn with_sweep(mut self, sweep: f64) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_roughness(mut self, roughness: f64) -> Self {
        self.roughness = roughness;
        self
    }

    pub fn with_bowing(mut self, bowing: f64) -> Self {
        self.bowing = bowing;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Generate a hand-drawn looking stroke that traces `geometry`.
///
/// The outline is cut to `config.sweep` of its length, resampled to
/// `config.points` points, then each point is pushed along the local normal
/// by a two-harmonic wobble (`bowing`) plus uniform jitter (`roughness`).
/// The same seed always yields the same stroke.
pub fn sketch_stroke(geometry: &FitGeometry, config: &SketchConfig) -> Vec<Point> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let outline = geometry.outline(CIRCLE_SEGMENTS);
    let traced = truncate_path(&outline, config.sweep.clamp(0.0, 1.0));
    let base = resample(&traced, config.points);
    if base.len() < 2 {
        return base;
    }

    // Two slow harmonics with random phase give a believable drift
    let freq1 = rng.random_range(1.0..3.0);
    let freq2 = rng.random_range(3.0..6.0);
    let phase1 = rng.random_range(0.0..TAU);
    let phase2 = rng.random_range(0.0..TAU);

    let last = base.len() - 1;
    base.iter()
        .enumerate()
        .map(|(i, p)| {
            let t = i as f64 / last as f64;
            let wobble = config.bowing
                * (0.7 * (phase1 + TAU * freq1 * t).sin() + 0.3 * (phase2 + TAU * freq2 * t).sin());
            let jitter = config.roughness * rng.random_range(-1.0..=1.0);

            let (nx, ny) = normal_at(&base, i);
            Point::new(p.x + nx * (wobble + jitter), p.y + ny * (wobble + jitter))
        })
        .collect()
}

/// Unit normal of the path at `i`, from its neighbours.
fn normal_at(points: &[Point], i: usize) -> (f64, f64) {
    let prev = points[i.saturating_sub(1)];
    let next = points[(i + 1).min(points.len() - 1)];
    let (tx, ty) = (next.x - prev.x, next.y - prev.y);
    let len = tx.hypot(ty);
    if len == 0.0 {
        (0.0, 0.0)
    } else {
        (-ty / len, tx / len)
    }
}

/// The leading `fraction` of `path` by arc length.
fn truncate_path(path: &[Point], fraction: f64) -> Vec<Point> {
    let Some(&first) = path.first() else {
        return Vec::new();
    };
    if fraction >= 1.0 {
        return path.to_vec();
    }

    let target = path_length(path) * fraction;
    let mut out = vec![first];
    let mut walked = 0.0;

    for w in path.windows(2) {
        let seg = w[0].distance(w[1]);
        if walked + seg >= target {
            let f = if seg > 0.0 { (target - walked) / seg } else { 0.0 };
            out.push(w[0].lerp(w[1], f));
            break;
        }
        walked += seg;
        out.push(w[1]);
    }

    out
}
