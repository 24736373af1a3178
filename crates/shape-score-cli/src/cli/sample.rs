//! Sample command: generate a believable hand-drawn stroke.

use std::path::PathBuf;

use clap::Args;

use shape_score::{
    sketch_stroke, Bounds, CircleFit, FitGeometry, Point, RectangleFit, ShapeKind, SketchConfig, TriangleFit,
};

use super::common::{write_output, StrokeFile};
use super::CliError;

#[derive(Args, Debug)]
pub struct SampleArgs {
    pub shape: ShapeKind,

    /// Seed for a reproducible stroke
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-point jitter in pixels
    #[arg(long, default_value_t = 1.0)]
    pub roughness: f64,

    /// Slow wobble amplitude in pixels
    #[arg(long, default_value_t = 3.0)]
    pub bowing: f64,

    /// Fraction of the outline traced (0.0 to 1.0)
    #[arg(long, default_value_t = 1.0)]
    pub sweep: f64,

    #[arg(long, default_value_t = 120)]
    pub points: usize,

    /// Center of the shape as `x,y`
    #[arg(long, value_parser = parse_point, default_value = "240,240")]
    pub center: Point,

    /// Width and height of the shape
    #[arg(long, default_value_t = 200.0)]
    pub size: f64,

    /// Write the stroke here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse `x,y` into a point.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{}`", s))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x `{}`: {}", x, e))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y `{}`: {}", y, e))?;
    Ok(Point::new(x, y))
}

/// Ideal shape of the given size around `center`.
pub fn template(shape: ShapeKind, center: Point, size: f64) -> FitGeometry {
    let half = size / 2.0;
    let bounds = Bounds {
        min_x: center.x - half,
        min_y: center.y - half,
        max_x: center.x + half,
        max_y: center.y + half,
    };
    match shape {
        ShapeKind::Circle => FitGeometry::Circle(CircleFit { h: center.x, k: center.y, r: half }),
        ShapeKind::Rectangle => FitGeometry::Rectangle(RectangleFit::from_bounds(&bounds)),
        ShapeKind::Triangle => FitGeometry::Triangle(TriangleFit::equilateral_in(&bounds)),
    }
}

/// Execute the sample command.
pub fn cmd_sample(args: &SampleArgs) -> Result<(), CliError> {
    let mut config = SketchConfig::default()
        .with_points(args.points)
        .with_sweep(args.sweep)
        .with_roughness(args.roughness)
        .with_bowing(args.bowing);
    config.seed = args.seed;

    let stroke = sketch_stroke(&template(args.shape, args.center, args.size), &config);
    let json = serde_json::to_string_pretty(&StrokeFile::wrap(&stroke))?;
    write_output(args.output.as_deref(), &json)
}
