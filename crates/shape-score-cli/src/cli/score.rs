//! Score command implementation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;

use shape_score::{format_score, score_stroke, Assessment, FitGeometry, ShapeKind};

use super::common::{describe, load_stroke, overlay_svg, render_png, write_output, JsonPoint};
use super::config::load_scoring_config;
use super::CliError;

/// Output format for a scored stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Svg,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Stroke file (JSON points or SVG), `-` for stdin
    pub input: String,

    /// Shape the stroke is judged against
    #[arg(short, long)]
    pub shape: ShapeKind,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also render the overlay to a PNG file
    #[arg(long)]
    pub png: Option<PathBuf>,

    #[arg(long, default_value_t = 2.0)]
    pub png_scale: f32,

    /// YAML scoring config
    #[arg(long, env = "SHAPE_SCORE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Fit geometry in JSON output.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum JsonFit {
    Circle { h: f64, k: f64, r: f64 },
    Rectangle { x: f64, y: f64, width: f64, height: f64 },
    Triangle { points: [JsonPoint; 3] },
}

impl From<&FitGeometry> for JsonFit {
    fn from(fit: &FitGeometry) -> Self {
        match fit {
            FitGeometry::Circle(c) => JsonFit::Circle { h: c.h, k: c.k, r: c.r },
            FitGeometry::Rectangle(r) => JsonFit::Rectangle {
                x: r.min_x,
                y: r.min_y,
                width: r.width,
                height: r.height,
            },
            FitGeometry::Triangle(t) => JsonFit::Triangle { points: t.vertices().map(JsonPoint::from) },
        }
    }
}

/// Fit geometry plus the area it encloses.
#[derive(Serialize)]
struct JsonFitSummary {
    #[serde(flatten)]
    geometry: JsonFit,
    area: f64,
}

impl From<&FitGeometry> for JsonFitSummary {
    fn from(fit: &FitGeometry) -> Self {
        Self { geometry: JsonFit::from(fit), area: fit.area() }
    }
}

/// JSON output for one scored stroke.
#[derive(Serialize)]
struct JsonAssessment<'a> {
    shape: &'static str,
    score: f64,
    display: String,
    band: &'static str,
    fit: Option<JsonFitSummary>,
    metrics: &'a BTreeMap<&'static str, f64>,
    message: Option<&'static str>,
}

impl<'a> From<&'a Assessment> for JsonAssessment<'a> {
    fn from(a: &'a Assessment) -> Self {
        Self {
            shape: a.shape.name(),
            score: a.score,
            display: format_score(a.score),
            band: a.band.name(),
            fit: a.fit.as_ref().map(JsonFitSummary::from),
            metrics: &a.result.metrics,
            message: a.result.message,
        }
    }
}

/// Execute the score command.
pub fn cmd_score(args: &ScoreArgs) -> Result<(), CliError> {
    let config = load_scoring_config(args.config.as_deref())?;
    let stroke = load_stroke(&args.input)?;
    let assessment = score_stroke(args.shape, &stroke, &config)?;
    info!(
        shape = %assessment.shape,
        score = assessment.score,
        band = %assessment.band,
        "scored stroke"
    );

    let overlay = || overlay_svg(&stroke, assessment.fit.as_ref());

    let rendered = match args.format {
        OutputFormat::Text => format!("{}\n{}\n", format_score(assessment.score), describe(&assessment)),
        OutputFormat::Json => serde_json::to_string_pretty(&JsonAssessment::from(&assessment))?,
        OutputFormat::Svg => overlay(),
    };
    write_output(args.output.as_deref(), &rendered)?;

    if let Some(png) = &args.png {
        render_png(&overlay(), png, args.png_scale)?;
    }

    Ok(())
}
