//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use resvg::usvg;
use serde::{Deserialize, Serialize};
use tiny_skia::{Color, Pixmap, Transform};
use tracing::{info, warn};

use shape_score::{extract_strokes_from_svg, Assessment, Bounds, FitGeometry, Point, ShapeKind};

use super::CliError;

/// Color of the user's stroke.
pub const STROKE_COLOR: &str = "#111";
/// Color of the fitted ideal shape.
pub const FIT_COLOR: &str = "#e74c3c";
/// Side of the square preview canvas.
pub const PREVIEW_SIZE: f64 = 120.0;

/// Margin around the drawing in overlay output.
const OVERLAY_MARGIN: f64 = 20.0;

/// A point in JSON input and output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JsonPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for JsonPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

impl From<JsonPoint> for Point {
    fn from(p: JsonPoint) -> Self {
        Point::new(p.x, p.y)
    }
}

/// A stroke file: either a bare array of points or `{"points": [...]}`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StrokeFile {
    Bare(Vec<JsonPoint>),
    Wrapped { points: Vec<JsonPoint> },
}

impl StrokeFile {
    pub fn wrap(points: &[Point]) -> Self {
        StrokeFile::Wrapped { points: points.iter().copied().map(JsonPoint::from).collect() }
    }

    pub fn into_points(self) -> Vec<Point> {
        let points = match self {
            StrokeFile::Bare(points) | StrokeFile::Wrapped { points } => points,
        };
        points.into_iter().map(Point::from).collect()
    }
}

/// Read a whole input, with `-` meaning stdin.
pub fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        fs::read_to_string(path).map_err(|e| CliError::file(path, e))
    }
}

/// Load a stroke from a JSON or SVG file (or stdin).
///
/// SVG is detected by extension or by content starting with `<`. Only the
/// first stroke of an SVG is used.
pub fn load_stroke(path: &str) -> Result<Vec<Point>, CliError> {
    let content = read_input(path)?;
    let points = parse_stroke(&content, path.to_lowercase().ends_with(".svg"))?;
    info!(path, points = points.len(), "loaded stroke");
    Ok(points)
}

/// Parse stroke text; `is_svg` forces SVG parsing.
pub fn parse_stroke(content: &str, is_svg: bool) -> Result<Vec<Point>, CliError> {
    if is_svg || content.trim_start().starts_with('<') {
        let strokes = extract_strokes_from_svg(content)?;
        if strokes.len() > 1 {
            warn!(count = strokes.len(), "SVG has several strokes, scoring the first");
        }
        return strokes.into_iter().next().ok_or(CliError::EmptyStroke);
    }

    let file: StrokeFile = serde_json::from_str(content)?;
    Ok(file.into_points())
}

/// Write text to a file, or stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<(), CliError> {
    match path {
        Some(path) => {
            fs::write(path, content).map_err(|e| CliError::file(path, e))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Build points string: "x1,y1 x2,y2 x3,y3 ..."
fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// SVG element for a fitted shape.
fn fit_element(fit: &FitGeometry, color: &str, width: f64, dashed: bool) -> String {
    let dash = if dashed { r#" stroke-dasharray="6,6""# } else { "" };
    match fit {
        FitGeometry::Circle(c) => format!(
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{:.2}" stroke="{}" stroke-width="{}" fill="none"{}/>"#,
            c.h, c.k, c.r, color, width, dash
        ),
        FitGeometry::Rectangle(r) => format!(
            r#"  <rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" stroke="{}" stroke-width="{}" fill="none"{}/>"#,
            r.min_x, r.min_y, r.width, r.height, color, width, dash
        ),
        FitGeometry::Triangle(t) => format!(
            r#"  <polygon points="{}" stroke="{}" stroke-width="{}" fill="none"{}/>"#,
            points_attr(&t.vertices()),
            color,
            width,
            dash
        ),
    }
}

/// Render the stroke with the fitted shape drawn over it.
///
/// The view box covers both the stroke and the fit plus a margin. Circle
/// fits are dashed; degenerate circles are left out.
pub fn overlay_svg(stroke: &[Point], fit: Option<&FitGeometry>) -> String {
    let bounds = match (Bounds::of(stroke), fit.map(FitGeometry::bounds)) {
        (Some(a), Some(b)) => a.union(&b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => Bounds { min_x: 0.0, min_y: 0.0, max_x: 0.0, max_y: 0.0 },
    }
    .padded(OVERLAY_MARGIN);

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.2} {:.2} {:.2} {:.2}" width="{:.0}" height="{:.0}">
<rect x="{:.2}" y="{:.2}" width="100%" height="100%" fill="white"/>
"#,
        bounds.min_x,
        bounds.min_y,
        bounds.width(),
        bounds.height(),
        bounds.width(),
        bounds.height(),
        bounds.min_x,
        bounds.min_y,
    ));

    if stroke.len() >= 2 {
        svg.push_str(&format!(
            r#"  <polyline points="{}" stroke="{}" stroke-width="3" stroke-linecap="round" stroke-linejoin="round" fill="none"/>
"#,
            points_attr(stroke),
            STROKE_COLOR
        ));
    }

    // A zero-radius circle has nothing to draw
    let fit = fit.filter(|f| !matches!(f, FitGeometry::Circle(c) if c.is_degenerate()));
    if let Some(fit) = fit {
        let dashed = matches!(fit, FitGeometry::Circle(_));
        svg.push_str(&fit_element(fit, FIT_COLOR, 2.0, dashed));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// The 120×120 template shown before drawing.
pub fn preview_svg(kind: ShapeKind) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {size} {size}" width="{size}" height="{size}">
<rect width="100%" height="100%" fill="white"/>
{element}
</svg>
"#,
        size = PREVIEW_SIZE,
        element = fit_element(&kind.preview(), "black", 2.0, false)
    )
}

/// Rasterize an SVG document to PNG at `scale` times its own size.
pub fn render_png(svg: &str, path: &Path, scale: f32) -> Result<(), CliError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| CliError::Render(e.to_string()))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| CliError::Render(format!("cannot create {}x{} image", width, height)))?;
    pixmap.fill(Color::WHITE);

    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap
        .save_png(path)
        .map_err(|e| CliError::Render(format!("{}: {}", path.display(), e)))?;
    info!(path = %path.display(), width, height, "wrote PNG");
    Ok(())
}

/// One-line diagnostics for a scored stroke, in the shape's own terms.
pub fn describe(assessment: &Assessment) -> String {
    let result = &assessment.result;
    if let Some(message) = result.message {
        return format!("Could not score stroke ({})", message);
    }
    let m = |name: &str| result.metric(name).unwrap_or(0.0);

    match assessment.shape {
        ShapeKind::Circle => format!(
            "MAE≈{:.1} px, rel≈{:.3}, coverage={:.0}%",
            m("mae"),
            m("relative_error"),
            m("coverage") * 100.0
        ),
        ShapeKind::Rectangle => format!(
            "AvgDist≈{:.1} px, Width={:.0}, Height={:.0}",
            m("avg_dist"),
            m("drawn_width"),
            m("drawn_height")
        ),
        ShapeKind::Triangle => format!(
            "Perimeter={:.0}, Ideal={:.0}",
            m("perimeter"),
            m("ideal_perimeter")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shape_score::{score_stroke, CircleFit, RectangleFit, ScoringConfig};

    #[test]
    fn parses_bare_and_wrapped_json() {
        let bare = r#"[{"x": 1, "y": 2}, {"x": 3.5, "y": 4}]"#;
        let wrapped = r#"{"points": [{"x": 1, "y": 2}, {"x": 3.5, "y": 4}]}"#;
        let expected = vec![Point::new(1.0, 2.0), Point::new(3.5, 4.0)];

        assert_eq!(parse_stroke(bare, false).unwrap(), expected);
        assert_eq!(parse_stroke(wrapped, false).unwrap(), expected);
    }

    #[test]
    fn detects_svg_by_content() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
            <polyline points="0,0 10,0 10,10" stroke="black" fill="none"/>
            <polyline points="50,50 60,60" stroke="black" fill="none"/>
        </svg>"#;
        let points = parse_stroke(svg, false).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2], Point::new(10.0, 10.0));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(parse_stroke("{\"pts\": []}", false), Err(CliError::Json(_))));
    }

    #[test]
    fn circle_overlay_is_dashed() {
        let stroke = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let fit = FitGeometry::Circle(CircleFit { h: 5.0, k: 5.0, r: 7.0 });
        let svg = overlay_svg(&stroke, Some(&fit));

        assert!(svg.contains("<polyline"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains(r#"stroke-dasharray="6,6""#));
        assert!(svg.contains(FIT_COLOR));
    }

    #[test]
    fn rectangle_overlay_is_solid() {
        let stroke = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let fit = FitGeometry::Rectangle(RectangleFit { min_x: 0.0, min_y: 0.0, width: 10.0, height: 10.0 });
        let svg = overlay_svg(&stroke, Some(&fit));

        assert!(svg.contains("<rect x=\"0.00\""));
        assert!(!svg.contains("stroke-dasharray"));
    }

    #[test]
    fn degenerate_circle_is_not_drawn() {
        let stroke = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        let fit = FitGeometry::Circle(CircleFit { h: 5.0, k: 5.0, r: 0.0 });
        let svg = overlay_svg(&stroke, Some(&fit));

        assert!(svg.contains("<polyline"));
        assert!(!svg.contains("<circle"));
    }

    #[test]
    fn scored_overlay_reads_back_as_the_stroke() {
        let stroke: Vec<Point> = (0..=100)
            .map(|i| {
                let a = std::f64::consts::TAU * i as f64 / 100.0;
                Point::new(200.0 + 80.0 * a.cos(), 200.0 + 80.0 * a.sin())
            })
            .collect();
        let config = ScoringConfig::default();
        let first = score_stroke(ShapeKind::Circle, &stroke, &config).unwrap();

        // The white background rect comes first in the document
        let svg = overlay_svg(&stroke, first.fit.as_ref());
        let reread = parse_stroke(&svg, true).unwrap();
        assert_eq!(reread.len(), stroke.len());

        let again = score_stroke(ShapeKind::Circle, &reread, &config).unwrap();
        assert!((again.score - first.score).abs() <= 0.1, "{} vs {}", again.score, first.score);
    }

    #[test]
    fn previews_render_for_every_shape() {
        for kind in ShapeKind::all() {
            let svg = preview_svg(*kind);
            assert!(svg.contains(r#"viewBox="0 0 120 120""#), "{}", svg);
        }
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("circle.png");
        render_png(&preview_svg(ShapeKind::Circle), &png, 1.0).unwrap();
        assert!(png.metadata().unwrap().len() > 0);
    }
}
