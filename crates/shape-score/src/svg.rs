//! SVG import - extract strokes from SVG files.
//!
//! Uses usvg for complete SVG resolution (CSS, shapes converted to paths)
//! then walks the tree and turns every subpath into a point sequence.
//!
//! ## Curve Flattening
//!
//! Strokes exported by drawing apps are often smoothed into Bézier curves.
//! The scorers need points, so curves are "flattened" into line segments
//! with lyon_geom at a fixed tolerance.

use crate::geometry::Point;
use lyon_geom::{point, CubicBezierSegment, QuadraticBezierSegment};

/// Error type for SVG import.
#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    Parse(String),
    #[error("no strokes found in SVG")]
    NoStrokes,
}

/// Tolerance for curve flattening, in SVG user units.
const CURVE_TOLERANCE: f32 = 0.1;

/// Extract every stroke (subpath) from an SVG document, in document order.
///
/// Only paths with a stroke paint are read; fill-only shapes such as a
/// background rect are skipped. Open and closed paths are both accepted;
/// a closed subpath gets its starting point appended so the returned
/// polyline traces the whole outline. Subpaths with fewer than two distinct points are skipped.
/// Element transforms are not applied.
pub fn extract_strokes_from_svg(svg_content: &str) -> Result<Vec<Vec<Point>>, SvgError> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::Parse(e.to_string()))?;

    let mut strokes = Vec::new();
    extract_from_group(tree.root(), &mut strokes);

    if strokes.is_empty() {
        Err(SvgError::NoStrokes)
    } else {
        Ok(strokes)
    }
}

fn extract_from_group(group: &usvg::Group, strokes: &mut Vec<Vec<Point>>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(group) => extract_from_group(group, strokes),
            // Fill-only paths (backgrounds, swatches) are not strokes
            usvg::Node::Path(path) if path.stroke().is_some() => path_to_strokes(path, strokes),
            // Text and images carry no stroke geometry
            _ => {}
        }
    }
}

/// Split a usvg path into its subpaths, flattening curves along the way.
fn path_to_strokes(path: &usvg::Path, strokes: &mut Vec<Vec<Point>>) {
    use usvg::tiny_skia_path::PathSegment;

    let mut current: Vec<Point> = Vec::new();
    let mut last: Option<(f32, f32)> = None;

    for segment in path.data().segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                finish_stroke(&mut current, strokes);
                current.push(Point::new(p.x as f64, p.y as f64));
                last = Some((p.x, p.y));
            }
            PathSegment::LineTo(p) => {
                current.push(Point::new(p.x as f64, p.y as f64));
                last = Some((p.x, p.y));
            }
            PathSegment::QuadTo(ctrl, p) => {
                if let Some((lx, ly)) = last {
                    let curve = QuadraticBezierSegment {
                        from: point(lx, ly),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |seg| {
                        current.push(Point::new(seg.to.x as f64, seg.to.y as f64));
                    });
                } else {
                    current.push(Point::new(p.x as f64, p.y as f64));
                }
                last = Some((p.x, p.y));
            }
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                if let Some((lx, ly)) = last {
                    let curve = CubicBezierSegment {
                        from: point(lx, ly),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |seg| {
                        current.push(Point::new(seg.to.x as f64, seg.to.y as f64));
                    });
                } else {
                    current.push(Point::new(p.x as f64, p.y as f64));
                }
                last = Some((p.x, p.y));
            }
            PathSegment::Close => {
                if let Some(&start) = current.first() {
                    current.push(start);
                    last = Some((start.x as f32, start.y as f32));
                }
            }
        }
    }

    finish_stroke(&mut current, strokes);
}

/// Move `current` into `strokes` if it holds a usable polyline.
fn finish_stroke(current: &mut Vec<Point>, strokes: &mut Vec<Vec<Point>>) {
    // Curve flattening can repeat points
    current.dedup_by(|a, b| (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);

    let stroke = std::mem::take(current);
    if stroke.len() >= 2 {
        strokes.push(stroke);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_polyline_is_a_stroke() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <polyline points="10,10 40,15 70,30 90,60" fill="none" stroke="black"/>
            </svg>
        "#;

        let strokes = extract_strokes_from_svg(svg).unwrap();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].len(), 4);
        assert_eq!(strokes[0][0], Point::new(10.0, 10.0));
        assert_eq!(strokes[0][3], Point::new(90.0, 60.0));
    }

    #[test]
    fn closed_rect_returns_to_start() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <rect x="10" y="10" width="80" height="60" fill="none" stroke="black"/>
            </svg>
        "#;

        let strokes = extract_strokes_from_svg(svg).unwrap();
        assert_eq!(strokes.len(), 1);
        let stroke = &strokes[0];
        assert_eq!(stroke.first(), stroke.last());
        assert_eq!(stroke.len(), 5);
    }

    #[test]
    fn circle_is_flattened() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <circle cx="50" cy="50" r="40" fill="none" stroke="black"/>
            </svg>
        "#;

        let strokes = extract_strokes_from_svg(svg).unwrap();
        assert_eq!(strokes.len(), 1);
        assert!(strokes[0].len() > 20,
            "Circle should have many points from curve flattening, got {}",
            strokes[0].len());
        for p in &strokes[0] {
            let r = p.distance(Point::new(50.0, 50.0));
            assert!((r - 40.0).abs() < 0.5, "point {:?} at radius {}", p, r);
        }
    }

    #[test]
    fn subpaths_become_separate_strokes() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <path d="M 10,10 L 20,20 L 30,10 M 50,50 Q 70,20 90,50" fill="none" stroke="black"/>
            </svg>
        "#;

        let strokes = extract_strokes_from_svg(svg).unwrap();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].len(), 3);
        assert!(strokes[1].len() > 3);
    }

    #[test]
    fn fill_only_paths_are_skipped() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <rect x="0" y="0" width="100" height="100" fill="white"/>
                <polyline points="10,10 40,15 70,30" fill="none" stroke="black"/>
            </svg>
        "#;

        let strokes = extract_strokes_from_svg(svg).unwrap();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0][0], Point::new(10.0, 10.0));
    }

    #[test]
    fn only_filled_shapes_means_no_strokes() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
                <rect x="10" y="10" width="50" height="50" fill="red"/>
            </svg>
        "#;

        assert!(matches!(extract_strokes_from_svg(svg), Err(SvgError::NoStrokes)));
    }

    #[test]
    fn empty_svg_has_no_strokes() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
            </svg>
        "#;

        assert!(matches!(extract_strokes_from_svg(svg), Err(SvgError::NoStrokes)));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(extract_strokes_from_svg("not svg at all"), Err(SvgError::Parse(_))));
    }
}
