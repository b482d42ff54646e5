//! SVG export of a [`RecordingSurface`].

use std::fmt::{self, Write as _};

use anyhow::{Context, Result};
use camino::Utf8Path;

use crate::geometry::{Path, Rect};
use crate::surface::{DrawCommand, FillStyle, RecordingSurface, Surface};

const STROKE: &str = "#000000";

fn path_data(path: &Path) -> String {
    let mut d = String::new();
    let mut cursor = None;
    for seg in &path.segments {
        if cursor != Some(seg.from) {
            let _ = write!(d, "M{} {} ", seg.from.x, seg.from.y);
        }
        let _ = write!(d, "L{} {} ", seg.to.x, seg.to.y);
        cursor = Some(seg.to);
    }
    d.trim_end().to_string()
}

fn fill_attrs(style: FillStyle) -> String {
    if style.alpha < 1.0 {
        format!(r#"fill="{}" fill-opacity="{}""#, style.color.to_hex(), style.alpha)
    } else {
        format!(r#"fill="{}""#, style.color.to_hex())
    }
}

fn rect_attrs(r: Rect) -> String {
    format!(
        r#"x="{}" y="{}" width="{}" height="{}""#,
        r.left, r.top, r.width, r.height
    )
}

/// Write the surface's current contents as a standalone SVG document.
pub fn write_svg(out: &mut impl fmt::Write, surface: &RecordingSurface) -> fmt::Result {
    let (w, h) = (surface.width(), surface.height());
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(out, r##"  <rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    for cmd in surface.commands() {
        match cmd {
            DrawCommand::FillRect { rect, style } => {
                writeln!(out, "  <rect {} {}/>", rect_attrs(*rect), fill_attrs(*style))?;
            }
            DrawCommand::StrokeRect { rect } => {
                writeln!(
                    out,
                    r#"  <rect {} fill="none" stroke="{STROKE}"/>"#,
                    rect_attrs(*rect)
                )?;
            }
            DrawCommand::StrokePath { path } => {
                writeln!(
                    out,
                    r#"  <path d="{}" fill="none" stroke="{STROKE}"/>"#,
                    path_data(path)
                )?;
            }
            DrawCommand::FillBezier { curve, style } => {
                writeln!(
                    out,
                    r#"  <path d="M{} {} C{} {} {} {} {} {} Z" {}/>"#,
                    curve.start.x,
                    curve.start.y,
                    curve.control1.x,
                    curve.control1.y,
                    curve.control2.x,
                    curve.control2.y,
                    curve.end.x,
                    curve.end.y,
                    fill_attrs(*style)
                )?;
            }
            DrawCommand::Text { run } => {
                writeln!(
                    out,
                    r#"  <text x="{}" y="{}" font-family="{}" font-size="{}" fill="{STROKE}">{}</text>"#,
                    run.position.x,
                    run.position.y,
                    html_escape::encode_double_quoted_attribute(&run.font.family),
                    run.font.size_px,
                    html_escape::encode_text(&run.text)
                )?;
            }
        }
    }
    writeln!(out, "</svg>")
}

pub fn render_svg(surface: &RecordingSurface) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_svg(&mut out, surface);
    out
}

pub fn save_svg(surface: &RecordingSurface, path: &Utf8Path) -> Result<()> {
    std::fs::write(path, render_svg(surface)).with_context(|| format!("Write {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_path_data_joins_continuous_segments() {
        let mut p = Path::new();
        p.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(10.0, 0.0))
            .line_to(Point::new(10.0, 5.0))
            .move_to(Point::new(1.0, 1.0))
            .line_to(Point::new(2.0, 2.0));
        assert_eq!(path_data(&p), "M0 0 L10 0 L10 5 M1 1 L2 2");
    }

    #[test]
    fn test_fill_attrs_alpha() {
        let c = crate::color::Rgb(1, 2, 3);
        assert_eq!(fill_attrs(FillStyle::opaque(c)), r##"fill="#010203""##);
        assert_eq!(
            fill_attrs(FillStyle::translucent(c, 0.5)),
            r##"fill="#010203" fill-opacity="0.5""##
        );
    }
}
