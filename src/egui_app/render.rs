#![cfg(feature = "egui")]

use eframe::egui::epaint::CubicBezierShape;
use eframe::egui::{self, Align2, Color32, FontId, Pos2, Stroke, Vec2};

use crate::color::Rgb;
use crate::geometry::{Point, Rect};
use crate::surface::{DrawCommand, FillStyle};

pub fn to_pos2(p: Point, origin: Pos2) -> Pos2 {
    origin + Vec2::new(p.x, p.y)
}

pub fn to_rect(r: Rect, origin: Pos2) -> egui::Rect {
    egui::Rect::from_min_size(to_pos2(r.origin(), origin), Vec2::new(r.width, r.height))
}

pub fn to_color32(c: Rgb, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(c.0, c.1, c.2, a)
}

fn fill_color(style: FillStyle) -> Color32 {
    to_color32(style.color, style.alpha)
}

/// Paint recorded draw commands with `origin` as the surface's top-left.
pub fn paint_commands(painter: &egui::Painter, commands: &[DrawCommand], origin: Pos2) {
    let stroke = Stroke::new(1.0, Color32::BLACK);
    for cmd in commands {
        match cmd {
            DrawCommand::FillRect { rect, style } => {
                painter.rect_filled(to_rect(*rect, origin), 0.0, fill_color(*style));
            }
            DrawCommand::StrokeRect { rect } => {
                painter.rect_stroke(
                    to_rect(*rect, origin),
                    0.0,
                    Stroke::new(2.0, Color32::BLACK),
                    egui::StrokeKind::Outside,
                );
            }
            DrawCommand::StrokePath { path } => {
                for seg in &path.segments {
                    painter.line_segment([to_pos2(seg.from, origin), to_pos2(seg.to, origin)], stroke);
                }
            }
            DrawCommand::FillBezier { curve, style } => {
                let points = [curve.start, curve.control1, curve.control2, curve.end]
                    .map(|p| to_pos2(p, origin));
                painter.add(CubicBezierShape::from_points_stroke(
                    points,
                    true,
                    fill_color(*style),
                    Stroke::NONE,
                ));
            }
            DrawCommand::Text { run } => {
                // canvas text is positioned by its baseline
                painter.text(
                    to_pos2(run.position, origin),
                    Align2::LEFT_BOTTOM,
                    &run.text,
                    FontId::proportional(run.font.size_px),
                    Color32::BLACK,
                );
            }
        }
    }
}
