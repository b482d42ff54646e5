//! Drawing-surface capability consumed by the engine.
//!
//! The engine never reads back from a surface and never assumes anything
//! drawn survives [`Surface::resize_width`]. [`RecordingSurface`] keeps the
//! draw calls as data; the SVG exporter and the egui viewer replay them.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::geometry::{Bezier, Path, Rect};
use crate::text::TextRun;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub color: Rgb,
    pub alpha: f32,
}

impl FillStyle {
    pub fn opaque(color: Rgb) -> Self {
        Self { color, alpha: 1.0 }
    }

    pub fn translucent(color: Rgb, alpha: f32) -> Self {
        Self { color, alpha }
    }
}

pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    /// Erase everything drawn so far.
    fn clear_all(&mut self);
    /// Change the width; the surface is cleared as a side effect.
    fn resize_width(&mut self, width: f32);
    fn fill_rect(&mut self, rect: Rect, style: FillStyle);
    fn stroke_rect(&mut self, rect: Rect);
    fn stroke_path(&mut self, path: &Path);
    /// Fill the region enclosed by a cubic curve and its chord.
    fn fill_bezier(&mut self, curve: &Bezier, style: FillStyle);
    fn draw_text(&mut self, run: &TextRun);
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillRect { rect: Rect, style: FillStyle },
    StrokeRect { rect: Rect },
    StrokePath { path: Path },
    FillBezier { curve: Bezier, style: FillStyle },
    Text { run: TextRun },
}

/// Surface that stores draw calls instead of rasterising them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
    /// How many times the contents were wiped (explicitly or by a resize).
    clears: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            clears: 0,
        }
    }

    /// Draw calls issued since the last clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { run } => Some(run),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear_all(&mut self) {
        self.commands.clear();
        self.clears += 1;
    }

    fn resize_width(&mut self, width: f32) {
        self.width = width;
        self.clear_all();
    }

    fn fill_rect(&mut self, rect: Rect, style: FillStyle) {
        self.commands.push(DrawCommand::FillRect { rect, style });
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::StrokeRect { rect });
    }

    fn stroke_path(&mut self, path: &Path) {
        if !path.is_empty() {
            self.commands.push(DrawCommand::StrokePath { path: path.clone() });
        }
    }

    fn fill_bezier(&mut self, curve: &Bezier, style: FillStyle) {
        self.commands.push(DrawCommand::FillBezier {
            curve: *curve,
            style,
        });
    }

    fn draw_text(&mut self, run: &TextRun) {
        self.commands.push(DrawCommand::Text { run: run.clone() });
    }
}
