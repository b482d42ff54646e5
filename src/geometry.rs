//! Plain value types shared by the layout, the surfaces and the exporters.
//!
//! Coordinates are surface-local pixels with the origin at the top-left.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn from_origin(origin: Point, width: f32, height: f32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Strict containment: points on the border are outside.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.left && x < self.right() && y > self.top && y < self.bottom()
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

/// Open polyline(s) built with canvas-style `move_to`/`line_to` calls.
///
/// Each `move_to` starts a new sub-path; a `line_to` without a prior
/// `move_to` is treated as one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub segments: Vec<Segment>,
    #[serde(skip)]
    cursor: Option<Point>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.cursor = Some(p);
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        if let Some(from) = self.cursor {
            self.segments.push(Segment::new(from, p));
        }
        self.cursor = Some(p);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn line(from: Point, to: Point) -> Self {
        let mut path = Self::new();
        path.move_to(from).line_to(to);
        path
    }
}

/// Cubic bezier with explicit start point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bezier {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_strict() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(r.contains(11.0, 21.0));
        assert!(!r.contains(10.0, 30.0));
        assert!(!r.contains(40.0, 30.0));
        assert!(!r.contains(20.0, 60.0));
    }

    #[test]
    fn test_path_line_to_without_move_is_ignored() {
        let mut p = Path::new();
        p.line_to(Point::new(1.0, 1.0)).line_to(Point::new(2.0, 2.0));
        assert_eq!(p.segments.len(), 1);
        assert_eq!(p.segments[0].from, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_path_subpaths() {
        let mut p = Path::new();
        p.move_to(Point::new(0.0, 0.0))
            .line_to(Point::new(5.0, 0.0))
            .move_to(Point::new(0.0, 5.0))
            .line_to(Point::new(5.0, 5.0));
        assert_eq!(p.segments.len(), 2);
        assert_eq!(p.segments[1].from, Point::new(0.0, 5.0));
    }
}
