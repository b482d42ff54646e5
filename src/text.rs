//! Persisted text runs.
//!
//! Every box appends its label here and the label is drawn right away. A
//! rebuild clears the log and regenerates it in creation order, so later
//! labels are painted over earlier geometry exactly as during incremental
//! drawing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size_px: f32,
    pub family: String,
}

impl Font {
    pub fn serif(size_px: f32) -> Self {
        Self {
            size_px,
            family: "serif".to_string(),
        }
    }
}

/// CSS shorthand, e.g. `15px serif`.
impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}", self.size_px, self.family)
    }
}

/// One label: font, string and baseline position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub font: Font,
    pub text: String,
    pub position: Point,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextLog {
    runs: Vec<TextRun>,
}

impl TextLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a run and return it for immediate drawing.
    pub fn persist(&mut self, font: Font, text: impl Into<String>, position: Point) -> &TextRun {
        self.runs.push(TextRun {
            font,
            text: text.into(),
            position,
        });
        &self.runs[self.runs.len() - 1]
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn clear(&mut self) {
        self.runs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_display() {
        assert_eq!(Font::serif(15.0).to_string(), "15px serif");
        assert_eq!(Font::serif(12.5).to_string(), "12.5px serif");
    }

    #[test]
    fn test_persist_keeps_order() {
        let mut log = TextLog::new();
        log.persist(Font::serif(15.0), "Subject 0", Point::new(1.0, 2.0));
        let last = log.persist(Font::serif(12.0), "Step 0", Point::new(3.0, 4.0));
        assert_eq!(last.text, "Step 0");
        assert_eq!(log.runs()[0].text, "Subject 0");
        assert_eq!(log.len(), 2);
    }
}
