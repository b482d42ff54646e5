//! Geometry constants for the branch diagram.
//!
//! All pixel values used by the layout live in [`LayoutConfig`]. The fixed
//! values are empirically tuned; the section widths are derived from them and
//! are what the surface sizing depends on:
//!
//! ```text
//! total = subjects * subject_section_width
//!       + (subjects - 1) * subject_spacing_delta
//!       + step_section_width
//!       + sum(extensions) * extended_step_section_width
//! ```
//!
//! A config can be loaded from JSON; any field left out keeps its default.

use anyhow::{Context, Result, bail};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// Size of one kind of box plus the horizontal reach of its curved caps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub width: f32,
    pub height: f32,
    pub bezier_control: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub subject_box: BoxSpec,
    pub step_box: BoxSpec,
    /// Base spacing unit; most margins are multiples of it.
    pub buffer: f32,
    /// Length of the short horizontal line joining a box to its connector.
    pub branch_line: f32,
    pub shadow_offset: f32,
    pub shadow_alpha: f32,
    /// Steps per lane before a subject wraps into a new extension lane.
    pub wrap_capacity: usize,
    pub initial_width: f32,
    pub initial_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let buffer = 10.0;
        Self {
            subject_box: BoxSpec {
                width: 70.0,
                height: 30.0,
                bezier_control: 30.0,
            },
            step_box: BoxSpec {
                width: 90.0,
                height: 25.0,
                bezier_control: 10.0,
            },
            buffer,
            branch_line: buffer,
            shadow_offset: 2.0,
            shadow_alpha: 0.5,
            wrap_capacity: 8,
            initial_width: 200.0,
            initial_height: 480.0,
        }
    }
}

impl LayoutConfig {
    /// Load a config from a JSON file and validate it.
    pub fn from_json_file(path: &Utf8Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;
        let cfg: Self =
            serde_json::from_str(&raw).with_context(|| format!("Invalid layout config {}", path))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configs that would produce degenerate or negative geometry.
    pub fn validate(&self) -> Result<()> {
        for (name, dims) in [("subject_box", self.subject_box), ("step_box", self.step_box)] {
            if !(dims.width > 0.0 && dims.height > 0.0) {
                bail!("{name} must have a positive width and height");
            }
        }
        if self.buffer < 0.0 || self.branch_line < 0.0 {
            bail!("buffer and branch_line must not be negative");
        }
        if self.wrap_capacity == 0 {
            bail!("wrap_capacity must be at least 1");
        }
        if !(self.initial_width > 0.0 && self.initial_height > 0.0) {
            bail!("initial surface must have a positive size");
        }
        if !(0.0..=1.0).contains(&self.shadow_alpha) {
            bail!("shadow_alpha must be within 0..=1");
        }
        Ok(())
    }

    /// Y of the subject row's connector junction.
    pub fn subject_row_top(&self) -> f32 {
        self.buffer * 4.0
    }

    pub fn subject_left_margin(&self) -> f32 {
        self.buffer * 2.0
    }

    /// Horizontal distance between consecutive subject slots.
    pub fn subject_spacing(&self) -> f32 {
        self.subject_box.width + self.buffer * 4.0
    }

    pub fn subject_section_width(&self) -> f32 {
        self.branch_line + self.subject_box.width
    }

    pub fn step_section_width(&self) -> f32 {
        self.branch_line * 2.0 + self.subject_box.width / 2.0 + self.step_box.width
            - self.subject_section_width()
    }

    pub fn extended_step_section_width(&self) -> f32 {
        self.branch_line * 2.0 + self.step_box.width
    }

    pub fn subject_spacing_delta(&self) -> f32 {
        self.subject_spacing() - self.subject_section_width()
    }

    pub fn step_row_base(&self) -> f32 {
        self.subject_row_top() * 2.0
    }

    pub fn step_row_height(&self) -> f32 {
        self.subject_row_top()
    }

    /// Slack added past the total width when the surface grows.
    pub fn growth_margin(&self) -> f32 {
        self.buffer * 3.0
    }
}
