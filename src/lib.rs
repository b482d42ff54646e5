//! Layout engine for subject/step branch diagrams.
//!
//! Subjects hang from a shared top line; each owns a column of steps that
//! wraps into a new extension lane every `wrap_capacity` steps. The
//! [`engine::Engine`] turns add/delete commands into draw calls on a
//! [`surface::Surface`], keeps the clickable regions in sync and grows the
//! surface when the diagram outgrows it.
//!
//! The binary `branchline` replays a command script headlessly and can write
//! the result as SVG or JSON.

pub mod color;
pub mod command;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod hit_test;
pub mod position;
pub mod sizing;
pub mod state;
pub mod surface;
pub mod svg;
pub mod text;

// Optional interactive viewer painting the diagram with egui.
#[cfg(feature = "egui")]
pub mod egui_app;
