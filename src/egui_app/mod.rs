//! Egui-based interactive viewer for branch diagrams (feature = "egui").
//!
//! The engine draws onto a [`RecordingSurface`](crate::surface::RecordingSurface);
//! this module replays the recording with the egui painter every frame and
//! forwards toolbar buttons and canvas clicks back to the engine.

#![cfg(feature = "egui")]

mod render;
mod state;
mod ui;

pub use render::{paint_commands, to_color32, to_pos2, to_rect};
pub use state::BranchlineApp;
pub use ui::update;
