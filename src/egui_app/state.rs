#![cfg(feature = "egui")]

use eframe::egui;

use crate::command::Command;
use crate::config::LayoutConfig;
use crate::engine::Engine;
use crate::surface::RecordingSurface;

/// How many applied commands the side log keeps.
const LOG_LEN: usize = 12;

/// Interactive app wrapping an engine drawing onto a recording surface.
pub struct BranchlineApp {
    pub engine: Engine<RecordingSurface>,
    /// Most recent commands, newest last.
    pub log: Vec<String>,
    /// Draw an outline around the selected subject.
    pub highlight_selection: bool,
}

impl BranchlineApp {
    pub fn new(cfg: LayoutConfig) -> Self {
        let surface = RecordingSurface::new(cfg.initial_width, cfg.initial_height);
        Self {
            engine: Engine::new(cfg, surface),
            log: Vec::new(),
            highlight_selection: true,
        }
    }

    /// Apply a command and record it in the log.
    pub fn apply(&mut self, cmd: Command) {
        let hit = self.engine.apply(&cmd);
        let entry = match (cmd, hit) {
            (Command::Click { .. }, Some(subject)) => format!("{cmd} -> subject {subject}"),
            _ => cmd.to_string(),
        };
        self.log.push(entry);
        if self.log.len() > LOG_LEN {
            self.log.remove(0);
        }
    }
}

impl eframe::App for BranchlineApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        super::ui::update(self, ctx, frame);
    }
}
