#![cfg(feature = "egui")]

use eframe::egui::{self, Color32, RichText, Sense, Stroke, Vec2};

use crate::command::Command;
use crate::position;
use crate::surface::Surface;

use super::render::{paint_commands, to_rect};
use super::state::BranchlineApp;

pub fn update(app: &mut BranchlineApp, ctx: &egui::Context, _frame: &mut eframe::Frame) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let has_subjects = app.engine.state().subject_count() > 0;
            let has_steps = app
                .engine
                .state()
                .selected_subject()
                .is_some_and(|s| s.step_count > 0);

            if ui.button("Add subject").clicked() {
                app.apply(Command::AddSubject);
            }
            if ui.add_enabled(has_subjects, egui::Button::new("Add step")).clicked() {
                app.apply(Command::AddStep);
            }
            ui.separator();
            if ui
                .add_enabled(has_subjects, egui::Button::new("Delete subject"))
                .clicked()
            {
                app.apply(Command::DeleteSubject);
            }
            if ui.add_enabled(has_steps, egui::Button::new("Delete step")).clicked() {
                app.apply(Command::DeleteStep);
            }
            ui.separator();
            if ui.button("Soft reset").clicked() {
                app.apply(Command::SoftReset);
            }
            if ui.button("Reset").clicked() {
                app.apply(Command::HardReset);
            }
            ui.separator();
            ui.checkbox(&mut app.highlight_selection, "Highlight");
        });
    });

    egui::SidePanel::right("info").show(ctx, |ui| {
        let state = app.engine.state();
        let stats = app.engine.stats();
        ui.label(RichText::new("Diagram").strong());
        ui.label(format!("Subjects: {}", state.subject_count()));
        ui.label(format!("Steps: {}", state.total_steps()));
        ui.label(format!("Extensions: {}", state.total_extensions()));
        match state.selected {
            Some(i) => ui.label(format!("Selected: Subject {i}")),
            None => ui.label("Selected: none"),
        };
        ui.label(format!(
            "Surface: {} x {}",
            app.engine.surface().width(),
            app.engine.surface().height()
        ));
        ui.label(format!("Rebuilds: {}", stats.rebuilds));
        ui.separator();
        ui.label(RichText::new("Log").strong());
        for entry in app.log.iter().rev() {
            ui.monospace(entry);
        }
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let surface = app.engine.surface();
            let size = Vec2::new(surface.width(), surface.height());
            let (response, painter) = ui.allocate_painter(size, Sense::click());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, Color32::WHITE);
            paint_commands(&painter, surface.commands(), origin);

            if app.highlight_selection {
                if let Some(subject) = app.engine.selected() {
                    let rect = position::subject_box_rect(
                        app.engine.config(),
                        app.engine.state(),
                        subject,
                    );
                    painter.rect_stroke(
                        to_rect(rect, origin),
                        0.0,
                        Stroke::new(2.0, Color32::from_rgb(40, 40, 40)),
                        egui::StrokeKind::Outside,
                    );
                }
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let local = pos - origin;
                    app.apply(Command::Click {
                        x: local.x,
                        y: local.y,
                    });
                }
            }
        });
    });
}
