//! Diagram engine: the command surface and the rebuild orchestrator.
//!
//! [`Engine`] owns the abstract [`LayoutState`], the hit-test registry, the
//! text log and the drawing surface. Every public operation runs to
//! completion and leaves those four mutually consistent:
//!
//! - adding a subject or a step draws just the new box, unless the surface
//!   has to grow or a new extension lane shifts later subjects;
//! - in those cases, and after any delete, [`Engine::soft_reset`] wipes
//!   everything derived and replays the subjects and their step counts in
//!   index order.
//!
//! Extension counts and positions are never carried across a rebuild; they
//! fall out of the replay. This is what makes the picture a function of the
//! step counts alone.
//!
//! # Example
//!
//! ```rust
//! use branchline::config::LayoutConfig;
//! use branchline::engine::Engine;
//! use branchline::surface::RecordingSurface;
//!
//! let cfg = LayoutConfig::default();
//! let surface = RecordingSurface::new(cfg.initial_width, cfg.initial_height);
//! let mut engine = Engine::new(cfg, surface);
//! engine.add_subject();
//! for _ in 0..9 {
//!     engine.add_step();
//! }
//! assert_eq!(engine.state().extensions(0), 1);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::command::Command;
use crate::config::LayoutConfig;
use crate::geometry::Path;
use crate::hit_test::{ClickableRegion, HitTestRegistry};
use crate::position::{self, SubjectLayout};
use crate::sizing;
use crate::state::{LayoutState, expected_extensions};
use crate::surface::{FillStyle, Surface};
use crate::text::{Font, TextLog, TextRun};

/// Counters exposed for tests and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub rebuilds: usize,
    pub surface_growths: usize,
    pub hard_resets: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectSnapshot {
    pub step_count: usize,
    pub extensions: usize,
    pub color: String,
}

/// Everything observable about the diagram at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramSnapshot {
    pub surface_width: f32,
    pub surface_height: f32,
    pub total_extended_distance: f32,
    pub selected: Option<usize>,
    pub subjects: Vec<SubjectSnapshot>,
    pub layout: Vec<SubjectLayout>,
    pub regions: Vec<ClickableRegion>,
    pub text_runs: Vec<TextRun>,
}

pub struct Engine<S: Surface> {
    cfg: LayoutConfig,
    state: LayoutState,
    surface: S,
    regions: HitTestRegistry,
    text: TextLog,
    stats: EngineStats,
}

impl<S: Surface> Engine<S> {
    /// Create an empty diagram on `surface` and draw the top line.
    pub fn new(cfg: LayoutConfig, surface: S) -> Self {
        let mut engine = Self {
            cfg,
            state: LayoutState::new(),
            surface,
            regions: HitTestRegistry::new(),
            text: TextLog::new(),
            stats: EngineStats::default(),
        };
        engine.draw_top_line();
        engine
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn regions(&self) -> &HitTestRegistry {
        &self.regions
    }

    pub fn text_log(&self) -> &TextLog {
        &self.text
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected
    }

    // ────────────────────────────────────────────────────────────────────
    // Command surface
    // ────────────────────────────────────────────────────────────────────

    /// Run one command. Returns the subject hit by a click, if any.
    pub fn apply(&mut self, cmd: &Command) -> Option<usize> {
        debug!(?cmd, "apply");
        match *cmd {
            Command::AddSubject => self.add_subject(),
            Command::AddStep => self.add_step(),
            Command::DeleteSubject => self.delete_subject(),
            Command::DeleteStep => self.delete_step(),
            Command::SoftReset => self.soft_reset(),
            Command::HardReset => self.hard_reset(),
            Command::Click { x, y } => return self.handle_click(x, y),
        }
        None
    }

    /// Append a subject with no steps and select it.
    pub fn add_subject(&mut self) {
        self.create_subject_box();
        self.state.total_extended_distance = sizing::total_extended_distance(&self.cfg, &self.state);
        if sizing::required_width(&self.cfg, self.state.total_extended_distance, self.surface.width())
            .is_some()
        {
            self.soft_reset();
        }
        self.check_invariants();
    }

    /// Append a step to the selected subject; no-op without a selection.
    pub fn add_step(&mut self) {
        let Some(subject) = self.state.selected else {
            debug!("add_step ignored: no subject selected");
            return;
        };
        if self.create_step_box(subject) {
            // later subjects shift right and the surface may have to grow
            self.soft_reset();
        }
        self.check_invariants();
    }

    /// Remove the selected subject; no-op when there are no subjects.
    pub fn delete_subject(&mut self) {
        let Some(removed) = self.state.remove_selected_subject() else {
            debug!("delete_subject ignored: nothing to delete");
            return;
        };
        debug!(removed, selected = ?self.state.selected, "subject removed");
        self.fit_surface();
        self.soft_reset();
        self.check_invariants();
    }

    /// Remove the last step of the selected subject; no-op when it has none.
    pub fn delete_step(&mut self) {
        if !self.state.remove_selected_step() {
            debug!("delete_step ignored: selected subject has no steps");
            return;
        }
        self.fit_surface();
        self.soft_reset();
        self.check_invariants();
    }

    /// Select the subject at `index`. Returns false if it does not exist.
    pub fn select_subject(&mut self, index: usize) -> bool {
        self.state.select(index)
    }

    /// Hit-test a click in surface coordinates and select what it hits.
    /// A click outside every region leaves the selection unchanged.
    pub fn handle_click(&mut self, x: f32, y: f32) -> Option<usize> {
        let hit = self.regions.hit(x, y);
        debug!(x, y, ?hit, "click");
        if let Some(subject) = hit {
            self.state.select(subject);
        }
        hit
    }

    /// Regenerate the picture, regions and labels from the step counts.
    pub fn soft_reset(&mut self) {
        self.stats.rebuilds += 1;
        let step_counts = self.state.step_counts();
        let selected = self.state.selected;
        info!(subjects = step_counts.len(), "soft reset");

        // Size the surface for the final state first: resizing wipes it, so
        // the replay below must run on the final surface.
        let total = self.replayed_total();
        if let Some(width) = sizing::required_width(&self.cfg, total, self.surface.width()) {
            info!(from = self.surface.width(), to = width, "growing surface");
            self.surface.resize_width(width);
            self.stats.surface_growths += 1;
        }

        self.surface.clear_all();
        self.regions.clear();
        self.text.clear();
        self.state.clear();

        for (subject, &count) in step_counts.iter().enumerate() {
            trace!(subject, steps = count, "replay");
            self.create_subject_box();
            for _ in 0..count {
                self.create_step_box(subject);
            }
        }

        self.state.selected = selected.filter(|&i| i < self.state.subject_count());
        self.state.total_extended_distance = sizing::total_extended_distance(&self.cfg, &self.state);
        self.draw_top_line();
        self.check_invariants();
    }

    /// Discard all state and restore the initial surface.
    pub fn hard_reset(&mut self) {
        info!("hard reset");
        self.stats.hard_resets += 1;
        self.state.clear();
        self.regions.clear();
        self.text.clear();
        if self.surface.width() != self.cfg.initial_width {
            self.surface.resize_width(self.cfg.initial_width);
        } else {
            self.surface.clear_all();
        }
        self.draw_top_line();
        self.check_invariants();
    }

    /// Outline the selected subject's box.
    pub fn highlight_selection(&mut self) {
        if let Some(subject) = self.state.selected {
            let rect = position::subject_box_rect(&self.cfg, &self.state, subject);
            self.surface.stroke_rect(rect);
        }
    }

    pub fn snapshot(&self) -> DiagramSnapshot {
        DiagramSnapshot {
            surface_width: self.surface.width(),
            surface_height: self.surface.height(),
            total_extended_distance: self.state.total_extended_distance,
            selected: self.state.selected,
            subjects: self
                .state
                .subjects
                .iter()
                .map(|s| SubjectSnapshot {
                    step_count: s.step_count,
                    extensions: s.extensions,
                    color: s.color.to_hex(),
                })
                .collect(),
            layout: position::layout_all(&self.cfg, &self.state),
            regions: self.regions.regions().to_vec(),
            text_runs: self.text.runs().to_vec(),
        }
    }

    /// Broken geometric invariants, as human-readable messages.
    ///
    /// Any entry here is a defect in the engine, not a user error.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut out = Vec::new();
        let cap = self.cfg.wrap_capacity;
        for (i, s) in self.state.subjects.iter().enumerate() {
            let want = expected_extensions(s.step_count, cap);
            if s.extensions != want {
                out.push(format!(
                    "subject {i}: {} extensions for {} steps, expected {want}",
                    s.extensions, s.step_count
                ));
            }
        }
        let boxes = self.state.subject_count() + self.state.total_steps();
        if self.regions.len() != boxes {
            out.push(format!("{} regions for {boxes} boxes", self.regions.len()));
        }
        if self.text.len() != boxes {
            out.push(format!("{} text runs for {boxes} boxes", self.text.len()));
        }
        let total = sizing::total_extended_distance(&self.cfg, &self.state);
        if total < 0.0 {
            out.push(format!("negative total width {total}"));
        }
        if (total - self.state.total_extended_distance).abs() > f32::EPSILON {
            out.push(format!(
                "total width drifted: stored {}, closed form {total}",
                self.state.total_extended_distance
            ));
        }
        if total > self.surface.width() {
            out.push(format!(
                "surface width {} smaller than content {total}",
                self.surface.width()
            ));
        }
        if let Some(sel) = self.state.selected {
            if sel >= self.state.subject_count() {
                out.push(format!("selection {sel} out of range"));
            }
        }
        out
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.invariant_violations().is_empty(),
            "layout invariants broken: {:?}",
            self.invariant_violations()
        );
    }

    // ────────────────────────────────────────────────────────────────────
    // Creation primitives (shared by incremental edits and replay)
    // ────────────────────────────────────────────────────────────────────

    /// Place and draw a new subject at the end of the row and select it.
    fn create_subject_box(&mut self) -> usize {
        let subject = self.state.push_subject();
        let cfg = &self.cfg;
        let rect = position::subject_box_rect(cfg, &self.state, subject);
        let color = self.state.subjects[subject].color;

        self.surface.fill_rect(
            rect.translate(cfg.shadow_offset, cfg.shadow_offset),
            FillStyle::translucent(color, cfg.shadow_alpha),
        );
        self.surface.fill_rect(rect, FillStyle::opaque(color));

        let mut path = Path::new();
        for seg in [
            position::top_line_connector(cfg, &self.state, subject),
            position::subject_branch_line(cfg, &self.state, subject),
            position::bottom_connector(cfg, &self.state, subject),
        ] {
            path.move_to(seg.from).line_to(seg.to);
        }
        self.surface.stroke_path(&path);

        self.regions.push(rect, subject);
        let run = self.text.persist(
            Font::serif(15.0),
            format!("Subject {subject}"),
            position::subject_label_position(cfg, rect.origin()),
        );
        self.surface.draw_text(run);
        subject
    }

    /// Place and draw the next step of `subject`. Returns true when the step
    /// opened a new extension lane.
    fn create_step_box(&mut self, subject: usize) -> bool {
        let ordinal = self.state.step_count(subject);
        let opens_lane = ordinal > 0 && ordinal % self.cfg.wrap_capacity == 0;
        if opens_lane {
            self.state.subjects[subject].extensions += 1;
            let lane = self.state.subjects[subject].extensions;
            let path = position::extension_lane_path(&self.cfg, &self.state, subject, lane);
            self.surface.stroke_path(&path);
            self.state.total_extended_distance =
                sizing::total_extended_distance(&self.cfg, &self.state);
        }
        debug_assert_eq!(
            position::step_lane(&self.cfg, ordinal),
            self.state.subjects[subject].extensions
        );

        let cfg = &self.cfg;
        let rect = position::step_box_rect(cfg, &self.state, subject, ordinal);
        let color = self.state.subjects[subject].color;
        let shadow_style = FillStyle::translucent(color, cfg.shadow_alpha);
        let shadow = rect.translate(cfg.shadow_offset, cfg.shadow_offset);

        let branch = position::step_branch_line(cfg, rect.origin());
        self.surface.stroke_path(&Path::line(branch.from, branch.to));

        self.surface.fill_rect(shadow, shadow_style);
        for cap in position::step_caps(cfg, shadow.origin()) {
            self.surface.fill_bezier(&cap, shadow_style);
        }
        for cap in position::step_caps(cfg, rect.origin()) {
            self.surface.fill_bezier(&cap, FillStyle::opaque(color));
        }
        self.surface.fill_rect(rect, FillStyle::opaque(color));

        self.regions.push(rect, subject);
        let run = self.text.persist(
            Font::serif(12.0),
            format!("Step {ordinal}"),
            position::step_label_position(cfg, rect.origin()),
        );
        self.surface.draw_text(run);

        self.state.subjects[subject].step_count += 1;
        opens_lane
    }

    fn draw_top_line(&mut self) {
        let seg = position::top_line(&self.cfg, &self.state, self.surface.width());
        self.surface.stroke_path(&Path::line(seg.from, seg.to));
    }

    /// Total width the diagram will have once replayed from its step counts.
    /// Stored extension counts may be stale after a delete, so they are not
    /// consulted.
    fn replayed_total(&self) -> f32 {
        let extensions: usize = self
            .state
            .subjects
            .iter()
            .map(|s| expected_extensions(s.step_count, self.cfg.wrap_capacity))
            .sum();
        sizing::total_extended_distance_for(&self.cfg, self.state.subject_count(), extensions)
    }

    /// Resize the surface to fit the current state after a delete.
    fn fit_surface(&mut self) {
        let total = self.replayed_total();
        let width = sizing::fitted_width(&self.cfg, total);
        if width != self.surface.width() {
            debug!(from = self.surface.width(), to = width, "fitting surface");
            self.surface.resize_width(width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::surface::RecordingSurface;

    fn engine() -> Engine<RecordingSurface> {
        let cfg = LayoutConfig::default();
        let surface = RecordingSurface::new(cfg.initial_width, cfg.initial_height);
        Engine::new(cfg, surface)
    }

    #[test]
    fn test_new_draws_top_line() {
        let e = engine();
        assert_eq!(e.surface().commands().len(), 1);
        assert!(e.state().subjects.is_empty());
        assert!(e.invariant_violations().is_empty());
    }

    #[test]
    fn test_add_step_without_subject_is_noop() {
        let mut e = engine();
        e.add_step();
        assert_eq!(e.state().total_steps(), 0);
        assert!(e.regions().is_empty());
    }

    #[test]
    fn test_add_subject_places_box_and_label() {
        let mut e = engine();
        e.add_subject();
        assert_eq!(e.selected(), Some(0));
        assert_eq!(e.regions().len(), 1);
        assert_eq!(e.regions().regions()[0].rect.origin(), Point::new(30.0, 25.0));
        let run = &e.text_log().runs()[0];
        assert_eq!(run.text, "Subject 0");
        assert_eq!(run.font.to_string(), "15px serif");
        assert_eq!(run.position, Point::new(35.0, 42.5));
        assert_eq!(e.state().total_extended_distance, 145.0);
        assert_eq!(e.stats().rebuilds, 0);
    }

    #[test]
    fn test_step_label_and_region() {
        let mut e = engine();
        e.add_subject();
        e.add_step();
        let region = e.regions().regions()[1];
        assert_eq!(region.subject, 0);
        assert_eq!(region.rect.origin(), Point::new(75.0, 80.0));
        assert_eq!(e.text_log().runs()[1].text, "Step 0");
        assert_eq!(e.text_log().runs()[1].position, Point::new(79.0, 95.0));
    }

    #[test]
    fn test_extension_triggers_rebuild() {
        let mut e = engine();
        e.add_subject();
        for _ in 0..8 {
            e.add_step();
        }
        assert_eq!(e.stats().rebuilds, 0);
        e.add_step();
        assert_eq!(e.stats().rebuilds, 1);
        assert_eq!(e.state().extensions(0), 1);
    }

    #[test]
    fn test_delete_step_shrinks_extension() {
        let mut e = engine();
        e.add_subject();
        for _ in 0..9 {
            e.add_step();
        }
        e.delete_step();
        assert_eq!(e.state().step_count(0), 8);
        assert_eq!(e.state().extensions(0), 0);
        assert!(e.invariant_violations().is_empty());
    }

    #[test]
    fn test_delete_step_fits_surface_without_removed_lane() {
        let mut e = engine();
        e.add_subject();
        e.add_subject();
        for _ in 0..9 {
            e.add_step();
        }
        assert_eq!(e.surface().width(), 395.0);
        e.delete_step();
        assert_eq!(e.state().total_extended_distance, 255.0);
        assert_eq!(e.surface().width(), 285.0);
    }

    #[test]
    fn test_resets_keep_invariants() {
        let mut e = engine();
        e.add_subject();
        for _ in 0..17 {
            e.add_step();
        }
        e.soft_reset();
        assert!(e.invariant_violations().is_empty());
        e.hard_reset();
        assert!(e.invariant_violations().is_empty());
    }

    #[test]
    fn test_hard_reset_restores_initial_width() {
        let mut e = engine();
        for _ in 0..3 {
            e.add_subject();
        }
        assert!(e.surface().width() > 200.0);
        e.hard_reset();
        assert_eq!(e.surface().width(), 200.0);
        assert_eq!(e.selected(), None);
        assert!(e.regions().is_empty());
        assert!(e.text_log().is_empty());
        assert_eq!(e.state().total_extended_distance, 0.0);
        assert_eq!(e.surface().commands().len(), 1);
    }

    #[test]
    fn test_highlight_strokes_selected_box() {
        let mut e = engine();
        e.add_subject();
        e.highlight_selection();
        assert!(matches!(
            e.surface().commands().last(),
            Some(crate::surface::DrawCommand::StrokeRect { .. })
        ));
    }
}
