//! Position calculator.
//!
//! Pure functions from ([`LayoutConfig`], [`LayoutState`], indices) to pixel
//! geometry. Nothing here caches; every caller recomputes from the current
//! state, which is what keeps incremental drawing and a full rebuild in
//! agreement.
//!
//! Horizontal layout of subject `i`:
//!
//! ```text
//! margin | branch | spacing * i | lanes of subjects 0..i | subject box
//!                                                         \_ step column, then one lane per extension
//! ```

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::geometry::{Bezier, Path, Point, Rect, Segment};
use crate::state::LayoutState;

/// Shift caused by the extension lanes of all subjects before `subject`.
/// A subject's own lanes never move its own base.
pub fn cumulative_extension_offset(cfg: &LayoutConfig, state: &LayoutState, subject: usize) -> f32 {
    let lanes: usize = state
        .subjects
        .iter()
        .take(subject)
        .map(|s| s.extensions)
        .sum();
    lanes as f32 * cfg.extended_step_section_width()
}

/// X of the junction where the subject's top connector meets its row.
fn subject_junction_x(cfg: &LayoutConfig, state: &LayoutState, subject: usize) -> f32 {
    cfg.subject_left_margin()
        + cfg.subject_spacing() * subject as f32
        + cumulative_extension_offset(cfg, state, subject)
}

pub fn subject_box_origin(cfg: &LayoutConfig, state: &LayoutState, subject: usize) -> Point {
    Point::new(
        subject_junction_x(cfg, state, subject) + cfg.branch_line,
        cfg.subject_row_top() - cfg.subject_box.height / 2.0,
    )
}

pub fn subject_box_rect(cfg: &LayoutConfig, state: &LayoutState, subject: usize) -> Rect {
    Rect::from_origin(
        subject_box_origin(cfg, state, subject),
        cfg.subject_box.width,
        cfg.subject_box.height,
    )
}

/// Extension lane a step lands in; equals the subject's extension count at
/// the moment the step is placed.
pub fn step_lane(cfg: &LayoutConfig, ordinal: usize) -> usize {
    ordinal / cfg.wrap_capacity
}

/// Row within its lane; rows cycle once a subject has wrapped.
pub fn step_row(cfg: &LayoutConfig, ordinal: usize) -> usize {
    ordinal % cfg.wrap_capacity
}

/// X of the vertical connector feeding lane `lane` of `subject`.
fn lane_x(cfg: &LayoutConfig, state: &LayoutState, subject: usize, lane: usize) -> f32 {
    subject_junction_x(cfg, state, subject)
        + cfg.branch_line
        + cfg.subject_box.width / 2.0
        + lane as f32 * cfg.extended_step_section_width()
}

pub fn step_box_origin(
    cfg: &LayoutConfig,
    state: &LayoutState,
    subject: usize,
    ordinal: usize,
) -> Point {
    let lane = step_lane(cfg, ordinal);
    Point::new(
        lane_x(cfg, state, subject, lane) + cfg.branch_line,
        cfg.step_row_base() + step_row(cfg, ordinal) as f32 * cfg.step_row_height(),
    )
}

pub fn step_box_rect(cfg: &LayoutConfig, state: &LayoutState, subject: usize, ordinal: usize) -> Rect {
    Rect::from_origin(
        step_box_origin(cfg, state, subject, ordinal),
        cfg.step_box.width,
        cfg.step_box.height,
    )
}

/// Vertical drop from the top line into the subject row.
pub fn top_line_connector(cfg: &LayoutConfig, state: &LayoutState, subject: usize) -> Segment {
    let shift = cfg.subject_spacing() * subject as f32 + cumulative_extension_offset(cfg, state, subject);
    Segment::new(
        Point::new(cfg.subject_left_margin() + shift, cfg.subject_row_top()),
        Point::new(cfg.buffer + cfg.branch_line + shift, cfg.buffer),
    )
}

/// Short horizontal line from the top connector into the subject box.
pub fn subject_branch_line(cfg: &LayoutConfig, state: &LayoutState, subject: usize) -> Segment {
    let from = Point::new(subject_junction_x(cfg, state, subject), cfg.subject_row_top());
    Segment::new(from, from.offset(cfg.branch_line, 0.0))
}

/// Vertical line from the bottom centre of the subject box to the bottom of
/// the initial surface; step branch lines hang off it.
pub fn bottom_connector(cfg: &LayoutConfig, state: &LayoutState, subject: usize) -> Segment {
    let rect = subject_box_rect(cfg, state, subject);
    let x = rect.left + rect.width / 2.0;
    Segment::new(Point::new(x, rect.bottom()), Point::new(x, cfg.initial_height))
}

/// Horizontal line joining a step box to its lane connector.
pub fn step_branch_line(cfg: &LayoutConfig, step_origin: Point) -> Segment {
    // -2 aligns the line with the box's visual centre
    let y = step_origin.y + (cfg.subject_box.height / 2.0).ceil() - 2.0;
    Segment::new(
        Point::new(step_origin.x - cfg.branch_line, y),
        Point::new(step_origin.x, y),
    )
}

/// Connector drawn when `subject` opens lane `lane` (1-based): across from
/// the previous lane at the bottom of the subject row, then down.
pub fn extension_lane_path(cfg: &LayoutConfig, state: &LayoutState, subject: usize, lane: usize) -> Path {
    let y = cfg.subject_row_top() + cfg.subject_box.height;
    let from_x = lane_x(cfg, state, subject, lane.saturating_sub(1));
    let to_x = lane_x(cfg, state, subject, lane);
    let mut path = Path::new();
    path.move_to(Point::new(from_x, y))
        .line_to(Point::new(to_x, y))
        .line_to(Point::new(to_x, cfg.initial_height));
    path
}

/// The horizontal line every subject hangs from.
pub fn top_line(cfg: &LayoutConfig, state: &LayoutState, surface_width: f32) -> Segment {
    let end_x = if cfg.initial_width > state.total_extended_distance {
        surface_width
    } else {
        state.total_extended_distance + cfg.buffer * 2.0
    };
    Segment::new(
        Point::new(cfg.buffer, cfg.buffer),
        Point::new(end_x, cfg.buffer),
    )
}

/// Left and right rounded caps of a step box anchored at `origin`.
pub fn step_caps(cfg: &LayoutConfig, origin: Point) -> [Bezier; 2] {
    let dims = cfg.step_box;
    let cap = |x: f32, control: f32| Bezier {
        start: Point::new(x, origin.y),
        control1: Point::new(x, origin.y),
        control2: Point::new(x + control, origin.y + dims.height / 2.0),
        end: Point::new(x, origin.y + dims.height),
    };
    [
        cap(origin.x, -dims.bezier_control),
        cap(origin.x + dims.width, dims.bezier_control),
    ]
}

pub fn subject_label_position(cfg: &LayoutConfig, origin: Point) -> Point {
    origin.offset(5.0, cfg.subject_box.width / 4.0)
}

pub fn step_label_position(cfg: &LayoutConfig, origin: Point) -> Point {
    origin.offset(4.0, cfg.step_box.width / 6.0)
}

/// Box geometry of one subject and its steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectLayout {
    pub subject_box: Rect,
    pub steps: Vec<Rect>,
}

/// Every box of the diagram, computed straight from the state.
pub fn layout_all(cfg: &LayoutConfig, state: &LayoutState) -> Vec<SubjectLayout> {
    (0..state.subject_count())
        .map(|i| SubjectLayout {
            subject_box: subject_box_rect(cfg, state, i),
            steps: (0..state.step_count(i))
                .map(|k| step_box_rect(cfg, state, i, k))
                .collect(),
        })
        .collect()
}
