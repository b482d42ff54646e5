//! Abstract diagram state: subjects, their step counts, extension lanes and
//! the current selection.
//!
//! Subjects are identified by position. Deleting a subject shifts every later
//! subject one index to the left; nothing in this crate holds an index across
//! a delete.

use serde::{Deserialize, Serialize};

use crate::color::{Rgb, subject_color};

/// Per-subject bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectState {
    pub step_count: usize,
    /// Number of extension lanes spawned so far.
    pub extensions: usize,
    pub color: Rgb,
}

impl SubjectState {
    pub fn new(index: usize) -> Self {
        Self {
            step_count: 0,
            extensions: 0,
            color: subject_color(index),
        }
    }
}

/// Lanes a subject with `step_count` steps occupies beyond its first one.
pub fn expected_extensions(step_count: usize, wrap_capacity: usize) -> usize {
    step_count.saturating_sub(1) / wrap_capacity
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutState {
    pub subjects: Vec<SubjectState>,
    pub selected: Option<usize>,
    /// Horizontal space consumed by the laid-out diagram; always recomputed
    /// from `subjects`, never adjusted in place.
    pub total_extended_distance: f32,
}

impl LayoutState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject_count(&self) -> usize {
        self.subjects.len()
    }

    pub fn step_counts(&self) -> Vec<usize> {
        self.subjects.iter().map(|s| s.step_count).collect()
    }

    pub fn total_steps(&self) -> usize {
        self.subjects.iter().map(|s| s.step_count).sum()
    }

    pub fn total_extensions(&self) -> usize {
        self.subjects.iter().map(|s| s.extensions).sum()
    }

    pub fn extensions(&self, subject: usize) -> usize {
        self.subjects.get(subject).map_or(0, |s| s.extensions)
    }

    pub fn step_count(&self, subject: usize) -> usize {
        self.subjects.get(subject).map_or(0, |s| s.step_count)
    }

    pub fn selected_subject(&self) -> Option<&SubjectState> {
        self.selected.and_then(|i| self.subjects.get(i))
    }

    /// Append a subject with no steps and select it. Returns its index.
    pub fn push_subject(&mut self) -> usize {
        let index = self.subjects.len();
        self.subjects.push(SubjectState::new(index));
        self.selected = Some(index);
        index
    }

    /// Select `index` if it names an existing subject.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.subjects.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    /// Remove the selected subject and pick its successor selection.
    ///
    /// When the removed subject was the last one the new last subject is
    /// selected, otherwise the selection moves one step to the left
    /// (stopping at 0). Returns the removed subject's index.
    pub fn remove_selected_subject(&mut self) -> Option<usize> {
        let index = self.selected?;
        if index >= self.subjects.len() {
            return None;
        }
        self.subjects.remove(index);
        let remaining = self.subjects.len();
        self.selected = if remaining == 0 {
            None
        } else if index >= remaining {
            Some(remaining - 1)
        } else {
            Some(index.saturating_sub(1))
        };
        Some(index)
    }

    /// Decrement the selected subject's step count. Returns false when there
    /// is no selection or it has no steps.
    pub fn remove_selected_step(&mut self) -> bool {
        let Some(index) = self.selected else {
            return false;
        };
        match self.subjects.get_mut(index) {
            Some(subject) if subject.step_count > 0 => {
                subject.step_count -= 1;
                true
            }
            _ => false,
        }
    }

    /// Drop every subject and the selection.
    pub fn clear(&mut self) {
        self.subjects.clear();
        self.selected = None;
        self.total_extended_distance = 0.0;
    }
}
