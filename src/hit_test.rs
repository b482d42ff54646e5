//! Clickable regions and point hit-testing.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// A rectangle that selects `subject` when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickableRegion {
    pub rect: Rect,
    pub subject: usize,
}

/// Regions in the order their boxes were drawn.
///
/// The registry is only ever appended to or cleared wholesale; a rebuild
/// regenerates it from scratch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitTestRegistry {
    regions: Vec<ClickableRegion>,
}

impl HitTestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rect: Rect, subject: usize) {
        self.regions.push(ClickableRegion { rect, subject });
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> &[ClickableRegion] {
        &self.regions
    }

    /// Subject selected by a click at (x, y).
    ///
    /// Every region is tested and the last match wins, mirroring draw order
    /// where later boxes sit on top.
    pub fn hit(&self, x: f32, y: f32) -> Option<usize> {
        self.regions
            .iter()
            .filter(|r| r.rect.contains(x, y))
            .last()
            .map(|r| r.subject)
    }

    /// Number of regions tagged with `subject`.
    pub fn count_for(&self, subject: usize) -> usize {
        self.regions.iter().filter(|r| r.subject == subject).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_inside_and_outside() {
        let mut reg = HitTestRegistry::new();
        reg.push(Rect::new(0.0, 0.0, 10.0, 10.0), 0);
        reg.push(Rect::new(20.0, 0.0, 10.0, 10.0), 1);
        assert_eq!(reg.hit(5.0, 5.0), Some(0));
        assert_eq!(reg.hit(25.0, 5.0), Some(1));
        assert_eq!(reg.hit(15.0, 5.0), None);
        assert_eq!(reg.hit(10.0, 5.0), None);
    }

    #[test]
    fn test_overlap_last_wins() {
        let mut reg = HitTestRegistry::new();
        reg.push(Rect::new(0.0, 0.0, 10.0, 10.0), 0);
        reg.push(Rect::new(5.0, 5.0, 10.0, 10.0), 3);
        assert_eq!(reg.hit(7.0, 7.0), Some(3));
    }

    #[test]
    fn test_clear() {
        let mut reg = HitTestRegistry::new();
        reg.push(Rect::new(0.0, 0.0, 10.0, 10.0), 0);
        reg.push(Rect::new(0.0, 20.0, 10.0, 10.0), 0);
        assert_eq!(reg.count_for(0), 2);
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.hit(5.0, 5.0), None);
    }
}
