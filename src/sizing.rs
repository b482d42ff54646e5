//! Surface sizing.
//!
//! The total horizontal extent of a diagram has a closed form in terms of the
//! subject count and the extension lanes; see [`crate::config`].

use crate::config::LayoutConfig;
use crate::state::LayoutState;

/// Closed-form width of a diagram with `subjects` subjects and
/// `extensions` extension lanes in total. An empty diagram has no extent.
pub fn total_extended_distance_for(cfg: &LayoutConfig, subjects: usize, extensions: usize) -> f32 {
    if subjects == 0 {
        return 0.0;
    }
    let n = subjects as f32;
    n * cfg.subject_section_width()
        + (n - 1.0) * cfg.subject_spacing_delta()
        + cfg.step_section_width()
        + extensions as f32 * cfg.extended_step_section_width()
}

pub fn total_extended_distance(cfg: &LayoutConfig, state: &LayoutState) -> f32 {
    total_extended_distance_for(cfg, state.subject_count(), state.total_extensions())
}

/// Width the surface has to grow to, if `total` no longer fits in `current`.
pub fn required_width(cfg: &LayoutConfig, total: f32, current: f32) -> Option<f32> {
    (total > current).then(|| total + cfg.growth_margin())
}

/// Width that fits `total` without dropping below the initial width.
pub fn fitted_width(cfg: &LayoutConfig, total: f32) -> f32 {
    if total > cfg.initial_width {
        total + cfg.growth_margin()
    } else {
        cfg.initial_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_form() {
        let cfg = LayoutConfig::default();
        assert_eq!(total_extended_distance_for(&cfg, 0, 0), 0.0);
        assert_eq!(total_extended_distance_for(&cfg, 1, 0), 145.0);
        assert_eq!(total_extended_distance_for(&cfg, 2, 0), 255.0);
        assert_eq!(total_extended_distance_for(&cfg, 2, 3), 585.0);
    }

    #[test]
    fn test_required_width() {
        let cfg = LayoutConfig::default();
        assert_eq!(required_width(&cfg, 145.0, 200.0), None);
        assert_eq!(required_width(&cfg, 200.0, 200.0), None);
        assert_eq!(required_width(&cfg, 255.0, 200.0), Some(285.0));
    }

    #[test]
    fn test_fitted_width_never_below_initial() {
        let cfg = LayoutConfig::default();
        assert_eq!(fitted_width(&cfg, 145.0), 200.0);
        assert_eq!(fitted_width(&cfg, 365.0), 395.0);
    }
}
