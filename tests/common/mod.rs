#![allow(dead_code)]

use std::cmp::Ordering;

use branchline::config::LayoutConfig;
use branchline::engine::Engine;
use branchline::hit_test::ClickableRegion;
use branchline::surface::RecordingSurface;
use branchline::text::TextRun;

pub fn engine() -> Engine<RecordingSurface> {
    engine_with(LayoutConfig::default())
}

pub fn engine_with(cfg: LayoutConfig) -> Engine<RecordingSurface> {
    let surface = RecordingSurface::new(cfg.initial_width, cfg.initial_height);
    Engine::new(cfg, surface)
}

/// Build a diagram by adding subjects and their steps one after another.
pub fn build(steps: &[usize]) -> Engine<RecordingSurface> {
    let mut e = engine();
    for &n in steps {
        e.add_subject();
        for _ in 0..n {
            e.add_step();
        }
    }
    e
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Regions in a canonical order so that draw order does not matter.
pub fn sorted_regions(regions: &[ClickableRegion]) -> Vec<ClickableRegion> {
    let mut out = regions.to_vec();
    out.sort_by(|a, b| {
        a.subject
            .cmp(&b.subject)
            .then(cmp_f32(a.rect.left, b.rect.left))
            .then(cmp_f32(a.rect.top, b.rect.top))
    });
    out
}

pub fn sorted_texts(runs: &[TextRun]) -> Vec<TextRun> {
    let mut out = runs.to_vec();
    out.sort_by(|a, b| {
        cmp_f32(a.position.x, b.position.x)
            .then(cmp_f32(a.position.y, b.position.y))
            .then(a.text.cmp(&b.text))
    });
    out
}
