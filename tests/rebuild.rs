mod common;

use branchline::command::{Command, parse_script};
use branchline::surface::Surface;
use common::{build, engine, sorted_regions, sorted_texts};

#[test]
fn soft_reset_matches_incremental_build() {
    let mut e = build(&[3, 9, 0, 17]);
    // steps added out of subject order
    e.select_subject(0);
    e.add_step();
    e.select_subject(2);
    e.add_step();

    let before = e.snapshot();
    e.soft_reset();
    let after = e.snapshot();

    assert_eq!(before.subjects, after.subjects);
    assert_eq!(before.layout, after.layout);
    assert_eq!(before.selected, after.selected);
    assert_eq!(before.total_extended_distance, after.total_extended_distance);
    assert_eq!(sorted_regions(&before.regions), sorted_regions(&after.regions));
    assert_eq!(sorted_texts(&before.text_runs), sorted_texts(&after.text_runs));
}

#[test]
fn soft_reset_is_idempotent() {
    let mut e = build(&[4, 12]);
    e.soft_reset();
    let first = e.snapshot();
    let commands = e.surface().commands().to_vec();
    e.soft_reset();
    assert_eq!(e.snapshot(), first);
    assert_eq!(e.surface().commands(), commands.as_slice());
}

#[test]
fn replay_reproduces_stepwise_diagram_from_counts() {
    let incremental = build(&[5, 0, 11]);

    let mut replayed = engine();
    let script = "add-subject 3\nclick 40 30\nadd-step 5\nclick 260 30\nadd-step 11\n";
    for cmd in parse_script(script).unwrap() {
        replayed.apply(&cmd);
    }
    replayed.apply(&Command::SoftReset);

    let a = incremental.snapshot();
    let b = replayed.snapshot();
    assert_eq!(a.subjects, b.subjects);
    assert_eq!(a.layout, b.layout);
    assert_eq!(sorted_regions(&a.regions), sorted_regions(&b.regions));
}

#[test]
fn text_runs_follow_creation_order_after_rebuild() {
    let mut e = build(&[2, 1]);
    e.soft_reset();
    let labels: Vec<&str> = e.text_log().runs().iter().map(|r| r.text.as_str()).collect();
    assert_eq!(labels, vec!["Subject 0", "Step 0", "Step 1", "Subject 1", "Step 0"]);
    // and they were drawn in that order
    let drawn: Vec<&str> = e.surface().texts().map(|r| r.text.as_str()).collect();
    assert_eq!(drawn, labels);
}

#[test]
fn hard_reset_discards_everything() {
    let mut e = build(&[9, 9]);
    e.hard_reset();
    assert_eq!(e.state().subject_count(), 0);
    assert_eq!(e.selected(), None);
    assert!(e.regions().is_empty());
    assert!(e.text_log().is_empty());
    assert_eq!(e.surface().width(), e.config().initial_width);
    assert_eq!(e.stats().hard_resets, 1);

    // the diagram starts over from subject 0
    e.add_subject();
    assert_eq!(e.text_log().runs()[0].text, "Subject 0");
    assert!(e.invariant_violations().is_empty());
}

#[test]
fn soft_reset_of_empty_diagram() {
    let mut e = engine();
    e.soft_reset();
    assert!(e.regions().is_empty());
    assert_eq!(e.surface().commands().len(), 1);
    assert!(e.invariant_violations().is_empty());
}
