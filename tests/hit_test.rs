mod common;

use branchline::command::Command;
use common::build;

#[test]
fn click_inside_every_box_selects_its_subject() {
    let mut e = build(&[3, 9, 1]);
    let regions = e.regions().regions().to_vec();
    for region in regions {
        let c = region.rect.center();
        assert_eq!(e.handle_click(c.x, c.y), Some(region.subject));
        assert_eq!(e.selected(), Some(region.subject));
    }
}

#[test]
fn click_outside_leaves_selection() {
    let mut e = build(&[1, 1]);
    e.select_subject(0);
    assert_eq!(e.handle_click(1.0, 1.0), None);
    assert_eq!(e.selected(), Some(0));
    // exactly on a border is outside
    let r = e.regions().regions()[0].rect;
    assert_eq!(e.handle_click(r.left, r.top + 1.0), None);
}

#[test]
fn click_then_add_step_targets_clicked_subject() {
    let mut e = build(&[0, 0]);
    let first = e.regions().regions()[0].rect.center();
    assert_eq!(e.apply(&Command::Click { x: first.x, y: first.y }), Some(0));
    e.apply(&Command::AddStep);
    assert_eq!(e.state().step_counts(), vec![1, 0]);
}

#[test]
fn stale_regions_do_not_survive_delete() {
    let mut e = build(&[0, 0, 0]);
    let last = e.regions().regions()[2].rect.center();
    e.delete_subject();
    assert_eq!(e.handle_click(last.x, last.y), None);
    assert!(e.regions().regions().iter().all(|r| r.subject < 2));
}
