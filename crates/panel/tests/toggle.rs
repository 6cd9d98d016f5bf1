//! Flag, marker, and control visuals move in lockstep through any toggle
//! sequence.

mod common;

use common::{control, control_label, marker_present, render_host, session, session_with};
use prefs::PrefStore;

#[test]
fn click_on_the_control_toggles_marker_and_visuals() {
    let mut session = session();
    session.start();
    render_host(session.document_mut());
    session.pump();
    let ctl = control(session.document());

    session.click(ctl);
    assert!(session.collapsed());
    assert!(marker_present(session.document()));
    assert_eq!(control_label(session.document(), ctl), "➡");
    assert_eq!(session.document().attr(ctl, "title"), Some("Expand panel"));

    session.click(ctl);
    assert!(!session.collapsed());
    assert!(!marker_present(session.document()));
    assert_eq!(control_label(session.document(), ctl), "⬅");
    assert_eq!(session.document().attr(ctl, "title"), Some("Slim panel"));
}

#[test]
fn click_on_the_control_label_counts_as_a_hit() {
    let mut session = session();
    session.start();
    render_host(session.document_mut());
    session.pump();
    let ctl = control(session.document());
    let label = session.document().children(ctl)[0];

    session.click(label);
    assert!(session.collapsed());
}

#[test]
fn clicks_anywhere_else_are_the_hosts_business() {
    let mut session = session();
    session.start();
    render_host(session.document_mut());
    session.pump();

    let body = session.document().body();
    session.click(body);
    assert!(!session.collapsed());
}

#[test]
fn every_prefix_of_a_toggle_sequence_is_consistent() {
    let mut session = session();
    session.start();
    render_host(session.document_mut());
    session.pump();
    let ctl = control(session.document());

    let mut expected = false;
    for _ in 0..7 {
        session.click(ctl);
        session.pump();
        expected = !expected;

        assert_eq!(session.collapsed(), expected);
        assert_eq!(marker_present(session.document()), expected);
        let want = if expected { "➡" } else { "⬅" };
        assert_eq!(control_label(session.document(), ctl), want);
    }
}

#[test]
fn toggle_involution_restores_the_persisted_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");

    let mut session = session_with(PrefStore::open(&path));
    session.start();
    render_host(session.document_mut());
    session.pump();
    let ctl = control(session.document());

    session.click(ctl);
    assert!(PrefStore::open(&path).get_bool("side_panel_collapsed", false));

    session.click(ctl);
    assert!(!PrefStore::open(&path).get_bool("side_panel_collapsed", true));
}

#[test]
fn toggling_before_the_control_exists_still_moves_the_marker() {
    let mut session = session();
    session.start();

    // No host render yet; a hit can only come from the host's own code,
    // but the layout controller must stay consistent regardless.
    assert!(session.document().element_by_id("slim-toggle").is_none());
    let body = session.document().body();
    session.click(body);
    assert!(!session.collapsed());
    assert!(!marker_present(session.document()));
}
