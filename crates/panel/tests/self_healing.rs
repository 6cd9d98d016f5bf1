//! The host may discard any subtree — including the anchor and the control
//! inside it — at any time, with no removal notification beyond "something
//! changed". Presence-based detection has to heal all of it.

mod common;

use common::{control, controls, marker_present, render_host, session};

#[test]
fn full_rerender_recreates_exactly_one_control() {
    let mut session = session();
    session.start();
    let grid = render_host(session.document_mut());
    session.pump();
    let first = control(session.document());

    // Host tears the whole app subtree down and renders an equivalent one.
    session.document_mut().remove_subtree(grid).unwrap();
    session.pump();
    assert!(controls(session.document()).is_empty());

    render_host(session.document_mut());
    session.pump();

    let second = control(session.document());
    assert_ne!(first, second);
    assert!(!session.document().is_live(first));
}

#[test]
fn anchor_gone_means_inert_not_broken() {
    let mut session = session();
    session.start();
    let grid = render_host(session.document_mut());
    session.pump();
    control(session.document());

    session.document_mut().remove_subtree(grid).unwrap();
    // Many cycles with no anchor: nothing to do, nothing to break.
    for _ in 0..5 {
        session.pump();
        session.advance(500);
    }
    assert!(controls(session.document()).is_empty());
}

#[test]
fn collapsed_state_survives_a_host_rerender() {
    let mut session = session();
    session.start();
    let grid = render_host(session.document_mut());
    session.pump();
    let ctl = control(session.document());

    session.click(ctl);
    assert!(marker_present(session.document()));

    session.document_mut().remove_subtree(grid).unwrap();
    render_host(session.document_mut());
    session.pump();

    // The fresh control paints straight into the collapsed representation.
    let ctl = control(session.document());
    assert!(marker_present(session.document()));
    assert_eq!(session.document().attr(ctl, "title"), Some("Expand panel"));
    assert!(session.collapsed());
}

#[test]
fn rerender_during_one_batch_is_healed_by_one_pass() {
    let mut session = session();
    session.start();
    let grid = render_host(session.document_mut());
    session.pump();
    control(session.document());

    // Teardown and rebuild land in the same batch before the next pump;
    // the coalesced pass must still converge to exactly one control.
    session.document_mut().remove_subtree(grid).unwrap();
    render_host(session.document_mut());
    session.pump();

    control(session.document());
}
