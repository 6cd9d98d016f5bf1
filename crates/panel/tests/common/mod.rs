#![allow(dead_code)]

use dom::{Document, NodeId};
use panel::{PanelConfig, Session};
use prefs::PrefStore;
use query::{Selector, query_all};

pub fn session_with(prefs: PrefStore) -> Session {
    let resolved = PanelConfig::default().resolve().unwrap();
    Session::new(Document::new(), resolved, prefs)
}

pub fn session() -> Session {
    session_with(PrefStore::in_memory())
}

/// Render the host's first frame under `body`:
///
/// ```text
/// <div class="app-grid x7a">
///   <div class="side-panel q2f">
///     <header data-role="nav"><div><div/><div/></div></header>
///     <div role="search"/>
///   </div>
///   <div class="chat"/>
/// </div>
/// ```
///
/// Returns the grid root, so a re-render can drop the whole thing at once.
pub fn render_host(doc: &mut Document) -> NodeId {
    let grid = doc.create_element("div");
    doc.set_attr(grid, "class", Some("app-grid x7a"));

    let side = doc.create_element("div");
    doc.set_attr(side, "class", Some("side-panel q2f"));

    let header = doc.create_element("header");
    doc.set_attr(header, "data-role", Some("nav"));
    let row = doc.create_element("div");
    let slot = doc.create_element("div");
    let other = doc.create_element("div");
    doc.append_child(row, slot).unwrap();
    doc.append_child(row, other).unwrap();
    doc.append_child(header, row).unwrap();

    let search = doc.create_element("div");
    doc.set_attr(search, "role", Some("search"));

    let chat = doc.create_element("div");
    doc.set_attr(chat, "class", Some("chat"));

    doc.append_child(side, header).unwrap();
    doc.append_child(side, search).unwrap();
    doc.append_child(grid, side).unwrap();
    doc.append_child(grid, chat).unwrap();
    doc.append_child(doc.body(), grid).unwrap();
    grid
}

pub fn controls(doc: &Document) -> Vec<NodeId> {
    query_all(doc, &Selector::parse("#slim-toggle").unwrap())
}

pub fn control(doc: &Document) -> NodeId {
    let found = controls(doc);
    assert_eq!(found.len(), 1, "expected exactly one control");
    found[0]
}

pub fn marker_present(doc: &Document) -> bool {
    doc.has_class(doc.body(), "side-panel-collapsed")
}

pub fn control_label<'d>(doc: &'d Document, control: NodeId) -> &'d str {
    doc.children(control)
        .iter()
        .copied()
        .find_map(|c| doc.text(c))
        .unwrap_or("")
}
