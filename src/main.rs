use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use dom::{Document, NodeId, outline::outline};
use panel::{PanelConfig, Session, load_config};
use prefs::PrefStore;
use std::path::Path;
use std::process::ExitCode;

// Scripted demo: a simulated host that renders late, gets toggled, and
// re-renders over the control, followed by a simulated reload. The host
// markup matches the default selectors; pass a TOML config path to try
// other settings against it.
fn main() -> ExitCode {
    env_logger::init();

    let cfg = match std::env::args().nth(1) {
        Some(path) => match load_config(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(err) => {
                eprintln!("slimbar: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => PanelConfig::default(),
    };
    let resolved = match cfg.resolve() {
        Ok(resolved) => resolved,
        Err(err) => {
            eprintln!("slimbar: {err}");
            return ExitCode::FAILURE;
        }
    };

    let prefs_path = std::env::temp_dir().join("slimbar-demo").join("prefs.json");
    // Start every demo run from a clean slate.
    let _ = std::fs::remove_file(&prefs_path);

    let mut session = Session::new(Document::new(), resolved.clone(), PrefStore::open(&prefs_path));
    session.start();
    dump("startup, host not rendered yet", &session);

    render_host(session.document_mut());
    session.pump();
    dump("host rendered its first frame", &session);

    if let Some(ctl) = session.document().element_by_id("slim-toggle") {
        session.click(ctl);
        dump("user clicked the toggle", &session);
    }

    if let Some(grid) = first_grid(session.document()) {
        session.document_mut().remove_subtree(grid).ok();
        render_host(session.document_mut());
        session.pump();
        dump("host re-rendered over the control", &session);
    }

    drop(session);
    let mut session = Session::new(Document::new(), resolved, PrefStore::open(&prefs_path));
    session.start();
    render_host(session.document_mut());
    session.advance(1100);
    dump("after reload, restored from the preference store", &session);

    ExitCode::SUCCESS
}

fn dump(step: &str, session: &Session) {
    println!("== {step} (collapsed: {})", session.collapsed());
    for line in outline(session.document(), session.document().body(), 40) {
        println!("   {line}");
    }
    println!();
}

fn first_grid(doc: &Document) -> Option<NodeId> {
    doc.children(doc.body())
        .iter()
        .copied()
        .find(|&c| doc.has_class(c, "app-grid"))
}

// The same first frame the integration fixtures use: grid, side panel with
// a nav header whose first slot is the anchor, and a chat column.
fn render_host(doc: &mut Document) {
    let grid = doc.create_element("div");
    doc.set_attr(grid, "class", Some("app-grid x7a"));

    let side = doc.create_element("div");
    doc.set_attr(side, "class", Some("side-panel q2f"));

    let header = doc.create_element("header");
    doc.set_attr(header, "data-role", Some("nav"));
    let row = doc.create_element("div");
    let slot = doc.create_element("div");
    let other = doc.create_element("div");
    let _ = doc.append_child(row, slot);
    let _ = doc.append_child(row, other);
    let _ = doc.append_child(header, row);

    let search = doc.create_element("div");
    doc.set_attr(search, "role", Some("search"));

    let chat = doc.create_element("div");
    doc.set_attr(chat, "class", Some("chat"));

    let _ = doc.append_child(side, header);
    let _ = doc.append_child(side, search);
    let _ = doc.append_child(grid, side);
    let _ = doc.append_child(grid, chat);
    let _ = doc.append_child(doc.body(), grid);
}
