//! Layout state controller.
//!
//! Invariants:
//! - `collapsed` is the only mutable state; the document marker and the
//!   control's glyph/tooltip are re-derived from it on every `apply` and
//!   never updated independently.
//! - `apply` is presence-based: the control is looked up by id each time,
//!   never cached, so a control the host silently destroyed simply drops
//!   out of the update with no bookkeeping.
//! - Persistence failures stay inside the preference store; no operation
//!   here has an error path.

use crate::config::PanelConfig;
use dom::Document;
use prefs::PrefStore;

pub struct LayoutController {
    cfg: PanelConfig,
    prefs: PrefStore,
    collapsed: bool,
}

impl LayoutController {
    pub fn new(cfg: PanelConfig, prefs: PrefStore) -> Self {
        Self {
            cfg,
            prefs,
            collapsed: false,
        }
    }

    /// Restore the persisted flag (absent → expanded) and apply the derived
    /// layout immediately. The control usually does not exist yet; the
    /// marker on `body` alone restores the layout on startup.
    pub fn initialize(&mut self, doc: &mut Document) {
        self.collapsed = self.prefs.get_bool(&self.cfg.pref_key, false);
        self.apply(doc);
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    /// Re-derive all visual state from the flag. Re-applying an unchanged
    /// flag touches nothing: the dom mutators report whether anything
    /// changed, and a clean apply leaves the document revision alone.
    pub fn apply(&mut self, doc: &mut Document) {
        let body = doc.body();
        if doc.set_class_enabled(body, &self.cfg.marker_class, self.collapsed) {
            log::debug!(
                target: "panel.layout",
                "layout marker {}",
                if self.collapsed { "set" } else { "cleared" }
            );
        }

        let Some(control) = doc.element_by_id(&self.cfg.control_id) else {
            return;
        };
        doc.set_attr(control, "title", Some(self.cfg.tooltip(self.collapsed)));
        let glyph = self.cfg.glyph(self.collapsed);
        let label = doc
            .children(control)
            .iter()
            .copied()
            .find(|&c| doc.is_text(c));
        match label {
            Some(label) => {
                doc.set_text(label, glyph);
            }
            None => {
                // Host stripped the label; grow it back.
                let label = doc.create_text(glyph);
                let _ = doc.append_child(control, label);
            }
        }
    }

    /// Flip the flag, persist it, re-derive. Two calls in a row restore
    /// both the in-memory flag and the persisted value.
    pub fn toggle(&mut self, doc: &mut Document) {
        self.collapsed = !self.collapsed;
        self.prefs.set_bool(&self.cfg.pref_key, self.collapsed);
        log::debug!(
            target: "panel.layout",
            "panel {}",
            if self.collapsed { "collapsed" } else { "expanded" }
        );
        self.apply(doc);
    }

    #[cfg(test)]
    pub(crate) fn prefs(&self) -> &PrefStore {
        &self.prefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::NodeId;

    fn controller() -> LayoutController {
        LayoutController::new(PanelConfig::default(), PrefStore::in_memory())
    }

    fn with_control(doc: &mut Document, cfg: &PanelConfig) -> NodeId {
        let control = doc.create_element("div");
        doc.set_attr(control, "id", Some(&cfg.control_id));
        let label = doc.create_text("");
        doc.append_child(control, label).unwrap();
        doc.append_child(doc.body(), control).unwrap();
        control
    }

    #[test]
    fn initialize_without_stored_value_leaves_marker_absent() {
        let mut doc = Document::new();
        let mut layout = controller();
        layout.initialize(&mut doc);

        assert!(!layout.collapsed());
        assert!(!doc.has_class(doc.body(), "side-panel-collapsed"));
    }

    #[test]
    fn initialize_restores_persisted_collapsed_state_without_a_control() {
        let mut doc = Document::new();
        let mut prefs = PrefStore::in_memory();
        prefs.set_bool("side_panel_collapsed", true);

        let mut layout = LayoutController::new(PanelConfig::default(), prefs);
        layout.initialize(&mut doc);

        assert!(layout.collapsed());
        assert!(doc.has_class(doc.body(), "side-panel-collapsed"));
    }

    #[test]
    fn apply_synchronizes_control_glyph_and_tooltip() {
        let mut doc = Document::new();
        let cfg = PanelConfig::default();
        let control = with_control(&mut doc, &cfg);

        let mut layout = controller();
        layout.initialize(&mut doc);

        assert_eq!(doc.attr(control, "title"), Some("Slim panel"));
        let label = doc.children(control)[0];
        assert_eq!(doc.text(label), Some("⬅"));

        layout.toggle(&mut doc);
        assert_eq!(doc.attr(control, "title"), Some("Expand panel"));
        assert_eq!(doc.text(label), Some("➡"));
    }

    #[test]
    fn reapplying_an_unchanged_flag_is_a_detectable_no_op() {
        let mut doc = Document::new();
        let cfg = PanelConfig::default();
        with_control(&mut doc, &cfg);

        let mut layout = controller();
        layout.initialize(&mut doc);

        let rev = doc.revision();
        layout.apply(&mut doc);
        layout.apply(&mut doc);
        assert_eq!(doc.revision(), rev);
    }

    #[test]
    fn toggle_twice_restores_flag_marker_and_persisted_value() {
        let mut doc = Document::new();
        let mut layout = controller();
        layout.initialize(&mut doc);

        layout.toggle(&mut doc);
        assert!(layout.collapsed());
        assert!(layout.prefs().get_bool("side_panel_collapsed", false));

        layout.toggle(&mut doc);
        assert!(!layout.collapsed());
        assert!(!layout.prefs().get_bool("side_panel_collapsed", true));
        assert!(!doc.has_class(doc.body(), "side-panel-collapsed"));
    }

    #[test]
    fn apply_regrows_a_stripped_label() {
        let mut doc = Document::new();
        let cfg = PanelConfig::default();
        let control = with_control(&mut doc, &cfg);
        let label = doc.children(control)[0];
        doc.remove_subtree(label).unwrap();

        let mut layout = controller();
        layout.initialize(&mut doc);

        let label = doc.children(control)[0];
        assert_eq!(doc.text(label), Some("⬅"));
    }
}
