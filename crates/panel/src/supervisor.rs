//! Attachment supervisor.
//!
//! Invariants:
//! - At most one control exists at any time; a detection pass on an
//!   unchanged document is a strict no-op.
//! - Detection is presence-based, never event-based: the supervisor does
//!   not track control destruction, it only answers "the anchor exists and
//!   has no control," which covers never-created and host-destroyed with
//!   the same code path.
//! - A missing anchor is not an error; the feature stays inert until a
//!   later pass finds one.

use crate::config::PanelConfig;
use crate::layout::LayoutController;
use dom::{Document, NodeId};
use query::{Selector, query_first};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// No anchor in the document; nothing to do yet.
    AnchorMissing,
    /// The control is already where it belongs.
    AlreadyAttached,
    /// A fresh control was created and attached.
    Attached,
    /// A control existed outside the anchor and was replaced.
    Reattached,
}

pub struct Supervisor {
    cfg: PanelConfig,
    anchor: Selector,
}

impl Supervisor {
    pub fn new(cfg: PanelConfig, anchor: Selector) -> Self {
        Self { cfg, anchor }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.cfg
    }

    /// One detection pass: locate the anchor, make sure exactly one control
    /// lives at its head, and hand freshly created controls to the layout
    /// controller for their initial paint.
    pub fn ensure_control(
        &self,
        doc: &mut Document,
        layout: &mut LayoutController,
    ) -> EnsureOutcome {
        let Some(anchor) = query_first(doc, &self.anchor) else {
            log::trace!(target: "panel.supervisor", "anchor not present; staying inert");
            return EnsureOutcome::AnchorMissing;
        };
        match doc.element_by_id(&self.cfg.control_id) {
            Some(control) if control == anchor || doc.is_descendant(anchor, control) => {
                EnsureOutcome::AlreadyAttached
            }
            Some(stale) => {
                // The host rebuilt around the control or moved it. A second
                // insert would duplicate it; adopting it in place would
                // leave it at a host-chosen position. Replace it outright.
                let _ = doc.remove_subtree(stale);
                self.insert_control(doc, anchor, layout);
                log::debug!(target: "panel.supervisor", "stale control replaced");
                EnsureOutcome::Reattached
            }
            None => {
                self.insert_control(doc, anchor, layout);
                log::debug!(target: "panel.supervisor", "control attached");
                EnsureOutcome::Attached
            }
        }
    }

    fn insert_control(&self, doc: &mut Document, anchor: NodeId, layout: &mut LayoutController) {
        let control = doc.create_element("div");
        doc.set_attr(control, "id", Some(&self.cfg.control_id));
        doc.set_attr(control, "role", Some("button"));
        let label = doc.create_text("");
        let attached = doc
            .append_child(control, label)
            .and_then(|_| doc.prepend_child(anchor, control));
        debug_assert!(attached.is_ok(), "anchor must accept the control");
        // Paint glyph, tooltip, and marker so the control never renders in
        // a state that disagrees with the flag.
        layout.apply(doc);
    }

    /// Whether a pointer hit on `id` lands on the control or inside it.
    pub fn is_control_hit(&self, doc: &Document, id: NodeId) -> bool {
        doc.element_by_id(&self.cfg.control_id)
            .is_some_and(|control| id == control || doc.is_descendant(control, id))
    }
}
