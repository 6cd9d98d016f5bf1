//! Session wiring and the event pump.
//!
//! Invariants:
//! - All components are constructed once and owned here; callbacks reach
//!   them through `&mut self`, never through module state.
//! - The notice subscription is installed at construction, before the
//!   first detection pass, and is never torn down.
//! - Notices queue on a channel and are delivered by `pump`, one batch per
//!   call, so no callback ever observes a half-applied host edit. Any
//!   number of queued notices coalesce into a single detection pass.
//! - Time is virtual: the settle check is a one-shot deadline fired by
//!   `advance`, not a timer thread and not a retry loop.

use crate::config::ResolvedConfig;
use crate::layout::LayoutController;
use crate::styles;
use crate::supervisor::Supervisor;
use dom::{Document, NodeId, Notice};
use prefs::PrefStore;
use std::sync::mpsc::{self, Receiver};

pub struct Session {
    doc: Document,
    notices: Receiver<Notice>,
    layout: LayoutController,
    supervisor: Supervisor,
    settle_delay_ms: u64,
    now_ms: u64,
    settle_at_ms: Option<u64>,
}

impl Session {
    pub fn new(mut doc: Document, cfg: ResolvedConfig, prefs: PrefStore) -> Self {
        let (tx, rx) = mpsc::channel();
        doc.observe(tx);
        let settle_delay_ms = cfg.panel.settle_delay_ms;
        let layout = LayoutController::new(cfg.panel.clone(), prefs);
        let supervisor = Supervisor::new(cfg.panel, cfg.anchor);
        Self {
            doc,
            notices: rx,
            layout,
            supervisor,
            settle_delay_ms,
            now_ms: 0,
            settle_at_ms: None,
        }
    }

    /// Install the presentation rules, restore the persisted layout, run
    /// one immediate detection pass, and arm the one-shot settle check for
    /// hosts that finish their first render before observation produces
    /// any notices.
    pub fn start(&mut self) {
        styles::install_stylesheet(&mut self.doc, self.supervisor.config());
        self.layout.initialize(&mut self.doc);
        // The install above raised notices of our own; the immediate pass
        // below covers whatever they would have triggered.
        self.drain_notices();
        let _ = self.supervisor.ensure_control(&mut self.doc, &mut self.layout);
        self.settle_at_ms = Some(self.now_ms + self.settle_delay_ms);
    }

    /// Deliver pending change notices. Detection is presence-based, so one
    /// pass covers insertions and removals alike.
    pub fn pump(&mut self) {
        if self.drain_notices() == 0 {
            return;
        }
        let _ = self.supervisor.ensure_control(&mut self.doc, &mut self.layout);
    }

    /// Advance the virtual clock, firing the settle check when its
    /// deadline passes. Fires at most once per session.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms = self.now_ms.saturating_add(ms);
        if let Some(at) = self.settle_at_ms
            && self.now_ms >= at
        {
            self.settle_at_ms = None;
            log::trace!(target: "panel.session", "settle check at {}ms", self.now_ms);
            let _ = self.supervisor.ensure_control(&mut self.doc, &mut self.layout);
        }
    }

    /// Route a host click. A hit on the control (or anything inside it)
    /// toggles the layout; every other target belongs to the host.
    pub fn click(&mut self, id: NodeId) {
        if self.supervisor.is_control_hit(&self.doc, id) {
            self.layout.toggle(&mut self.doc);
        }
    }

    pub fn collapsed(&self) -> bool {
        self.layout.collapsed()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// The host's hand: everything mutated through here raises notices
    /// that the next `pump` turns into a detection pass.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    fn drain_notices(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(notice) = self.notices.try_recv() {
            log::trace!(target: "panel.session", "notice: {notice:?}");
            drained += 1;
        }
        drained
    }
}
