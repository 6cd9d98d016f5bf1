//! # panel
//!
//! Slim-panel augmentation for a host document the engine does not own:
//! a persisted collapsed/expanded flag, marker-scoped presentation rules,
//! and a toggle control that is kept attached — exactly once — while the
//! host rebuilds arbitrary subtrees around it.
//!
//! The pieces, leaf to root: [`prefs::PrefStore`] persists the flag,
//! [`LayoutController`] derives all visual state from it,
//! [`Supervisor`] keeps the control present, and [`Session`] owns the lot
//! and pumps host change notices into detection passes.

pub mod config;
pub mod layout;
pub mod session;
pub mod styles;
pub mod supervisor;

pub use config::{ConfigError, PanelConfig, ResolvedConfig, load_config};
pub use layout::LayoutController;
pub use session::Session;
pub use supervisor::{EnsureOutcome, Supervisor};
