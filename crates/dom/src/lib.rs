//! # dom
//!
//! Arena-backed model of a host application's document tree.
//!
//! The tree is mutated imperatively by whoever plays the host (tests, the
//! demo driver) and consumed read-mostly by the augmentation engine. Every
//! structural edit of connected nodes publishes a coarse [`Notice`] to all
//! subscribed channels; subscribers are expected to re-scan the tree rather
//! than interpret the notice payload.
//!
//! Attribute and character-data edits deliberately do not notify: only
//! child-list changes do, matching the subscription the engine asks for.

mod document;
pub mod outline;

pub use document::{Document, DomError, NodeId, Notice};
