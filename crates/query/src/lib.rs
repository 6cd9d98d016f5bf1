//! # query
//!
//! Small selector engine for locating host elements: type, `#id`, `.class`,
//! `[attr]`/`[attr="v"]`/`[attr*="v"]`, `:first-child`, and descendant/child
//! combinators. That is the full grammar the configured locators need; a
//! selector outside it is a parse error at configuration time, never a
//! runtime failure.

mod matcher;
mod syntax;

pub use matcher::{matches, query_all, query_first};
pub use syntax::{AttrOp, AttrTest, Combinator, CompoundSelector, ParseError, Selector};
