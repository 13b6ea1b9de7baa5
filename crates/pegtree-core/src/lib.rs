#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for pegtree parse results.
//!
//! Two layers:
//! - **Spans**: byte ranges into the parsed source
//! - **Tokens**: the immutable, named tree a successful parse produces
//!
//! A token owns a shared handle to the full source text, so a tree outlives
//! the parse that built it and can be handed to other threads or stored.

mod colors;
mod format;
mod invariants;
mod span;
mod token;
pub mod utils;

#[cfg(test)]
mod format_tests;
#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use span::Span;
pub use token::{ChildrenByName, Descendants, Token};
