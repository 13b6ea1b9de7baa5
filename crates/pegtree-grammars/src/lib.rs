#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Grammars built on pegtree combinators.
//!
//! - [`common`]: whitespace, identifiers, numbers, strings, comments and the
//!   token/keyword helpers every grammar here is written with
//! - [`arithmetic`](mod@arithmetic): flat-precedence arithmetic expressions
//! - [`json`](mod@json): JSON values (with single-quoted strings allowed)
//!
//! Each grammar is built once on first use and shared; parse with it from
//! as many threads as needed.
//!
//! A parse returns the top-level token directly when it spans the whole
//! input, and otherwise a token named after the grammar's root rule with it
//! as the only child. Surrounding whitespace is the usual reason, so
//! consumers should accept both shapes.

pub mod builtin;
pub mod common;

#[cfg(feature = "grammar-arithmetic")]
pub mod arithmetic;
#[cfg(feature = "grammar-json")]
pub mod json;

#[cfg(test)]
mod common_tests;

pub use builtin::*;
