#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! PEG parsing combinators that produce named token trees.
//!
//! A grammar is a graph of immutable [`Rule`] values built from primitives
//! (characters, literals, regexes, end of input) and combinators (sequence,
//! ordered choice, lookahead, repetition, named capture, lazy recursion).
//! Applying a rule to a fresh [`ParseState`] either commits a match or leaves
//! the state untouched. [`rule::node`] rules turn what they match into
//! [`Token`]s, so a successful parse yields a tree.
//!
//! Rules carry no per-parse state, so one grammar can serve any number of
//! threads at once.
//!
//! # Example
//!
//! ```
//! use pegtree_lib::rule::{ch, node, one_or_more, range, seq, zero_or_more};
//! use pegtree_lib::Grammar;
//!
//! let number = node(one_or_more(range('0', '9')));
//! let sum = node(seq([number.clone(), zero_or_more(seq([ch('+'), number.clone()]))]));
//! let grammar = Grammar::builder("sum")
//!     .rule("Sum", sum)
//!     .rule("Number", number)
//!     .build()
//!     .unwrap();
//!
//! let tree = grammar.parse("1+22").unwrap();
//! assert_eq!(tree.name(), "Sum");
//! assert_eq!(tree.children_by_name("Number").count(), 2);
//! ```

pub mod diagnostics;
pub mod engine;
pub mod grammar;
mod invariants;
pub mod rule;

pub use engine::{
    Failure, FuelLimits, NoopTracer, ParseError, ParseState, Parser, ParserBuilder, PrintTracer,
    Tracer, Verbosity, parse,
};
pub use grammar::{Grammar, GrammarBuilder, GrammarError};
pub use pegtree_core::{Colors, Span, Token};
pub use rule::Rule;
