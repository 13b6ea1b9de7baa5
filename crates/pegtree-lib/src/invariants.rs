//! Invariant checks excluded from coverage reports.
//!
//! A broken grammar is a programmer error, so these panic instead of
//! returning `GrammarError`.

#![cfg_attr(coverage_nightly, coverage(off))]

use std::sync::Arc;

use crate::engine::ParseState;
use crate::rule::Rule;

pub(crate) fn ensure_char_set(set: &str) {
    assert!(
        !set.is_empty(),
        "broken grammar invariant: empty character set"
    );
}

pub(crate) fn ensure_char_range(lo: char, hi: char) {
    assert!(
        lo <= hi,
        "broken grammar invariant: inverted character range {lo:?}..={hi:?}"
    );
}

pub(crate) fn ensure_literal(text: &str) {
    assert!(!text.is_empty(), "broken grammar invariant: empty literal");
}

pub(crate) fn ensure_alternatives(rules: &[Rule]) {
    assert!(
        !rules.is_empty(),
        "broken grammar invariant: choice without alternatives"
    );
}

impl ParseState {
    pub(crate) fn ensure_same_input(&self, other: &ParseState) {
        assert!(
            Arc::ptr_eq(self.input_arc(), other.input_arc()) || self.input() == other.input(),
            "ParseState::assign: states parse different inputs"
        );
    }

    pub(crate) fn ensure_valid_position(&self, position: usize) {
        assert!(
            position <= self.input().len() && self.input().is_char_boundary(position),
            "ParseState: position {position} is not a char boundary of a {}-byte input",
            self.input().len()
        );
    }
}
