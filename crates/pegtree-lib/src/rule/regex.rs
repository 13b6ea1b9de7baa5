//! Anchored regex primitive backed by a dense DFA.

use std::sync::Arc;

use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::{Anchored, Input};

use crate::grammar::GrammarError;

pub(crate) struct RegexMatcher {
    pattern: Arc<str>,
    dfa: dense::DFA<Vec<u32>>,
}

impl RegexMatcher {
    pub(crate) fn new(pattern: &str) -> Result<Self, GrammarError> {
        let dfa = dense::DFA::builder()
            .configure(dense::DFA::config().start_kind(StartKind::Anchored))
            .build(pattern)
            .map_err(|e| GrammarError::InvalidRegex {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            pattern: Arc::from(pattern),
            dfa,
        })
    }

    pub(crate) fn pattern(&self) -> &str {
        &self.pattern
    }

    /// End offset of the leftmost-first match starting exactly at `pos`.
    pub(crate) fn match_at(&self, haystack: &str, pos: usize) -> Option<usize> {
        let input = Input::new(haystack).range(pos..).anchored(Anchored::Yes);
        // A search error only arises from quit bytes, which are not configured.
        let found = self.dfa.try_search_fwd(&input).ok()??;
        Some(found.offset())
    }
}
