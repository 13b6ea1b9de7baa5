//! Packrat memo table.
//!
//! Matching is deterministic per (rule, position), so a named rule's outcome
//! can be recorded once and replayed. Entries hold the end offset and the
//! tokens the rule appended, which is everything a successful application
//! changes.

use std::collections::HashMap;

use pegtree_core::Token;

use super::ParseState;

#[derive(Clone, Debug)]
pub(crate) enum MemoEntry {
    Failed,
    Matched { end: usize, tokens: Vec<Token> },
}

impl MemoEntry {
    /// Apply the recorded outcome to `state`.
    pub(crate) fn replay(&self, state: &mut ParseState) -> bool {
        match self {
            MemoEntry::Failed => false,
            MemoEntry::Matched { end, tokens } => {
                state.set_position(*end);
                for token in tokens {
                    state.push(token.clone());
                }
                true
            }
        }
    }

    pub(crate) fn end(&self) -> Option<usize> {
        match self {
            MemoEntry::Failed => None,
            MemoEntry::Matched { end, .. } => Some(*end),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MemoTable {
    entries: HashMap<(usize, usize), MemoEntry>,
}

impl MemoTable {
    pub(crate) fn get(&self, rule_id: usize, pos: usize) -> Option<&MemoEntry> {
        self.entries.get(&(rule_id, pos))
    }

    pub(crate) fn insert(&mut self, rule_id: usize, pos: usize, entry: MemoEntry) {
        self.entries.insert((rule_id, pos), entry);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
