//! Rule matching.
//!
//! Contract for every rule: on success the state has advanced and may have
//! new tokens appended; on failure the state is exactly as it was. Anything
//! that may need to undo work runs on a clone and assigns it back only once
//! it has committed.

use std::sync::Arc;

use pegtree_core::{Span, Token};

use super::{CharClass, Rule, RuleKind};
use crate::engine::{Context, MemoEntry, ParseState, Tracer};

/// Token name for node rules applied outside a grammar.
const UNNAMED_NODE: &str = "Node";

impl Rule {
    /// Attempt to match at `state`'s position.
    pub(crate) fn apply<T: Tracer>(&self, state: &mut ParseState, cx: &mut Context<'_, T>) -> bool {
        let start = state.position();
        if !cx.enter(self, start) {
            return false;
        }

        let matched = match cx.memo_get(self, start) {
            Some(entry) => {
                cx.tracer.trace_memo_hit(self, start, entry.end());
                entry.replay(state)
            }
            None => {
                let mark = state.emitted_len();
                let matched = self.apply_kind(state, cx);
                let entry = if matched {
                    MemoEntry::Matched {
                        end: state.position(),
                        tokens: state.emitted_since(mark),
                    }
                } else {
                    MemoEntry::Failed
                };
                cx.memo_put(self, start, entry);
                matched
            }
        };

        cx.exit(self, start, matched.then(|| state.position()));
        matched
    }

    fn apply_kind<T: Tracer>(&self, state: &mut ParseState, cx: &mut Context<'_, T>) -> bool {
        match self.kind() {
            RuleKind::Char(class) => self.apply_char(class, state, cx),
            RuleKind::Literal(text) => {
                if state.remainder().starts_with(&**text) {
                    state.advance(text.len());
                    return true;
                }
                self.fail(state, cx)
            }
            RuleKind::Regex(matcher) => match matcher.match_at(state.input(), state.position()) {
                Some(end) => {
                    state.set_position(end);
                    true
                }
                None => self.fail(state, cx),
            },
            RuleKind::End => state.is_at_end() || self.fail(state, cx),
            RuleKind::Seq(rules) => apply_seq(rules, state, cx),
            RuleKind::Choice(alternatives) => {
                for alternative in alternatives {
                    let mut attempt = state.clone();
                    if alternative.apply(&mut attempt, cx) {
                        state.assign(attempt);
                        return true;
                    }
                    if cx.is_aborted() {
                        return false;
                    }
                }
                false
            }
            RuleKind::Not(inner) => !lookahead(inner, state, cx) || self.fail(state, cx),
            RuleKind::At(inner) => lookahead(inner, state, cx) || self.fail(state, cx),
            RuleKind::ZeroOrMore(inner) => {
                self.repeat(inner, 0, state, cx);
                true
            }
            RuleKind::OneOrMore(inner) => self.repeat(inner, 1, state, cx),
            RuleKind::Opt(inner) => {
                let mut attempt = state.clone();
                if inner.apply(&mut attempt, cx) {
                    state.assign(attempt);
                }
                true
            }
            RuleKind::Node(inner) => self.apply_node(inner, state, cx),
            RuleKind::Recursive(lazy) => lazy.resolve().apply(state, cx),
        }
    }

    fn apply_char<T: Tracer>(
        &self,
        class: &CharClass,
        state: &mut ParseState,
        cx: &mut Context<'_, T>,
    ) -> bool {
        match state.remainder().chars().next() {
            Some(c) if class.matches(c) => {
                state.advance(c.len_utf8());
                true
            }
            _ => self.fail(state, cx),
        }
    }

    /// Record this primitive or lookahead as expected at the cursor and fail.
    fn fail<T: Tracer>(&self, state: &ParseState, cx: &mut Context<'_, T>) -> bool {
        cx.expected(state.position(), || self.describe());
        false
    }

    /// Greedy repetition. A zero-width iteration ends the loop; it is only
    /// committed when it is one of the `min` required matches.
    fn repeat<T: Tracer>(
        &self,
        inner: &Rule,
        min: usize,
        state: &mut ParseState,
        cx: &mut Context<'_, T>,
    ) -> bool {
        let mut count = 0;
        loop {
            let mut attempt = state.clone();
            if !inner.apply(&mut attempt, cx) {
                return count >= min;
            }

            let stalled = attempt.position() == state.position();
            if stalled && count >= min {
                cx.tracer.trace_stalled(self, state.position());
                return true;
            }

            state.assign(attempt);
            count += 1;

            if stalled {
                cx.tracer.trace_stalled(self, state.position());
                return true;
            }
        }
    }

    fn apply_node<T: Tracer>(
        &self,
        inner: &Rule,
        state: &mut ParseState,
        cx: &mut Context<'_, T>,
    ) -> bool {
        let begin = state.position();
        let mut scope = state.scope();
        if !inner.apply(&mut scope, cx) {
            return false;
        }

        let name = self
            .name_arc()
            .cloned()
            .unwrap_or_else(|| Arc::from(UNNAMED_NODE));
        let span = Span::new(begin, scope.position());
        let token = Token::new(name, state.input_arc().clone(), span, scope.into_tokens());
        cx.tracer.trace_token(&token);

        state.set_position(span.end);
        state.push(token);
        true
    }
}

fn apply_seq<T: Tracer>(rules: &[Rule], state: &mut ParseState, cx: &mut Context<'_, T>) -> bool {
    let mut attempt = state.clone();
    for rule in rules {
        if !rule.apply(&mut attempt, cx) {
            if attempt.position() != state.position() {
                cx.tracer
                    .trace_backtrack(attempt.position(), state.position());
            }
            return false;
        }
    }
    state.assign(attempt);
    true
}

/// Apply `inner` on a throwaway clone. Only the outcome escapes: what
/// `inner` expected along the way is not recorded, the lookahead itself is.
fn lookahead<T: Tracer>(inner: &Rule, state: &ParseState, cx: &mut Context<'_, T>) -> bool {
    let mut probe = state.clone();
    let matched = cx.quietly(|cx| inner.apply(&mut probe, cx));
    if probe.position() != state.position() {
        cx.tracer.trace_backtrack(probe.position(), state.position());
    }
    matched
}
