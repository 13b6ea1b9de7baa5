//! Per-parse bookkeeping threaded through every rule application.
//!
//! Rules stay immutable; anything that changes while a parse runs (fuel,
//! depth, failure tracking, the memo table, the tracer) lives here.

use super::error::{Failure, ParseError};
use super::limits::FuelLimits;
use super::memo::{MemoEntry, MemoTable};
use super::trace::Tracer;
use crate::rule::Rule;

/// Distinct expectations kept for the furthest failure position.
const MAX_EXPECTED: usize = 16;

pub(crate) struct Context<'t, T: Tracer> {
    limits: FuelLimits,
    fuel_used: u32,
    depth: u32,
    fatal: Option<ParseError>,
    /// Lookahead nesting. Failures inside lookahead are not expectations.
    quiet: u32,
    furthest: usize,
    expected: Vec<String>,
    memo: Option<MemoTable>,
    pub(crate) tracer: &'t mut T,
}

impl<'t, T: Tracer> Context<'t, T> {
    pub(crate) fn new(limits: FuelLimits, memoize: bool, tracer: &'t mut T) -> Self {
        Self {
            limits,
            fuel_used: 0,
            depth: 0,
            fatal: None,
            quiet: 0,
            furthest: 0,
            expected: Vec::new(),
            memo: memoize.then(MemoTable::default),
            tracer,
        }
    }

    /// Charge fuel and depth for applying `rule`. Returns false once the
    /// parse has been aborted; the caller then fails without matching.
    pub(crate) fn enter(&mut self, rule: &Rule, pos: usize) -> bool {
        if self.fatal.is_some() {
            return false;
        }
        if let Some(limit) = self.limits.exec_fuel {
            if self.fuel_used >= limit {
                self.fatal = Some(ParseError::ExecFuelExhausted(limit));
                return false;
            }
        }
        if self.depth >= self.limits.recursion_limit {
            self.fatal = Some(ParseError::RecursionLimitExceeded(
                self.limits.recursion_limit,
            ));
            return false;
        }
        self.fuel_used = self.fuel_used.saturating_add(1);
        self.depth += 1;
        self.tracer.trace_enter(rule, pos);
        true
    }

    pub(crate) fn exit(&mut self, rule: &Rule, pos: usize, end: Option<usize>) {
        self.depth -= 1;
        self.tracer.trace_exit(rule, pos, end);
    }

    pub(crate) fn is_aborted(&self) -> bool {
        self.fatal.is_some()
    }

    pub(crate) fn take_fatal(&mut self) -> Option<ParseError> {
        self.fatal.take()
    }

    #[cfg(test)]
    pub(crate) fn fuel_used(&self) -> u32 {
        self.fuel_used
    }

    /// Run `f` with expectation recording suppressed.
    pub(crate) fn quietly<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.quiet += 1;
        let result = f(self);
        self.quiet -= 1;
        result
    }

    /// Record that something described by `describe` was wanted at `pos`.
    pub(crate) fn expected(&mut self, pos: usize, describe: impl FnOnce() -> String) {
        if self.quiet > 0 || pos < self.furthest {
            return;
        }
        if pos > self.furthest {
            self.furthest = pos;
            self.expected.clear();
        }
        if self.expected.len() >= MAX_EXPECTED {
            return;
        }
        let description = describe();
        if !self.expected.contains(&description) {
            self.expected.push(description);
        }
    }

    pub(crate) fn failure(&self) -> Failure {
        Failure {
            furthest: self.furthest,
            expected: self.expected.clone(),
        }
    }

    /// Only registered rules outside lookahead are memoized, so a replay
    /// never hides an expectation a real application would record.
    pub(crate) fn memo_get(&self, rule: &Rule, pos: usize) -> Option<MemoEntry> {
        if rule.name().is_none() || self.quiet > 0 {
            return None;
        }
        self.memo.as_ref()?.get(rule.id(), pos).cloned()
    }

    pub(crate) fn memo_put(&mut self, rule: &Rule, pos: usize, entry: MemoEntry) {
        if rule.name().is_none() || self.quiet > 0 || self.fatal.is_some() {
            return;
        }
        if let Some(memo) = self.memo.as_mut() {
            memo.insert(rule.id(), pos, entry);
        }
    }

    #[cfg(test)]
    pub(crate) fn memo_len(&self) -> usize {
        self.memo.as_ref().map_or(0, MemoTable::len)
    }
}
