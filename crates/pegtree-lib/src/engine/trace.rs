//! Tracing infrastructure for debugging rule application.
//!
//! # Design: Zero-Cost Abstraction
//!
//! The tracer is a type parameter of the parse, not a runtime switch. With
//! `NoopTracer` every trait method is an `#[inline(always)]` empty function,
//! so the compiler removes the calls and their arguments entirely.
//!
//! # Design: Tracer-Owned State
//!
//! Display-only state (indentation depth, which rules were shown) belongs to
//! the tracer. The parse context only reports raw events.

use pegtree_core::utils::truncate_text;
use pegtree_core::{Colors, Token};

use crate::rule::Rule;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Verbosity {
    /// Default: registered rules and backtracking only.
    #[default]
    Default,
    /// Verbose (-v): every rule, captured tokens, memo hits, stalls.
    Verbose,
    /// Very verbose (-vv): as verbose, plus the text each match consumed.
    VeryVerbose,
}

/// Tracer trait for parse instrumentation.
///
/// Each method is called at a specific point during a parse:
/// - `trace_enter` - before a rule is applied at `pos`
/// - `trace_exit` - after it returns, with the end offset on success
/// - `trace_token` - when a node rule captures a token
/// - `trace_backtrack` - when a sequence or lookahead rewinds the cursor
/// - `trace_memo_hit` - when a memoized outcome is replayed
/// - `trace_stalled` - when a repetition stops on a zero-width iteration
pub trait Tracer {
    fn trace_enter(&mut self, rule: &Rule, pos: usize);

    fn trace_exit(&mut self, rule: &Rule, pos: usize, end: Option<usize>);

    fn trace_token(&mut self, token: &Token);

    fn trace_backtrack(&mut self, from: usize, to: usize);

    fn trace_memo_hit(&mut self, rule: &Rule, pos: usize, end: Option<usize>);

    fn trace_stalled(&mut self, rule: &Rule, pos: usize);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _rule: &Rule, _pos: usize) {}

    #[inline(always)]
    fn trace_exit(&mut self, _rule: &Rule, _pos: usize, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_token(&mut self, _token: &Token) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _from: usize, _to: usize) {}

    #[inline(always)]
    fn trace_memo_hit(&mut self, _rule: &Rule, _pos: usize, _end: Option<usize>) {}

    #[inline(always)]
    fn trace_stalled(&mut self, _rule: &Rule, _pos: usize) {}
}

/// Symbols prefixing each trace line.
mod symbol {
    pub const ENTER: &str = "▶";
    pub const MATCH: &str = "●";
    pub const FAIL: &str = "○";
    pub const TOKEN: &str = "⬥";
    pub const BACKTRACK: &str = "❮❮❮";
    pub const MEMO: &str = "↺";
    pub const STALLED: &str = "⊘";
}

/// Width budget for rule labels and matched text.
const LABEL_WIDTH: usize = 40;

/// Tracer that collects an indented execution trace.
pub struct PrintTracer<'s> {
    /// Source being parsed, for matched text.
    source: &'s str,
    verbosity: Verbosity,
    lines: Vec<String>,
    /// Whether each open rule application printed an enter line.
    shown: Vec<bool>,
    depth: usize,
    colors: Colors,
}

impl<'s> PrintTracer<'s> {
    pub fn new(source: &'s str, verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            source,
            verbosity,
            lines: Vec::new(),
            shown: Vec::new(),
            depth: 0,
            colors,
        }
    }

    /// Collected trace lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn verbose(&self) -> bool {
        self.verbosity != Verbosity::Default
    }

    fn is_shown(&self, rule: &Rule) -> bool {
        rule.name().is_some() || self.verbose()
    }

    fn label(&self, rule: &Rule) -> String {
        let c = &self.colors;
        match rule.name() {
            Some(name) => c.paint(c.blue, name),
            None => truncate_text(&rule.to_string(), LABEL_WIDTH),
        }
    }

    fn push(&mut self, symbol: &str, content: String) {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{symbol} {content}"));
    }

    fn matched_text(&self, pos: usize, end: usize) -> String {
        let c = &self.colors;
        let text = truncate_text(&self.source[pos..end], LABEL_WIDTH);
        format!(" {}{}{:?}{}", c.dim, c.green, text, c.reset)
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_enter(&mut self, rule: &Rule, pos: usize) {
        let shown = self.is_shown(rule);
        self.shown.push(shown);
        if !shown {
            return;
        }
        let content = format!("{} @{pos}", self.label(rule));
        self.push(symbol::ENTER, content);
        self.depth += 1;
    }

    fn trace_exit(&mut self, rule: &Rule, pos: usize, end: Option<usize>) {
        if !self.shown.pop().unwrap_or(false) {
            return;
        }
        self.depth = self.depth.saturating_sub(1);

        let label = self.label(rule);
        match end {
            Some(end) => {
                let mut content = format!("{label} {pos}..{end}");
                if self.verbosity == Verbosity::VeryVerbose {
                    content.push_str(&self.matched_text(pos, end));
                }
                self.push(symbol::MATCH, content);
            }
            None => {
                let c = &self.colors;
                let content = format!("{label} {}@{pos}{}", c.red, c.reset);
                self.push(symbol::FAIL, content);
            }
        }
    }

    fn trace_token(&mut self, token: &Token) {
        if !self.verbose() {
            return;
        }
        let c = &self.colors;
        let content = format!(
            "{} {}{}{}",
            c.paint(c.blue, token.name()),
            c.dim,
            token.span(),
            c.reset
        );
        self.push(symbol::TOKEN, content);
    }

    fn trace_backtrack(&mut self, from: usize, to: usize) {
        let c = &self.colors;
        let content = format!("{}{from} -> {to}{}", c.dim, c.reset);
        self.push(symbol::BACKTRACK, content);
    }

    fn trace_memo_hit(&mut self, rule: &Rule, pos: usize, end: Option<usize>) {
        if !self.verbose() {
            return;
        }
        let outcome = match end {
            Some(end) => format!("{pos}..{end}"),
            None => format!("@{pos} failed"),
        };
        let content = format!("{} {outcome}", self.label(rule));
        self.push(symbol::MEMO, content);
    }

    fn trace_stalled(&mut self, rule: &Rule, pos: usize) {
        if !self.verbose() {
            return;
        }
        let content = format!("{} stalled @{pos}", self.label(rule));
        self.push(symbol::STALLED, content);
    }
}
