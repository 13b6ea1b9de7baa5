//! The rule algebra.
//!
//! A [`Rule`] is an immutable, shareable grammar node. Primitives consume
//! input directly; combinators compose other rules. Everything here is a
//! plain constructor: matching lives in `apply`, PEG notation in `display`.
//!
//! Rule names are not given at construction. A [`Grammar`](crate::Grammar)
//! binds them when rules are registered, which is also how [`node`] rules
//! learn the name of the tokens they build.

mod apply;
mod display;
mod regex;


use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::grammar::GrammarError;

pub(crate) use self::regex::RegexMatcher;

/// A composable grammar node.
///
/// Cloning is cheap and shares the node: clones have the same identity,
/// the same (late-bound) name, and the same memoization key.
#[derive(Clone)]
pub struct Rule(Arc<RuleInner>);

struct RuleInner {
    name: OnceLock<Arc<str>>,
    kind: RuleKind,
}

pub(crate) enum RuleKind {
    Char(CharClass),
    Literal(Arc<str>),
    Regex(RegexMatcher),
    End,
    Seq(Vec<Rule>),
    Choice(Vec<Rule>),
    Not(Rule),
    At(Rule),
    ZeroOrMore(Rule),
    OneOrMore(Rule),
    Opt(Rule),
    Node(Rule),
    Recursive(Lazy),
}

/// Single-character matchers.
pub(crate) enum CharClass {
    Single(char),
    Set(Arc<str>),
    Range(char, char),
    NotSet(Arc<str>),
    Any,
    Predicate {
        label: &'static str,
        test: fn(char) -> bool,
    },
}

impl CharClass {
    pub(crate) fn matches(&self, c: char) -> bool {
        match self {
            CharClass::Single(expected) => c == *expected,
            CharClass::Set(set) => set.contains(c),
            CharClass::Range(lo, hi) => (*lo..=*hi).contains(&c),
            CharClass::NotSet(set) => !set.contains(c),
            CharClass::Any => true,
            CharClass::Predicate { test, .. } => test(c),
        }
    }
}

/// Single-assignment cell over a rule supplier.
pub(crate) struct Lazy {
    cell: OnceLock<Rule>,
    supplier: Box<dyn Fn() -> Rule + Send + Sync>,
}

impl Lazy {
    pub(crate) fn resolve(&self) -> &Rule {
        self.cell.get_or_init(|| (self.supplier)())
    }
}

impl Rule {
    fn from_kind(kind: RuleKind) -> Self {
        Self(Arc::new(RuleInner {
            name: OnceLock::new(),
            kind,
        }))
    }

    pub(crate) fn kind(&self) -> &RuleKind {
        &self.0.kind
    }

    /// Registered name, if a grammar has bound one.
    pub fn name(&self) -> Option<&str> {
        self.0.name.get().map(|n| &**n)
    }

    pub(crate) fn name_arc(&self) -> Option<&Arc<str>> {
        self.0.name.get()
    }

    /// Whether this rule captures a token when it matches.
    pub fn is_node(&self) -> bool {
        matches!(self.0.kind, RuleKind::Node(_))
    }

    /// Whether both handles are the same rule.
    pub fn ptr_eq(&self, other: &Rule) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Stable identity for the lifetime of the rule graph.
    pub(crate) fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Bind `name` once. Rebinding the same name is a no-op.
    pub(crate) fn bind_name(&self, name: &Arc<str>) -> Result<(), GrammarError> {
        let bound = self.0.name.get_or_init(|| name.clone());
        if bound == name {
            return Ok(());
        }
        Err(GrammarError::RuleAlreadyNamed {
            rule: bound.to_string(),
            name: name.to_string(),
        })
    }

    /// Direct sub-rules, without resolving recursive references.
    pub(crate) fn operands(&self) -> &[Rule] {
        match &self.0.kind {
            RuleKind::Seq(rules) | RuleKind::Choice(rules) => rules,
            RuleKind::Not(r)
            | RuleKind::At(r)
            | RuleKind::ZeroOrMore(r)
            | RuleKind::OneOrMore(r)
            | RuleKind::Opt(r)
            | RuleKind::Node(r) => std::slice::from_ref(r),
            RuleKind::Char(_)
            | RuleKind::Literal(_)
            | RuleKind::Regex(_)
            | RuleKind::End
            | RuleKind::Recursive(_) => &[],
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Rule({name} <- {self})"),
            None => write!(f, "Rule({self})"),
        }
    }
}

/// Match the character `c`.
pub fn ch(c: char) -> Rule {
    Rule::from_kind(RuleKind::Char(CharClass::Single(c)))
}

/// Match any character contained in `set`.
///
/// # Panics
/// Panics if `set` is empty.
pub fn one_of(set: &str) -> Rule {
    crate::invariants::ensure_char_set(set);
    Rule::from_kind(RuleKind::Char(CharClass::Set(Arc::from(set))))
}

/// Match any character in `lo..=hi`.
///
/// # Panics
/// Panics if `lo > hi`.
pub fn range(lo: char, hi: char) -> Rule {
    crate::invariants::ensure_char_range(lo, hi);
    Rule::from_kind(RuleKind::Char(CharClass::Range(lo, hi)))
}

/// Match any character not contained in `set`.
///
/// # Panics
/// Panics if `set` is empty.
pub fn none_of(set: &str) -> Rule {
    crate::invariants::ensure_char_set(set);
    Rule::from_kind(RuleKind::Char(CharClass::NotSet(Arc::from(set))))
}

/// Match any single character.
pub fn any() -> Rule {
    Rule::from_kind(RuleKind::Char(CharClass::Any))
}

/// Match one character for which `test` holds. `label` names the class in
/// grammar dumps and failure reports.
pub fn satisfy(label: &'static str, test: fn(char) -> bool) -> Rule {
    Rule::from_kind(RuleKind::Char(CharClass::Predicate { label, test }))
}

/// Match `text` exactly.
///
/// # Panics
/// Panics if `text` is empty. Use [`seq`] with no operands for an empty match.
pub fn literal(text: &str) -> Rule {
    crate::invariants::ensure_literal(text);
    Rule::from_kind(RuleKind::Literal(Arc::from(text)))
}

/// Match `pattern` anchored at the current position.
pub fn regex(pattern: &str) -> Result<Rule, GrammarError> {
    let matcher = RegexMatcher::new(pattern)?;
    Ok(Rule::from_kind(RuleKind::Regex(matcher)))
}

/// Match only at the end of input.
pub fn end() -> Rule {
    Rule::from_kind(RuleKind::End)
}

/// Match every rule in order. An empty sequence always matches.
pub fn seq(rules: impl IntoIterator<Item = Rule>) -> Rule {
    Rule::from_kind(RuleKind::Seq(rules.into_iter().collect()))
}

/// Ordered choice: the first alternative that matches wins.
///
/// # Panics
/// Panics if there are no alternatives.
pub fn choice(rules: impl IntoIterator<Item = Rule>) -> Rule {
    let rules: Vec<Rule> = rules.into_iter().collect();
    crate::invariants::ensure_alternatives(&rules);
    Rule::from_kind(RuleKind::Choice(rules))
}

/// Negative lookahead. Consumes nothing.
pub fn not(rule: Rule) -> Rule {
    Rule::from_kind(RuleKind::Not(rule))
}

/// Positive lookahead. Consumes nothing.
pub fn at(rule: Rule) -> Rule {
    Rule::from_kind(RuleKind::At(rule))
}

pub fn zero_or_more(rule: Rule) -> Rule {
    Rule::from_kind(RuleKind::ZeroOrMore(rule))
}

pub fn one_or_more(rule: Rule) -> Rule {
    Rule::from_kind(RuleKind::OneOrMore(rule))
}

pub fn opt(rule: Rule) -> Rule {
    Rule::from_kind(RuleKind::Opt(rule))
}

/// Capture what `rule` matches as a token named after this node's
/// registered name. Tokens emitted inside become its children.
pub fn node(rule: Rule) -> Rule {
    Rule::from_kind(RuleKind::Node(rule))
}

/// Defer to the rule `supplier` returns, resolved on first use and cached.
///
/// This is how self-referential grammars are written: the supplier can
/// name a rule that does not exist yet when this one is built.
pub fn recursive(supplier: impl Fn() -> Rule + Send + Sync + 'static) -> Rule {
    Rule::from_kind(RuleKind::Recursive(Lazy {
        cell: OnceLock::new(),
        supplier: Box::new(supplier),
    }))
}
