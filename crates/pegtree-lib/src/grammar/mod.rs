//! Grammar registration.
//!
//! A [`Grammar`] is an explicit table from rule name to [`Rule`], built once
//! by its author. Registering a rule binds its name, which is how node rules
//! label the tokens they capture and how grammar dumps refer to sub-rules.

mod error;

#[cfg(test)]
mod grammar_tests;

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::Arc;

use indexmap::IndexMap;
use pegtree_core::Token;

pub use error::GrammarError;

use crate::engine::{ParseError, ParserBuilder};
use crate::rule::Rule;

/// A named set of rules with a designated root.
#[derive(Clone, Debug)]
pub struct Grammar {
    name: Arc<str>,
    rules: IndexMap<Arc<str>, Rule>,
    root: Arc<str>,
}

impl Grammar {
    pub fn builder(name: impl Into<Arc<str>>) -> GrammarBuilder {
        GrammarBuilder {
            name: name.into(),
            rules: Vec::new(),
            root: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root_name(&self) -> &str {
        &self.root
    }

    pub fn root(&self) -> &Rule {
        // The builder only accepts registered roots.
        &self.rules[&self.root]
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Registered rules in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (&**name, rule))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// A parser builder rooted at this grammar's root.
    pub fn parser(&self) -> ParserBuilder {
        ParserBuilder::new(self.root().clone())
    }

    /// Parse all of `input` from the root with default limits.
    pub fn parse(&self, input: &str) -> Result<Token, ParseError> {
        self.parser().build().parse_complete(input)
    }

    /// Every rule as `Name <- definition`, in declaration order.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (name, rule) in &self.rules {
            // Writing to a String cannot fail.
            let _ = writeln!(out, "{name} <- {rule}");
        }
        out
    }
}

/// Collects registrations for a [`Grammar`].
#[derive(Debug)]
pub struct GrammarBuilder {
    name: Arc<str>,
    rules: Vec<(Arc<str>, Rule)>,
    root: Option<Arc<str>>,
}

impl GrammarBuilder {
    /// Register `rule` under `name`.
    pub fn rule(mut self, name: impl Into<Arc<str>>, rule: Rule) -> Self {
        self.rules.push((name.into(), rule));
        self
    }

    /// Use the rule registered as `name` as the root. Defaults to the first
    /// registered rule.
    pub fn root(mut self, name: impl Into<Arc<str>>) -> Self {
        self.root = Some(name.into());
        self
    }

    /// Check the registrations, then bind every rule's name.
    ///
    /// Nothing is bound unless every check passes.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if self.name.is_empty() {
            return Err(GrammarError::EmptyName);
        }

        let mut rules: IndexMap<Arc<str>, Rule> = IndexMap::with_capacity(self.rules.len());
        for (name, rule) in self.rules {
            if name.is_empty() {
                return Err(GrammarError::EmptyName);
            }
            if let Some(bound) = rule.name().filter(|bound| *bound != &*name) {
                return Err(GrammarError::RuleAlreadyNamed {
                    rule: bound.to_string(),
                    name: name.to_string(),
                });
            }
            if rules.contains_key(&name) {
                return Err(GrammarError::DuplicateRule(name.to_string()));
            }
            rules.insert(name, rule);
        }

        let mut registered: HashSet<usize> = HashSet::with_capacity(rules.len());
        for (name, rule) in &rules {
            if !registered.insert(rule.id()) {
                // Same rule under two names.
                let first = rules
                    .iter()
                    .find(|(_, other)| other.ptr_eq(rule))
                    .map_or_else(String::new, |(first, _)| first.to_string());
                return Err(GrammarError::RuleAlreadyNamed {
                    rule: first,
                    name: name.to_string(),
                });
            }
        }

        ensure_nodes_registered(&rules, &registered)?;

        let root = match self.root {
            Some(root) if rules.contains_key(&root) => root,
            Some(root) => return Err(GrammarError::UnknownRoot(root.to_string())),
            None => match rules.keys().next() {
                Some(first) => first.clone(),
                None => return Err(GrammarError::MissingRoot),
            },
        };

        for (name, rule) in &rules {
            rule.bind_name(name)?;
        }

        Ok(Grammar {
            name: self.name,
            rules,
            root,
        })
    }
}

/// Every node reachable from a registered rule must be named once the
/// grammar binds its registrations. Recursive references are not followed:
/// their targets cannot be resolved while a grammar is still being built.
fn ensure_nodes_registered(
    rules: &IndexMap<Arc<str>, Rule>,
    registered: &HashSet<usize>,
) -> Result<(), GrammarError> {
    let mut visited = HashSet::new();
    for (name, rule) in rules {
        let mut stack = vec![rule];
        while let Some(current) = stack.pop() {
            if !visited.insert(current.id()) {
                continue;
            }
            if current.is_node() && current.name().is_none() && !registered.contains(&current.id())
            {
                return Err(GrammarError::UnnamedNode {
                    rule: name.to_string(),
                });
            }
            stack.extend(current.operands());
        }
    }
    Ok(())
}
