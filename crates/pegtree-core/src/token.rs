//! The token tree produced by a successful parse.
//!
//! A [`Token`] is a named span over the source with ordered children. Leaves
//! (no children) carry their text through the span alone; composites carry
//! the tokens captured inside them. Tokens are immutable once built and cheap
//! to clone: the data sits behind an `Arc`, so cloning a parse state that
//! holds tokens only bumps reference counts.

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::Span;

/// A named node in the parse result tree.
#[derive(Clone)]
pub struct Token(Arc<TokenData>);

struct TokenData {
    name: Arc<str>,
    source: Arc<str>,
    span: Span,
    children: Vec<Token>,
}

impl Token {
    /// Build a token over `span` of `source`.
    ///
    /// # Panics
    /// Panics if the span is out of bounds, splits a char, or a child lies
    /// outside the span or out of order.
    pub fn new(
        name: impl Into<Arc<str>>,
        source: Arc<str>,
        span: Span,
        children: Vec<Token>,
    ) -> Self {
        let token = Self(Arc::new(TokenData {
            name: name.into(),
            source,
            span,
            children,
        }));
        token.ensure_well_formed();
        token
    }

    /// Build a childless token.
    pub fn leaf(name: impl Into<Arc<str>>, source: Arc<str>, span: Span) -> Self {
        Self::new(name, source, span, Vec::new())
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Shared handle to the name, for callers that store it.
    pub fn name_arc(&self) -> &Arc<str> {
        &self.0.name
    }

    /// The full source text this token was parsed from.
    pub fn source(&self) -> &str {
        &self.0.source
    }

    pub fn source_arc(&self) -> &Arc<str> {
        &self.0.source
    }

    pub fn span(&self) -> Span {
        self.0.span
    }

    #[inline]
    pub fn begin(&self) -> usize {
        self.0.span.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.0.span.end
    }

    /// Source text covered by this token, `source[begin..end]`.
    ///
    /// For composites this includes any text between children that no
    /// child captured (whitespace, punctuation).
    pub fn text(&self) -> &str {
        &self.0.source[self.0.span.range()]
    }

    pub fn is_leaf(&self) -> bool {
        self.0.children.is_empty()
    }

    /// Number of direct children.
    pub fn node_count(&self) -> usize {
        self.0.children.len()
    }

    pub fn children(&self) -> &[Token] {
        &self.0.children
    }

    /// Child at `index`, in source order.
    pub fn child(&self, index: usize) -> Option<&Token> {
        self.0.children.get(index)
    }

    /// First direct child named `name`.
    pub fn child_by_name(&self, name: &str) -> Option<&Token> {
        self.0.children.iter().find(|c| c.name() == name)
    }

    /// All direct children named `name`, lazily, in source order.
    ///
    /// The iterator is `Clone`, so a query can be restarted from any point.
    pub fn children_by_name<'a>(&'a self, name: &'a str) -> ChildrenByName<'a> {
        ChildrenByName {
            children: self.0.children.iter(),
            name,
        }
    }

    /// Pre-order walk over this token and everything below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Whether both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &Token) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.name() == other.name()
            && self.span() == other.span()
            && self.text() == other.text()
            && self.children() == other.children()
    }
}

impl Eq for Token {}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Token");
        s.field("name", &self.name()).field("span", &self.span());
        if self.is_leaf() {
            s.field("text", &self.text());
        } else {
            s.field("children", &self.children());
        }
        s.finish()
    }
}

impl Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Token", 3)?;
        s.serialize_field("name", self.name())?;
        s.serialize_field("span", &self.span())?;
        if self.is_leaf() {
            s.serialize_field("text", self.text())?;
        } else {
            s.serialize_field("children", self.children())?;
        }
        s.end()
    }
}

/// Iterator over the direct children with a given name.
#[derive(Clone, Debug)]
pub struct ChildrenByName<'a> {
    children: std::slice::Iter<'a, Token>,
    name: &'a str,
}

impl<'a> Iterator for ChildrenByName<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.name;
        self.children.find(|c| c.name() == name)
    }
}

/// Pre-order iterator over a token subtree.
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Token>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.stack.pop()?;
        self.stack.extend(token.children().iter().rev());
        Some(token)
    }
}
