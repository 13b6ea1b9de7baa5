//! The per-parse cursor and token log.
//!
//! A [`ParseState`] is a value: cloning it yields an independent state that
//! shares nothing mutable with the original. Combinators try alternatives on
//! a clone and [`assign`](ParseState::assign) it back only on success, so a
//! failed attempt can never leak position or tokens to its caller.
//!
//! The emitted tokens are kept in a persistent list (newest first, shared
//! tails). A clone bumps one reference count instead of copying every token
//! emitted so far, which keeps clone-before-attempt linear in the input.

use std::sync::Arc;

use pegtree_core::Token;

#[derive(Clone, Debug)]
pub struct ParseState {
    input: Arc<str>,
    position: usize,
    emitted: Emitted,
}

impl ParseState {
    /// Fresh state at offset 0 with nothing emitted.
    pub fn new(input: impl Into<Arc<str>>) -> Self {
        Self {
            input: input.into(),
            position: 0,
            emitted: Emitted::default(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn input_arc(&self) -> &Arc<str> {
        &self.input
    }

    /// Byte offset of the cursor. Always on a char boundary.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unconsumed suffix of the input.
    pub fn remainder(&self) -> &str {
        &self.input[self.position..]
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.input.len()
    }

    /// Tokens emitted so far, oldest first.
    pub fn emitted(&self) -> Vec<Token> {
        self.emitted.to_vec()
    }

    pub fn emitted_len(&self) -> usize {
        self.emitted.len()
    }

    /// Overwrite position and emitted tokens with `other`'s.
    pub fn assign(&mut self, other: ParseState) {
        self.ensure_same_input(&other);
        self.position = other.position;
        self.emitted = other.emitted;
    }

    /// Same input and position, nothing emitted. Node captures run their
    /// inner rule in a scope so its tokens become the node's children.
    pub(crate) fn scope(&self) -> Self {
        Self {
            input: self.input.clone(),
            position: self.position,
            emitted: Emitted::default(),
        }
    }

    pub(crate) fn advance(&mut self, len: usize) {
        self.set_position(self.position + len);
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.ensure_valid_position(position);
        self.position = position;
    }

    pub(crate) fn push(&mut self, token: Token) {
        self.emitted.push(token);
    }

    /// Tokens pushed after the log had `mark` entries, oldest first.
    pub(crate) fn emitted_since(&self, mark: usize) -> Vec<Token> {
        self.emitted.since(mark)
    }

    pub(crate) fn into_tokens(self) -> Vec<Token> {
        self.emitted.to_vec()
    }
}

/// Persistent singly-linked token log.
#[derive(Clone, Debug, Default)]
struct Emitted(Option<Arc<Link>>);

#[derive(Debug)]
struct Link {
    token: Token,
    len: usize,
    prev: Emitted,
}

impl Emitted {
    fn len(&self) -> usize {
        self.0.as_ref().map_or(0, |link| link.len)
    }

    fn push(&mut self, token: Token) {
        let prev = std::mem::take(self);
        let len = prev.len() + 1;
        self.0 = Some(Arc::new(Link { token, len, prev }));
    }

    fn since(&self, mark: usize) -> Vec<Token> {
        let mut out = Vec::with_capacity(self.len().saturating_sub(mark));
        let mut cursor = self.0.as_deref();
        while let Some(link) = cursor {
            if link.len <= mark {
                break;
            }
            out.push(link.token.clone());
            cursor = link.prev.0.as_deref();
        }
        out.reverse();
        out
    }

    fn to_vec(&self) -> Vec<Token> {
        self.since(0)
    }
}

impl Drop for Link {
    // Unlink iteratively so a long log does not recurse once per token.
    fn drop(&mut self) {
        let mut next = self.prev.0.take();
        while let Some(link) = next {
            match Arc::try_unwrap(link) {
                Ok(mut owned) => next = owned.prev.0.take(),
                Err(_) => break,
            }
        }
    }
}
