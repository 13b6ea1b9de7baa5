//! Parse entry points.

use pegtree_core::{Span, Token};

use super::context::Context;
use super::error::ParseError;
use super::limits::FuelLimits;
use super::state::ParseState;
use super::trace::{NoopTracer, Tracer};
use crate::rule::Rule;

/// Name of the synthesized root token when the root rule is unregistered.
const ANONYMOUS_ROOT: &str = "root";

/// Apply `root` to `input` with default limits.
///
/// Trailing input is not an error here; wrap the root with
/// [`end`](crate::rule::end) or use [`Parser::parse_complete`] to require it.
pub fn parse(root: &Rule, input: &str) -> Result<Token, ParseError> {
    Parser::new(root.clone()).parse(input)
}

/// A configured root rule, reusable across inputs and threads.
#[derive(Clone, Debug)]
pub struct Parser {
    root: Rule,
    limits: FuelLimits,
    memoize: bool,
}

/// Builder for [`Parser`] instances.
#[derive(Clone, Debug)]
pub struct ParserBuilder {
    root: Rule,
    limits: FuelLimits,
    memoize: bool,
}

impl ParserBuilder {
    pub fn new(root: Rule) -> Self {
        Self {
            root,
            limits: FuelLimits::default(),
            memoize: false,
        }
    }

    /// Set the fuel limits.
    pub fn limits(mut self, limits: FuelLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits = self.limits.exec_fuel(fuel);
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits = self.limits.recursion_limit(limit);
        self
    }

    /// Cache registered rules' outcomes per position.
    ///
    /// Replays cost no fuel or depth, so a memoized parse can succeed under
    /// limits the plain parse would exceed.
    pub fn memoize(mut self, enabled: bool) -> Self {
        self.memoize = enabled;
        self
    }

    pub fn build(self) -> Parser {
        Parser {
            root: self.root,
            limits: self.limits,
            memoize: self.memoize,
        }
    }
}

impl Parser {
    pub fn new(root: Rule) -> Self {
        ParserBuilder::new(root).build()
    }

    pub fn builder(root: Rule) -> ParserBuilder {
        ParserBuilder::new(root)
    }

    pub fn root(&self) -> &Rule {
        &self.root
    }

    pub fn limits(&self) -> FuelLimits {
        self.limits
    }

    /// Match the root against a prefix of `input`.
    pub fn parse(&self, input: &str) -> Result<Token, ParseError> {
        self.run(input, false, &mut NoopTracer)
    }

    /// Match the root against all of `input`.
    pub fn parse_complete(&self, input: &str) -> Result<Token, ParseError> {
        self.run(input, true, &mut NoopTracer)
    }

    /// [`parse`](Self::parse), reporting every step to `tracer`.
    pub fn parse_with<T: Tracer>(&self, input: &str, tracer: &mut T) -> Result<Token, ParseError> {
        self.run(input, false, tracer)
    }

    /// [`parse_complete`](Self::parse_complete), reporting every step to `tracer`.
    pub fn parse_complete_with<T: Tracer>(
        &self,
        input: &str,
        tracer: &mut T,
    ) -> Result<Token, ParseError> {
        self.run(input, true, tracer)
    }

    fn run<T: Tracer>(
        &self,
        input: &str,
        complete: bool,
        tracer: &mut T,
    ) -> Result<Token, ParseError> {
        let mut state = ParseState::new(input);
        let mut cx = Context::new(self.limits, self.memoize, tracer);

        let matched = self.root.apply(&mut state, &mut cx);
        if let Some(fatal) = cx.take_fatal() {
            return Err(fatal);
        }
        if !matched {
            return Err(ParseError::NoMatch(cx.failure()));
        }

        let consumed = state.position();
        if complete && !state.is_at_end() {
            cx.expected(consumed, || "end of input".to_string());
            return Err(ParseError::Incomplete {
                consumed,
                failure: cx.failure(),
            });
        }

        Ok(root_token(&self.root, state))
    }
}

/// The root rule's single token when it covers the whole match, otherwise a
/// token named after the root spanning the match with everything emitted as
/// children.
fn root_token(root: &Rule, state: ParseState) -> Token {
    let source = state.input_arc().clone();
    let matched = Span::new(0, state.position());
    let mut tokens = state.into_tokens();

    if tokens.len() == 1 && tokens[0].span() == matched {
        if let Some(only) = tokens.pop() {
            return only;
        }
    }

    let name = root.name().unwrap_or(ANONYMOUS_ROOT);
    Token::new(name, source, matched, tokens)
}
