//! Errors raised while building rules and grammars.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// A regex primitive's pattern did not compile.
    #[error("invalid regex `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },

    /// Two registrations share a name.
    #[error("rule `{0}` is registered twice")]
    DuplicateRule(String),

    /// A rule already carries a different name, from this grammar or another.
    #[error("rule `{rule}` cannot also be registered as `{name}`")]
    RuleAlreadyNamed { rule: String, name: String },

    /// A node reachable from `rule` was never registered, so its tokens
    /// would have no name.
    #[error("rule `{rule}` contains a node that is not registered")]
    UnnamedNode { rule: String },

    #[error("grammar and rule names must not be empty")]
    EmptyName,

    #[error("root rule `{0}` is not registered")]
    UnknownRoot(String),

    #[error("grammar has no rules")]
    MissingRoot,
}
