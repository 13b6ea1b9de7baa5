//! Arithmetic expressions.
//!
//! ```text
//! Arithmetic <- ws Expression END
//! Expression <- SimpleExpr (BinaryOp ws SimpleExpr)*
//! SimpleExpr <- PrefixExpr / Number ws / '(' ws Expression ')' ws
//! PrefixExpr <- PrefixOp ws SimpleExpr
//! ```
//!
//! Operators have no precedence: `1 + 2 * 3` is one flat `Expression` with
//! five children. Precedence is left to whoever walks the tree.
//!
//! The tree's root is the `Expression` itself only when it covers the whole
//! input. Leading whitespace leaves it short of byte 0, so `"  42 "` parses
//! to an `Arithmetic` token whose single child is the `Expression`.

use std::sync::LazyLock;

use pegtree_lib::rule::{choice, end, literal, node, recursive, seq, zero_or_more};
use pegtree_lib::{Grammar, Rule};

use crate::common::{float, integer, symbol, token, ws};

/// Binary operators, longest first so `**` is not read as `*`.
pub const BINARY_OPERATORS: &[&str] = &[
    "**", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "*", "/", "%", "+", "-", "<", ">", "&",
    "|", "^",
];

pub const PREFIX_OPERATORS: &[&str] = &["-", "+", "!", "~"];

struct Rules {
    arithmetic: Rule,
    expression: Rule,
    simple_expr: Rule,
    prefix_expr: Rule,
    prefix_op: Rule,
    binary_op: Rule,
    number: Rule,
}

static RULES: LazyLock<Rules> = LazyLock::new(Rules::new);

static GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| {
    let rules = &*RULES;
    Grammar::builder("arithmetic")
        .rule("Arithmetic", rules.arithmetic.clone())
        .rule("Expression", rules.expression.clone())
        .rule("SimpleExpr", rules.simple_expr.clone())
        .rule("PrefixExpr", rules.prefix_expr.clone())
        .rule("PrefixOp", rules.prefix_op.clone())
        .rule("BinaryOp", rules.binary_op.clone())
        .rule("Number", rules.number.clone())
        .build()
        .expect("arithmetic grammar should register")
});

impl Rules {
    fn new() -> Self {
        let number = node(choice([float(), integer()]));
        let binary_op = node(operators(BINARY_OPERATORS));
        let prefix_op = node(operators(PREFIX_OPERATORS));

        let prefix_expr = node(seq([
            token(prefix_op.clone()),
            recursive(|| RULES.simple_expr.clone()),
        ]));
        let simple_expr = choice([
            prefix_expr.clone(),
            token(number.clone()),
            seq([
                symbol("("),
                recursive(|| RULES.expression.clone()),
                symbol(")"),
            ]),
        ]);
        let expression = node(seq([
            simple_expr.clone(),
            zero_or_more(seq([token(binary_op.clone()), simple_expr.clone()])),
        ]));
        let arithmetic = seq([ws(), expression.clone(), end()]);

        Self {
            arithmetic,
            expression,
            simple_expr,
            prefix_expr,
            prefix_op,
            binary_op,
            number,
        }
    }
}

fn operators(table: &[&str]) -> Rule {
    choice(table.iter().map(|op| literal(op)))
}

/// The arithmetic grammar, rooted at `Arithmetic`.
pub fn grammar() -> &'static Grammar {
    &GRAMMAR
}
