//! JSON values.
//!
//! Strings may also be single-quoted. Every value kind is its own token
//! (`Object`, `Array`, `Pair`, `String`, `Float`, `Integer`, `True`,
//! `False`, `Null`); `Value` itself is a plain choice and leaves no token.
//!
//! A document without surrounding whitespace parses to its value's token.
//! Otherwise the value does not span the input and the root is a `Json`
//! token wrapping it.

use std::sync::LazyLock;

use pegtree_lib::rule::{ch, choice, end, literal, node, opt, recursive, seq};
use pegtree_lib::{Grammar, Rule};

use crate::common::{self, list, quoted_string, symbol, token, word, ws};

struct Rules {
    json: Rule,
    value: Rule,
    object: Rule,
    pair: Rule,
    array: Rule,
    string: Rule,
    float: Rule,
    integer: Rule,
    true_: Rule,
    false_: Rule,
    null: Rule,
}

static RULES: LazyLock<Rules> = LazyLock::new(Rules::new);

static GRAMMAR: LazyLock<Grammar> = LazyLock::new(|| {
    let rules = &*RULES;
    Grammar::builder("json")
        .rule("Json", rules.json.clone())
        .rule("Value", rules.value.clone())
        .rule("Object", rules.object.clone())
        .rule("Pair", rules.pair.clone())
        .rule("Array", rules.array.clone())
        .rule("String", rules.string.clone())
        .rule("Float", rules.float.clone())
        .rule("Integer", rules.integer.clone())
        .rule("True", rules.true_.clone())
        .rule("False", rules.false_.clone())
        .rule("Null", rules.null.clone())
        .build()
        .expect("json grammar should register")
});

impl Rules {
    fn new() -> Self {
        let value = || recursive(|| RULES.value.clone());

        let string = node(choice([quoted_string('"'), quoted_string('\'')]));
        let float = node(seq([opt(ch('-')), common::float()]));
        let integer = node(seq([opt(ch('-')), common::integer()]));
        let true_ = node(word("true"));
        let false_ = node(word("false"));
        let null = node(word("null"));

        let pair = node(seq([token(string.clone()), symbol(":"), value()]));
        let object = node(seq([
            symbol("{"),
            list(token(pair.clone()), symbol(",")),
            literal("}"),
        ]));
        let array = node(seq([
            symbol("["),
            list(token(value()), symbol(",")),
            literal("]"),
        ]));

        // Float before Integer: `integer` refuses digits followed by `.`,
        // but `1e5` would otherwise stop after `1`.
        let value_rule = choice([
            object.clone(),
            array.clone(),
            string.clone(),
            float.clone(),
            integer.clone(),
            true_.clone(),
            false_.clone(),
            null.clone(),
        ]);
        let json = seq([ws(), value_rule.clone(), ws(), end()]);

        Self {
            json,
            value: value_rule,
            object,
            pair,
            array,
            string,
            float,
            integer,
            true_,
            false_,
            null,
        }
    }
}

/// The JSON grammar, rooted at `Json`.
pub fn grammar() -> &'static Grammar {
    &GRAMMAR
}
