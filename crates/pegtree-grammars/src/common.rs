//! Lexical building blocks.
//!
//! Every function returns a fresh, unnamed [`Rule`]. Grammars compose them
//! and register the parts they want to see as tokens.
//!
//! Whitespace handling follows one convention: a token-level rule consumes
//! the whitespace that *follows* it ([`token`], [`symbol`], [`keyword`]).
//! A grammar then only has to skip leading whitespace once, at its root.

use pegtree_lib::Rule;
use pegtree_lib::rule::{
    any, ch, choice, literal, none_of, not, one_of, one_or_more, opt, range, satisfy, seq,
    zero_or_more,
};

/// Spaces, tabs, carriage returns and newlines. Never fails.
pub fn ws() -> Rule {
    zero_or_more(one_of(" \t\r\n"))
}

/// Whitespace interleaved with `//` line comments and `/* */` block comments.
pub fn ws_with_comments() -> Rule {
    zero_or_more(choice([
        one_or_more(one_of(" \t\r\n")),
        line_comment("//"),
        block_comment("/*", "*/"),
    ]))
}

pub fn digit() -> Rule {
    range('0', '9')
}

pub fn hex_digit() -> Rule {
    satisfy("hex digit", |c| c.is_ascii_hexdigit())
}

/// Any alphabetic character, Unicode included.
pub fn letter() -> Rule {
    satisfy("letter", char::is_alphabetic)
}

pub fn alnum() -> Rule {
    satisfy("alphanumeric", char::is_alphanumeric)
}

pub fn sign() -> Rule {
    one_of("+-")
}

pub fn digits() -> Rule {
    one_or_more(digit())
}

/// Digits not followed by a `.`, so `42.5` is not an integer.
pub fn integer() -> Rule {
    seq([digits(), not(ch('.'))])
}

/// `e` or `E`, an optional sign, then digits.
pub fn exponent() -> Rule {
    seq([one_of("eE"), opt(sign()), digits()])
}

/// Digits with a fractional part, an exponent, or both: `1.5`, `1e9`,
/// `2.5E-3`. Plain digits are not a float.
pub fn float() -> Rule {
    seq([
        digits(),
        choice([
            seq([ch('.'), digits(), opt(exponent())]),
            exponent(),
        ]),
    ])
}

/// A letter or `_`, then letters, digits, `_` or `.`.
pub fn identifier() -> Rule {
    seq([
        choice([letter(), ch('_')]),
        zero_or_more(choice([alnum(), one_of("_.")])),
    ])
}

/// A backslash escape: one of `\" \' \\ \/ \b \f \n \r \t`, or `\u` with
/// four hex digits.
pub fn escape() -> Rule {
    seq([
        ch('\\'),
        choice([
            one_of("\"'\\/bfnrt"),
            seq([ch('u'), hex_digit(), hex_digit(), hex_digit(), hex_digit()]),
        ]),
    ])
}

/// Text between two `quote` characters, with [`escape`] sequences inside.
pub fn quoted_string(quote: char) -> Rule {
    let plain = none_of(&format!("{quote}\\"));
    seq([ch(quote), zero_or_more(choice([escape(), plain])), ch(quote)])
}

/// `prefix` up to, not including, the next newline.
pub fn line_comment(prefix: &str) -> Rule {
    seq([literal(prefix), zero_or_more(seq([not(ch('\n')), any()]))])
}

/// `open` through the first `close`. Does not nest.
pub fn block_comment(open: &str, close: &str) -> Rule {
    seq([
        literal(open),
        zero_or_more(seq([not(literal(close)), any()])),
        literal(close),
    ])
}

/// `rule` followed by any whitespace.
pub fn token(rule: Rule) -> Rule {
    seq([rule, ws()])
}

/// The literal `text` as a [`token`].
pub fn symbol(text: &str) -> Rule {
    token(literal(text))
}

/// The literal `text` when no alphanumeric character follows it, so `null`
/// matches in `null,` but not in `nullable`.
pub fn word(text: &str) -> Rule {
    seq([literal(text), not(alnum())])
}

/// A [`word`] as a [`token`].
pub fn keyword(text: &str) -> Rule {
    token(word(text))
}

/// Zero or more `item`s separated by `separator`. No trailing separator.
pub fn list(item: Rule, separator: Rule) -> Rule {
    opt(seq([item.clone(), zero_or_more(seq([separator, item]))]))
}
