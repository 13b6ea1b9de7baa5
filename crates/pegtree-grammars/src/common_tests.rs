use pegtree_lib::{Rule, parse};

use crate::common::*;

/// Bytes `rule` consumes from the start of `input`, if it matches.
fn consumed(rule: Rule, input: &str) -> Option<usize> {
    parse(&rule, input).ok().map(|tree| tree.end())
}

#[test]
fn whitespace() {
    assert_eq!(consumed(ws(), " \t\n x"), Some(4));
    assert_eq!(consumed(ws(), "x"), Some(0));
    assert_eq!(consumed(ws(), ""), Some(0));
}

#[test]
fn whitespace_with_comments() {
    assert_eq!(consumed(ws_with_comments(), " // c\n /* b */ x"), Some(15));
    assert_eq!(consumed(ws_with_comments(), "// to the end"), Some(13));
    assert_eq!(consumed(ws_with_comments(), "/ x"), Some(0));
}

#[test]
fn integer_refuses_a_fraction() {
    assert_eq!(consumed(integer(), "42"), Some(2));
    assert_eq!(consumed(integer(), "42 "), Some(2));
    assert_eq!(consumed(integer(), "42.5"), None);
}

#[test]
fn float_needs_a_fraction_or_exponent() {
    assert_eq!(consumed(float(), "42.5"), Some(4));
    assert_eq!(consumed(float(), "1e9"), Some(3));
    assert_eq!(consumed(float(), "2.5E-3"), Some(6));
    assert_eq!(consumed(float(), "42"), None);
    assert_eq!(consumed(float(), "1."), None);
}

#[test]
fn identifier_start_and_continuation() {
    assert_eq!(consumed(identifier(), "_foo.bar2 rest"), Some(9));
    assert_eq!(consumed(identifier(), "été"), Some(5));
    assert_eq!(consumed(identifier(), "9abc"), None);
    assert_eq!(consumed(identifier(), ".x"), None);
}

#[test]
fn identifier_notation() {
    assert_eq!(
        identifier().to_string(),
        "(<letter> / '_') (<alphanumeric> / [_.])*"
    );
}

#[test]
fn hex_digits() {
    assert_eq!(consumed(hex_digit(), "F"), Some(1));
    assert_eq!(consumed(hex_digit(), "g"), None);
    assert_eq!(consumed(digit(), "7"), Some(1));
}

#[test]
fn quoted_strings_with_escapes() {
    let double = || quoted_string('"');
    assert_eq!(consumed(double(), r#""a\"b\u00e9" tail"#), Some(12));
    assert_eq!(consumed(double(), r#""it's""#), Some(6));
    assert_eq!(consumed(double(), r#""abc"#), None);
    assert_eq!(consumed(double(), r#""\q""#), None);
    assert_eq!(consumed(double(), r#""\u12""#), None);

    assert_eq!(consumed(quoted_string('\''), r#"'say "hi"'"#), Some(10));
}

#[test]
fn block_comments_do_not_nest() {
    let comment = || block_comment("/*", "*/");
    assert_eq!(consumed(comment(), "/* a */ b"), Some(7));
    assert_eq!(consumed(comment(), "/* /* */ */"), Some(8));
    assert_eq!(consumed(comment(), "/* a"), None);
}

#[test]
fn line_comment_stops_before_newline() {
    assert_eq!(consumed(line_comment("#"), "# note\nnext"), Some(6));
}

#[test]
fn tokens_fold_trailing_whitespace() {
    assert_eq!(consumed(symbol(","), ",  x"), Some(3));
    assert_eq!(consumed(token(digits()), "12\n\n"), Some(4));
}

#[test]
fn keyword_needs_a_word_boundary() {
    assert_eq!(consumed(keyword("null"), "null, x"), Some(4));
    assert_eq!(consumed(keyword("null"), "null  "), Some(6));
    assert_eq!(consumed(keyword("null"), "nullable"), None);
    assert_eq!(consumed(word("null"), "null  "), Some(4));
}

#[test]
fn separated_lists() {
    let numbers = || list(digits(), symbol(","));
    assert_eq!(consumed(numbers(), "1,2, 3"), Some(6));
    assert_eq!(consumed(numbers(), ""), Some(0));
    assert_eq!(consumed(numbers(), "1,"), Some(1));
}
