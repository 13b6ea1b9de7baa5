use std::sync::Arc;

use indoc::indoc;

use crate::{Colors, Span, Token};

fn pair() -> Token {
    let source: Arc<str> = Arc::from(r#""k" : <1&2>"#);
    let key = Token::leaf("String", source.clone(), Span::new(0, 3));
    let value = Token::leaf("Raw", source.clone(), Span::new(6, 11));
    let empty = Token::leaf("Empty", source.clone(), Span::new(11, 11));
    Token::new("Pair", source, Span::new(0, 11), vec![key, value, empty])
}

#[test]
fn outline_dump() {
    insta::assert_snapshot!(pair().dump(), @r#"
    Pair
      String "\"k\""
      Raw "<1&2>"
      Empty ""
    "#);
}

#[test]
fn display_matches_dump() {
    let token = pair();
    assert_eq!(token.to_string(), token.dump());
}

#[test]
fn colored_outline_wraps_names_and_text() {
    let source: Arc<str> = Arc::from("x");
    let leaf = Token::leaf("Ident", source, Span::new(0, 1));

    let out = leaf.format(Colors::ON);
    assert_eq!(out, "\x1b[34mIdent\x1b[0m \x1b[32m\"x\"\x1b[0m");
}

#[test]
fn xml_export_nests_and_escapes() {
    assert_eq!(
        pair().to_xml(),
        "<Pair><String>&quot;k&quot;</String><Raw>&lt;1&amp;2&gt;</Raw><Empty/></Pair>"
    );
}

#[test]
fn json_export_leaf() {
    let source: Arc<str> = Arc::from("42");
    let leaf = Token::leaf("Integer", source, Span::new(0, 2));

    assert_eq!(
        leaf.to_json(false),
        r#"{"name":"Integer","span":[0,2],"text":"42"}"#
    );
}

#[test]
fn json_export_composite_pretty() {
    let source: Arc<str> = Arc::from("[7]");
    let item = Token::leaf("Integer", source.clone(), Span::new(1, 2));
    let array = Token::new("Array", source, Span::new(0, 3), vec![item]);

    let expected = indoc! {r#"
        {
          "name": "Array",
          "span": [
            0,
            3
          ],
          "children": [
            {
              "name": "Integer",
              "span": [
                1,
                2
              ],
              "text": "7"
            }
          ]
        }"#};
    assert_eq!(array.to_json(true), expected);
}

#[test]
fn color_switch() {
    assert!(Colors::new(true).is_enabled());
    assert!(!Colors::new(false).is_enabled());
    assert!(!Colors::default().is_enabled());

    let on = Colors::ON;
    assert_eq!(on.paint(on.red, "x"), "\x1b[31mx\x1b[0m");
    let off = Colors::OFF;
    assert_eq!(off.paint(off.red, "x"), "x");
}
