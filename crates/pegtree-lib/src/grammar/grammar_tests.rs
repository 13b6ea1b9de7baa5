use indoc::indoc;

use super::*;
use crate::rule::{ch, choice, literal, node, one_or_more, range, recursive, seq, zero_or_more};

#[test]
fn registration_binds_names() {
    let digit = range('0', '9');
    let number = node(one_or_more(digit.clone()));
    let grammar = Grammar::builder("numbers")
        .rule("Number", number.clone())
        .rule("Digit", digit.clone())
        .build()
        .unwrap();

    assert_eq!(number.name(), Some("Number"));
    assert_eq!(digit.name(), Some("Digit"));
    assert_eq!(grammar.name(), "numbers");
    assert_eq!(grammar.len(), 2);
    assert!(grammar.rule("Number").unwrap().ptr_eq(&number));
    assert!(grammar.rule("Missing").is_none());
}

#[test]
fn root_defaults_to_first_rule() {
    let grammar = Grammar::builder("g")
        .rule("A", node(ch('a')))
        .rule("B", node(ch('b')))
        .build()
        .unwrap();
    assert_eq!(grammar.root_name(), "A");

    let grammar = Grammar::builder("g")
        .rule("C", node(ch('c')))
        .rule("D", node(ch('d')))
        .root("D")
        .build()
        .unwrap();
    assert_eq!(grammar.root_name(), "D");
    assert_eq!(grammar.parse("d").unwrap().name(), "D");
}

#[test]
fn rules_iterate_in_declaration_order() {
    let grammar = Grammar::builder("g")
        .rule("Zed", ch('z'))
        .rule("Alpha", ch('a'))
        .rule("Mid", ch('m'))
        .build()
        .unwrap();

    let names: Vec<_> = grammar.rules().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["Zed", "Alpha", "Mid"]);
}

#[test]
fn node_tokens_take_registered_names() {
    let key = node(one_or_more(range('a', 'z')));
    let value = node(one_or_more(range('0', '9')));
    let pair = node(seq([key.clone(), ch('='), value.clone()]));
    let grammar = Grammar::builder("pairs")
        .rule("Pair", pair)
        .rule("Key", key)
        .rule("Value", value)
        .build()
        .unwrap();

    let tree = grammar.parse("x=42").unwrap();
    insta::assert_snapshot!(tree.dump(), @r#"
    Pair
      Key "x"
      Value "42"
    "#);
    assert_eq!(tree.child_by_name("Value").unwrap().text(), "42");
}

#[test]
fn dump_prints_definitions_with_references() {
    let digit = range('0', '9');
    let number = node(one_or_more(digit.clone()));
    let list = node(seq([
        ch('['),
        number.clone(),
        zero_or_more(seq([ch(','), number.clone()])),
        ch(']'),
    ]));
    let grammar = Grammar::builder("list")
        .rule("List", list)
        .rule("Number", number)
        .rule("Digit", digit)
        .build()
        .unwrap();

    assert_eq!(
        grammar.dump(),
        indoc! {"
            List <- @List('[' Number (',' Number)* ']')
            Number <- @Number(Digit+)
            Digit <- [0-9]
        "}
    );
}

#[test]
fn dump_follows_recursive_references() {
    let grammar_slot: std::sync::Arc<std::sync::OnceLock<Rule>> = Default::default();
    let reference = {
        let slot = grammar_slot.clone();
        recursive(move || slot.get().cloned().expect("defined before use"))
    };
    let group = node(seq([ch('('), zero_or_more(reference), ch(')')]));
    grammar_slot.set(group.clone()).unwrap();

    let grammar = Grammar::builder("groups")
        .rule("Group", group)
        .build()
        .unwrap();
    assert_eq!(grammar.dump(), "Group <- @Group('(' Group* ')')\n");
    assert_eq!(grammar.parse("(()())").unwrap().node_count(), 2);
}

#[test]
fn duplicate_name_is_rejected() {
    let err = Grammar::builder("g")
        .rule("A", ch('a'))
        .rule("A", ch('b'))
        .build()
        .unwrap_err();
    assert_eq!(err, GrammarError::DuplicateRule("A".into()));
}

#[test]
fn one_rule_under_two_names_is_rejected() {
    let shared = ch('a');
    let err = Grammar::builder("g")
        .rule("First", shared.clone())
        .rule("Second", shared.clone())
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        GrammarError::RuleAlreadyNamed {
            rule: "First".into(),
            name: "Second".into(),
        }
    );
    assert_eq!(shared.name(), None);
}

#[test]
fn rule_named_by_another_grammar_is_rejected() {
    let shared = ch('a');
    Grammar::builder("one")
        .rule("Letter", shared.clone())
        .build()
        .unwrap();

    let err = Grammar::builder("two")
        .rule("Char", shared.clone())
        .build()
        .unwrap_err();
    assert!(matches!(err, GrammarError::RuleAlreadyNamed { .. }));

    // The same name is fine.
    assert!(Grammar::builder("three").rule("Letter", shared).build().is_ok());
}

#[test]
fn unregistered_node_is_rejected() {
    let hidden = node(ch('x'));
    let err = Grammar::builder("g")
        .rule("Outer", seq([hidden.clone(), ch('y')]))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        GrammarError::UnnamedNode {
            rule: "Outer".into()
        }
    );
    assert_eq!(hidden.name(), None);
}

#[test]
fn empty_names_are_rejected() {
    let err = Grammar::builder("").rule("A", ch('a')).build().unwrap_err();
    assert_eq!(err, GrammarError::EmptyName);

    let err = Grammar::builder("g").rule("", ch('a')).build().unwrap_err();
    assert_eq!(err, GrammarError::EmptyName);
}

#[test]
fn root_must_be_registered() {
    let err = Grammar::builder("g")
        .rule("A", ch('a'))
        .root("B")
        .build()
        .unwrap_err();
    assert_eq!(err, GrammarError::UnknownRoot("B".into()));

    let err = Grammar::builder("g").build().unwrap_err();
    assert_eq!(err, GrammarError::MissingRoot);
}

#[test]
fn grammar_parser_uses_root() {
    let grammar = Grammar::builder("g")
        .rule("Keyword", node(choice([literal("let"), literal("fn")])))
        .build()
        .unwrap();

    let parser = grammar.parser().exec_fuel(100).build();
    assert!(parser.root().ptr_eq(grammar.root()));
    assert_eq!(parser.parse("fn").unwrap().name(), "Keyword");
}
