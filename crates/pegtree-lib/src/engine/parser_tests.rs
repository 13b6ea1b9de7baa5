use std::sync::{Arc, OnceLock};

use pegtree_core::Span;

use super::*;
use crate::Grammar;
use crate::rule::{
    Rule, at, ch, choice, end, literal, node, not, one_or_more, opt, range, recursive, seq,
    zero_or_more,
};

fn digits_grammar() -> Grammar {
    let number = node(one_or_more(range('0', '9')));
    let list = node(seq([
        number.clone(),
        zero_or_more(seq([ch(','), number.clone()])),
    ]));
    Grammar::builder("digits")
        .rule("List", list)
        .rule("Number", number)
        .build()
        .unwrap()
}

/// `Nest <- '(' Nest? ')'`, unregistered.
fn nesting() -> Rule {
    let slot: Arc<OnceLock<Rule>> = Arc::new(OnceLock::new());
    let reference = {
        let slot = slot.clone();
        recursive(move || slot.get().cloned().expect("defined before use"))
    };
    let rule = seq([ch('('), opt(reference), ch(')')]);
    slot.set(rule.clone()).unwrap();
    rule
}

#[test]
fn single_spanning_token_is_the_root() {
    let grammar = digits_grammar();
    let tree = grammar.parse("1,22,333").unwrap();

    insta::assert_snapshot!(tree.dump(), @r#"
    List
      Number "1"
      Number "22"
      Number "333"
    "#);
}

#[test]
fn root_is_synthesized_around_loose_tokens() {
    let pair = seq([node(ch('a')), node(ch('b'))]);
    let tree = parse(&pair, "ab").unwrap();

    assert_eq!(tree.name(), "root");
    assert_eq!(tree.span(), Span::new(0, 2));
    assert_eq!(tree.node_count(), 2);
}

#[test]
fn synthesized_root_takes_registered_name() {
    let word = node(one_or_more(range('a', 'z')));
    let padded = seq([ch(' '), word.clone(), ch(' ')]);
    let grammar = Grammar::builder("padded")
        .rule("Padded", padded)
        .rule("Word", word)
        .build()
        .unwrap();

    let tree = grammar.parse(" hi ").unwrap();
    insta::assert_snapshot!(tree.dump(), @r#"
    Padded
      Word "hi"
    "#);
}

#[test]
fn empty_match_without_tokens_is_an_empty_leaf() {
    let tree = parse(&zero_or_more(ch('x')), "abc").unwrap();
    assert!(tree.is_leaf());
    assert_eq!(tree.text(), "");
}

#[test]
fn parse_accepts_a_prefix() {
    let grammar = digits_grammar();
    let tree = grammar.parser().build().parse("12;").unwrap();
    assert_eq!(tree.text(), "12");
}

#[test]
fn parse_complete_rejects_trailing_input() {
    let grammar = digits_grammar();
    let err = grammar.parse("12;").unwrap_err();

    let ParseError::Incomplete { consumed, failure } = &err else {
        panic!("expected Incomplete, got {err:?}");
    };
    assert_eq!(*consumed, 2);
    assert_eq!(failure.furthest, 2);
    assert!(failure.expected.contains(&"end of input".to_string()));
    assert!(failure.expected.contains(&"[0-9]".to_string()));
}

#[test]
fn no_match_reports_furthest_expectations() {
    let rule = seq([literal("ab"), choice([ch('c'), ch('d')])]);
    let err = parse(&rule, "abx").unwrap_err();

    let ParseError::NoMatch(failure) = &err else {
        panic!("expected NoMatch, got {err:?}");
    };
    assert_eq!(
        failure,
        &Failure {
            furthest: 2,
            expected: vec!["'c'".to_string(), "'d'".to_string()],
        }
    );
    assert_eq!(err.to_string(), "no match: expected 'c' or 'd' at byte 2");
    assert_eq!(err.furthest(), Some(2));
}

#[test]
fn failure_message_lists_alternatives() {
    let failure = Failure {
        furthest: 7,
        expected: vec!["'a'".into(), "'b'".into(), "'c'".into()],
    };
    assert_eq!(failure.to_string(), "expected 'a', 'b' or 'c' at byte 7");

    let nothing = Failure {
        furthest: 0,
        expected: vec![],
    };
    assert_eq!(nothing.to_string(), "unexpected input at byte 0");
}

#[test]
fn failed_lookahead_is_the_expectation() {
    let rule = seq([not(ch('a')), ch('b')]);
    let err = parse(&rule, "a").unwrap_err();
    assert_eq!(err.failure().unwrap().expected, ["!'a'"]);

    let rule = seq([ch('a'), at(literal("bc"))]);
    let err = parse(&rule, "abx").unwrap_err();
    assert_eq!(
        err.failure().unwrap(),
        &Failure {
            furthest: 1,
            expected: vec!["&'bc'".to_string()],
        }
    );
}

#[test]
fn lookahead_boundary_moves_the_furthest_position() {
    let integer = seq([one_or_more(range('0', '9')), not(ch('.'))]);
    let err = parse(&integer, "42.5").unwrap_err();

    assert_eq!(err.furthest(), Some(2));
    assert_eq!(
        err.to_string(),
        "no match: expected [0-9] or !'.' at byte 2"
    );
}

#[test]
fn failure_serializes_as_position_and_expectations() {
    let rule = seq([literal("ab"), choice([ch('c'), ch('d')])]);
    let err = parse(&rule, "abx").unwrap_err();

    let value = serde_json::to_value(err.failure().unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"furthest": 2, "expected": ["'c'", "'d'"]})
    );
}

#[test]
fn exec_fuel_aborts() {
    let parser = Parser::builder(zero_or_more(ch('a'))).exec_fuel(10).build();
    let err = parser.parse(&"a".repeat(50)).unwrap_err();

    assert!(matches!(err, ParseError::ExecFuelExhausted(10)));
    assert_eq!(err.furthest(), None);
}

#[test]
fn exact_fuel_budget_suffices() {
    let parser = Parser::builder(seq([ch('a'), end()])).exec_fuel(3).build();
    assert!(parser.parse("a").is_ok());
}

#[test]
fn recursion_limit_aborts() {
    let parser = Parser::builder(nesting()).recursion_limit(8).build();
    let input = format!("{}{}", "(".repeat(10), ")".repeat(10));
    let err = parser.parse(&input).unwrap_err();

    assert!(matches!(err, ParseError::RecursionLimitExceeded(8)));
}

#[test]
fn recursion_within_limit_succeeds() {
    let parser = Parser::builder(nesting())
        .limits(FuelLimits::new().recursion_limit(256))
        .build();
    let input = format!("{}{}", "(".repeat(10), ")".repeat(10));
    assert_eq!(parser.parse(&input).unwrap().text(), input);
}

#[test]
fn fuel_limit_defaults() {
    let limits = FuelLimits::default();
    assert_eq!(limits.get_exec_fuel(), None);
    assert_eq!(limits.get_recursion_limit(), 1024);
    assert_eq!(limits.exec_fuel(5).unlimited_exec_fuel(), limits);
}

/// Two alternatives sharing a registered prefix, so the prefix is applied
/// twice at the same position.
fn shared_prefix_grammar() -> Grammar {
    let word = node(one_or_more(range('a', 'z')));
    let call = node(seq([word.clone(), ch('('), ch(')')]));
    let index = node(seq([word.clone(), ch('['), ch(']')]));
    let expr = choice([call.clone(), index.clone(), word.clone()]);
    Grammar::builder("shared")
        .rule("Expr", expr)
        .rule("Call", call)
        .rule("Index", index)
        .rule("Word", word)
        .build()
        .unwrap()
}

#[test]
fn memoization_preserves_results() {
    let grammar = shared_prefix_grammar();
    let plain = grammar.parser().build();
    let memo = grammar.parser().memoize(true).build();

    for input in ["abc()", "abc[]", "abc", "abc(", "(", ""] {
        match (plain.parse_complete(input), memo.parse_complete(input)) {
            (Ok(a), Ok(b)) => assert_eq!(a, b, "{input}"),
            (Err(a), Err(b)) => assert_eq!(a.failure(), b.failure(), "{input}"),
            (a, b) => panic!("{input}: {a:?} vs {b:?}"),
        }
    }
}

#[test]
fn memoization_replays_registered_rules() {
    let grammar = shared_prefix_grammar();
    let input = "abcdefgh[]";

    let fuel_with = |memoize: bool| {
        let mut state = ParseState::new(input);
        let mut tracer = NoopTracer;
        let mut cx = Context::new(FuelLimits::default(), memoize, &mut tracer);
        assert!(grammar.root().apply(&mut state, &mut cx));
        (cx.fuel_used(), cx.memo_len())
    };

    let (plain_fuel, plain_entries) = fuel_with(false);
    let (memo_fuel, memo_entries) = fuel_with(true);

    assert_eq!(plain_entries, 0);
    assert!(memo_entries > 0);
    assert!(memo_fuel < plain_fuel, "{memo_fuel} >= {plain_fuel}");
}

#[test]
fn memoization_can_fit_a_budget_the_plain_parse_exceeds() {
    let grammar = shared_prefix_grammar();
    let input = "abcdefgh[]";

    let mut state = ParseState::new(input);
    let mut tracer = NoopTracer;
    let mut cx = Context::new(FuelLimits::default(), true, &mut tracer);
    assert!(grammar.root().apply(&mut state, &mut cx));
    let budget = cx.fuel_used();

    let memo = grammar.parser().memoize(true).exec_fuel(budget).build();
    let plain = grammar.parser().exec_fuel(budget).build();

    assert!(memo.parse(input).is_ok());
    assert!(matches!(
        plain.parse(input),
        Err(ParseError::ExecFuelExhausted(limit)) if limit == budget
    ));
}
