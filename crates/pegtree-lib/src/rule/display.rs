//! PEG notation for rules.
//!
//! ```text
//! 'lit'  [abc]  [a-z]  [^abc]  .  <letter>  /re/  END
//! a b    a / b  !a  &a  a*  a+  a?  @Name(a)
//! ```
//!
//! The rule being printed is expanded; registered rules below it print by
//! name, which is what keeps a dump of a recursive grammar finite.

use std::fmt::{self, Write};

use super::{CharClass, Rule, RuleKind};

/// Binding strength, loosest first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Choice,
    Seq,
    Prefix,
    Suffix,
    Atom,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_definition(f, self)
    }
}

impl Rule {
    /// What a failed primitive wanted, for failure reports.
    pub(crate) fn describe(&self) -> String {
        match self.kind() {
            RuleKind::Char(CharClass::Any) => "any character".to_string(),
            RuleKind::End => "end of input".to_string(),
            _ => self.to_string(),
        }
    }
}

fn prec(rule: &Rule) -> Prec {
    match rule.kind() {
        RuleKind::Choice(_) => Prec::Choice,
        RuleKind::Seq(rules) if rules.len() != 1 => Prec::Seq,
        RuleKind::Seq(_) => Prec::Atom,
        RuleKind::Not(_) | RuleKind::At(_) => Prec::Prefix,
        RuleKind::ZeroOrMore(_) | RuleKind::OneOrMore(_) | RuleKind::Opt(_) => Prec::Suffix,
        _ => Prec::Atom,
    }
}

fn write_definition(f: &mut impl Write, rule: &Rule) -> fmt::Result {
    match rule.kind() {
        RuleKind::Char(class) => write_class(f, class),
        RuleKind::Literal(text) => write_literal(f, text),
        RuleKind::Regex(matcher) => write!(f, "/{}/", matcher.pattern()),
        RuleKind::End => f.write_str("END"),
        RuleKind::Seq(rules) if rules.is_empty() => f.write_str("()"),
        RuleKind::Seq(rules) => write_list(f, rules, " ", Prec::Seq),
        RuleKind::Choice(rules) => write_list(f, rules, " / ", Prec::Choice),
        RuleKind::Not(inner) => {
            f.write_char('!')?;
            write_operand(f, inner, Some(Prec::Seq))
        }
        RuleKind::At(inner) => {
            f.write_char('&')?;
            write_operand(f, inner, Some(Prec::Seq))
        }
        RuleKind::ZeroOrMore(inner) => {
            write_operand(f, inner, Some(Prec::Suffix))?;
            f.write_char('*')
        }
        RuleKind::OneOrMore(inner) => {
            write_operand(f, inner, Some(Prec::Suffix))?;
            f.write_char('+')
        }
        RuleKind::Opt(inner) => {
            write_operand(f, inner, Some(Prec::Suffix))?;
            f.write_char('?')
        }
        RuleKind::Node(inner) => {
            write!(f, "@{}(", rule.name().unwrap_or_default())?;
            write_operand(f, inner, None)?;
            f.write_char(')')
        }
        RuleKind::Recursive(lazy) => match lazy.resolve().name() {
            Some(name) => f.write_str(name),
            None => f.write_str("<recursive>"),
        },
    }
}

fn write_list(f: &mut impl Write, rules: &[Rule], separator: &str, own: Prec) -> fmt::Result {
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        // Same-level nesting is parenthesized so the grouping survives.
        write_operand(f, rule, Some(own))?;
    }
    Ok(())
}

/// Print a sub-rule: by name when registered, else expanded. Operands that
/// bind no tighter than `wrap_at` are parenthesized.
fn write_operand(f: &mut impl Write, rule: &Rule, wrap_at: Option<Prec>) -> fmt::Result {
    if let Some(name) = rule.name() {
        return f.write_str(name);
    }
    if wrap_at.is_some_and(|limit| prec(rule) <= limit) {
        f.write_char('(')?;
        write_definition(f, rule)?;
        return f.write_char(')');
    }
    write_definition(f, rule)
}

fn write_literal(f: &mut impl Write, text: &str) -> fmt::Result {
    f.write_char('\'')?;
    for c in text.chars() {
        write_escaped(f, c, "'")?;
    }
    f.write_char('\'')
}

fn write_class(f: &mut impl Write, class: &CharClass) -> fmt::Result {
    match class {
        CharClass::Single(c) => {
            f.write_char('\'')?;
            write_escaped(f, *c, "'")?;
            f.write_char('\'')
        }
        CharClass::Set(set) => write_set(f, "[", set),
        CharClass::NotSet(set) => write_set(f, "[^", set),
        CharClass::Range(lo, hi) => {
            f.write_char('[')?;
            write_escaped(f, *lo, "]-^")?;
            f.write_char('-')?;
            write_escaped(f, *hi, "]-^")?;
            f.write_char(']')
        }
        CharClass::Any => f.write_char('.'),
        CharClass::Predicate { label, .. } => write!(f, "<{label}>"),
    }
}

fn write_set(f: &mut impl Write, open: &str, set: &str) -> fmt::Result {
    f.write_str(open)?;
    for c in set.chars() {
        write_escaped(f, c, "]-^")?;
    }
    f.write_char(']')
}

fn write_escaped(f: &mut impl Write, c: char, specials: &str) -> fmt::Result {
    match c {
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        '\t' => f.write_str("\\t"),
        '\\' => f.write_str("\\\\"),
        c if specials.contains(c) => {
            f.write_char('\\')?;
            f.write_char(c)
        }
        c => f.write_char(c),
    }
}
