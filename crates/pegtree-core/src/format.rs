//! Textual renderings of a token tree.
//!
//! Three formats:
//! - **Outline** (`dump`, `format`): one line per token, indented by depth,
//!   leaves followed by their quoted text. Used by snapshot tests.
//! - **XML** (`to_xml`): one element per token, nested children, leaf text
//!   as element content.
//! - **JSON** (`to_json`): the `Serialize` shape, via serde_json.

use std::fmt;

use crate::utils::{escape_json_string, escape_xml};
use crate::{Colors, Token};

impl Token {
    /// Outline dump without colors.
    pub fn dump(&self) -> String {
        self.format(Colors::OFF)
    }

    /// Outline dump, one token per line.
    ///
    /// ```text
    /// Expression
    ///   Number "1"
    ///   BinaryOp "+"
    /// ```
    pub fn format(&self, colors: Colors) -> String {
        let mut out = String::new();
        format_outline(&mut out, self, &colors, 0);
        out
    }

    /// Structured export: one element per token.
    ///
    /// Leaves carry their escaped text as content, composites nest their
    /// children. Empty leaves render self-closed.
    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        format_xml(&mut out, self);
        out
    }

    /// JSON export of the `Serialize` shape.
    pub fn to_json(&self, pretty: bool) -> String {
        let result = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        result.expect("token serialization should not fail")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

fn format_outline(out: &mut String, token: &Token, c: &Colors, depth: usize) {
    if depth > 0 {
        out.push('\n');
    }
    out.push_str(&"  ".repeat(depth));
    out.push_str(c.blue);
    out.push_str(token.name());
    out.push_str(c.reset);

    if token.is_leaf() {
        out.push(' ');
        out.push_str(c.green);
        out.push('"');
        out.push_str(&escape_json_string(token.text()));
        out.push('"');
        out.push_str(c.reset);
        return;
    }

    for child in token.children() {
        format_outline(out, child, c, depth + 1);
    }
}

fn format_xml(out: &mut String, token: &Token) {
    let name = token.name();

    if token.is_leaf() && token.span().is_empty() {
        out.push('<');
        out.push_str(name);
        out.push_str("/>");
        return;
    }

    out.push('<');
    out.push_str(name);
    out.push('>');

    if token.is_leaf() {
        out.push_str(&escape_xml(token.text()));
    } else {
        for child in token.children() {
            format_xml(out, child);
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
