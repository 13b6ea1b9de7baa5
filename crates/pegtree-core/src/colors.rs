//! Terminal styling for token outlines and parse traces.
//!
//! Names (tokens, registered rules) are blue, matched text is green, failed
//! rule applications are red, and spans or byte offsets are dimmed. With
//! [`Colors::OFF`] every code is empty, so formatting code never branches on
//! whether color is wanted.

/// The escape codes a renderer interpolates around each part of a line.
///
/// Plain 16-color SGR codes only.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub red: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        red: "\x1b[31m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    /// Every field empty: output is byte-for-byte plain text.
    pub const OFF: Self = Self {
        blue: "",
        green: "",
        red: "",
        dim: "",
        reset: "",
    };

    /// [`Colors::ON`] or [`Colors::OFF`], e.g. from a `--color` switch or
    /// an `is_terminal()` check.
    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.blue.is_empty()
    }

    /// `text` between `color` and a reset. Unchanged when `color` is empty.
    pub fn paint(&self, color: &str, text: &str) -> String {
        match color {
            "" => text.to_string(),
            _ => format!("{color}{text}{}", self.reset),
        }
    }
}
