//! Builder-pattern printer for parse failures.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::engine::ParseError;

/// Builder for rendering a [`ParseError`] with various options.
pub struct FailurePrinter<'e, 's> {
    error: &'e ParseError,
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> FailurePrinter<'e, 's> {
    pub fn new(error: &'e ParseError, source: &'s str) -> Self {
        Self {
            error,
            source,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        // Resource exhaustion has no position to point at.
        let Some(failure) = self.error.failure() else {
            return write!(w, "error: {}", self.error);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let title = match self.error {
            ParseError::Incomplete { .. } => "input not fully consumed",
            _ => "parse failed",
        };
        let label = failure.to_string();
        let range = adjust_range(self.source, failure.furthest);

        let mut snippet = Snippet::source(self.source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(range).label(&label));
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(title).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// Widen a position to the char under it so the caret has something to
/// underline. At end of input the span stays empty.
fn adjust_range(source: &str, pos: usize) -> std::ops::Range<usize> {
    let start = pos.min(source.len());
    let width = source[start..].chars().next().map_or(0, char::len_utf8);
    start..start + width
}
