//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::Token;

impl Token {
    pub(crate) fn ensure_well_formed(&self) {
        let span = self.span();
        let source = self.source();
        assert!(
            span.start <= span.end && span.end <= source.len(),
            "Token: span {span} out of bounds for source of {} bytes (name `{}`)",
            source.len(),
            self.name()
        );
        assert!(
            source.is_char_boundary(span.start) && source.is_char_boundary(span.end),
            "Token: span {span} splits a UTF-8 char (name `{}`)",
            self.name()
        );

        let mut cursor = span.start;
        for child in self.children() {
            assert!(
                span.contains(child.span()) && child.begin() >= cursor,
                "Token: child `{}` at {} escapes parent `{}` at {span} or overlaps a sibling",
                child.name(),
                child.span(),
                self.name()
            );
            cursor = child.end();
        }
    }
}
