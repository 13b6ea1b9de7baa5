//! Rendering parse failures against their source.

mod printer;


pub use printer::FailurePrinter;

use crate::engine::ParseError;

impl ParseError {
    /// A printer pointing this error at `source`.
    pub fn printer<'e, 's>(&'e self, source: &'s str) -> FailurePrinter<'e, 's> {
        FailurePrinter::new(self, source)
    }

    /// Plain annotated rendering against `source`.
    pub fn render(&self, source: &str) -> String {
        self.printer(source).render()
    }
}
