//! Parse execution engine.

mod context;
mod error;
mod limits;
mod memo;
mod parser;
mod state;
mod trace;

#[cfg(test)]
mod parser_tests;

pub(crate) use context::Context;
pub use error::{Failure, ParseError};
pub use limits::FuelLimits;
pub(crate) use memo::MemoEntry;
pub use parser::{Parser, ParserBuilder, parse};
pub use state::ParseState;
pub use trace::{NoopTracer, PrintTracer, Tracer, Verbosity};
