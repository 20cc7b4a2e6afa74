//! Response interpretation.

mod interpreter;

pub use interpreter::{INSIGHTS_MARKER, InterpretedResponse, ResponseInterpreter};
