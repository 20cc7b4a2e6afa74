//! Interactive chat module
//!
//! Provides a readline-based interactive chat interface for a persevan
//! session.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::{ChatRepl, submit_interruptible};
