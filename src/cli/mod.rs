//! Command-line front end for the `lexi` binary.

pub mod commands;
pub mod repl;
pub mod repl_commands;
pub mod repl_complete;
