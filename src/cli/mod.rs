//! Terminal front end standing in for the mobile UI: validates input, drives
//! the payment flow and renders the manager's state.

pub mod commands;
pub mod core;
pub mod output;
pub mod payment;
pub mod registry;
pub mod shell;
pub mod shell_context;
pub mod validation;

pub use self::core::{CliError, CommandError, CommandResult};
pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
