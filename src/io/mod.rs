//! Input/output handling for the CLI surface.
//!
//! This module provides:
//! - Consistent exit codes
//! - The interactive disambiguation prompt

pub mod exit_code;
pub mod prompt;

pub use exit_code::ExitCode;
pub use prompt::{ProjectPicker, TerminalPicker};
