//! Exit codes for CLI operations.
//!
//! The CLI contract defines exactly two codes: `0` for success (path or
//! listing written to stdout) and `1` for failure (message written to
//! stderr). Cancelling an interactive disambiguation is a user-initiated
//! abort and also exits `1`, with no side effects.

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Operation failed or was cancelled (code 1)
    Failure = 1,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ExitCode::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as u8, 0);
        assert_eq!(ExitCode::Failure as u8, 1);
        assert_eq!(i32::from(ExitCode::Failure), 1);
    }

    #[test]
    fn test_is_success() {
        assert!(ExitCode::Success.is_success());
        assert!(!ExitCode::Failure.is_success());
    }
}
