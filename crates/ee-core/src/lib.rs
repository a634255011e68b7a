//! Shared primitives used across ElementEye crates.

use core::fmt;

/// Result alias used across the workspace.
pub type EyeResult<T> = Result<T, EyeError>;

/// Workspace-wide error carrying a stable code and a human-readable message.
///
/// Code prefixes follow the failure taxonomy: `url.*`, `fetch.*`,
/// `storage.*`, `export.*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeError {
    pub code: &'static str,
    pub message: String,
}

impl EyeError {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for EyeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for EyeError {}

#[cfg(test)]
mod tests {
    use super::EyeError;

    #[test]
    fn display_includes_code_and_message() {
        let error = EyeError::new("fetch.timeout", "request exceeded 10s");
        assert_eq!(error.to_string(), "fetch.timeout: request exceeded 10s");
    }
}
