//! Application error type.
//!
//! Every fallible path in the crate returns `AppError`. The exit code is the
//! process exit status used by `main` when the error aborts startup:
//!
//! - `2`: input files are missing or malformed (parse errors)
//! - `4`: other I/O failures (binding the listener, writing exports)
//! - `5`: chart rendering failures

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Missing or malformed input file.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(5, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
