//! Verifier error types.

use common::{BackendIdentity, ExpectedSignature, InputError};
use serde::Serialize;
use thiserror::Error;

/// Broad failure category, so a CI harness can tell causes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Input,
    Transport,
    Assertion,
}

impl ErrorKind {
    /// Process exit status for this kind of failure.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::Assertion => 1,
            ErrorKind::Input => 2,
            ErrorKind::Transport => 3,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Input => "input error",
            ErrorKind::Transport => "transport failure",
            ErrorKind::Assertion => "assertion failure",
        };
        f.write_str(name)
    }
}

/// Errors that end a verification run. All of them are fatal.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Malformed frontend address, backend list or option.
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// A request could not be completed (refused, DNS, timeout, body read).
    #[error("Transport failure on request {request} to {frontend}: {reason}")]
    Transport {
        request: usize,
        frontend: String,
        reason: String,
    },

    /// A response body did not match the signature of the backend expected
    /// to serve that request.
    #[error("Request {request} expected backend {backend}: expected \"{expected}\", actual {actual:?}")]
    Mismatch {
        request: usize,
        backend: BackendIdentity,
        expected: ExpectedSignature,
        actual: String,
    },

    /// The set of observed bodies differs from the set of expected signatures.
    #[error(
        "Observed responses differ from expected signatures: missing [{}], unexpected {unexpected:?}",
        join_signatures(.missing)
    )]
    UnobservedBackends {
        missing: Vec<ExpectedSignature>,
        unexpected: Vec<String>,
    },
}

impl VerifyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            VerifyError::Input(_) => ErrorKind::Input,
            VerifyError::Client(_) | VerifyError::Transport { .. } => ErrorKind::Transport,
            VerifyError::Mismatch { .. } | VerifyError::UnobservedBackends { .. } => {
                ErrorKind::Assertion
            }
        }
    }
}

fn join_signatures(signatures: &[ExpectedSignature]) -> String {
    signatures
        .iter()
        .map(|s| format!("\"{s}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failure of a single fetch, before the verifier attaches request context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FetchError(pub String);

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's top-level message omits the cause (refused, DNS, ...).
        let mut reason = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            reason.push_str(": ");
            reason.push_str(&cause.to_string());
            source = cause.source();
        }
        FetchError(reason)
    }
}

/// Convenience type alias for verifier results.
pub type Result<T> = std::result::Result<T, VerifyError>;
