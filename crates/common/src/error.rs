use thiserror::Error;

/// Malformed input supplied to the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The frontend address is empty or not a bare `host[:port]`.
    #[error("Invalid frontend address '{address}': {reason}")]
    InvalidFrontend { address: String, reason: String },

    /// No backend identities were supplied.
    #[error("Backend list is empty")]
    EmptyBackendList,

    /// A standalone backend identity is blank.
    #[error("Backend identity is blank")]
    BlankBackendIdentity,

    /// An entry in the backend list is blank. `position` is 1-based.
    #[error("Backend list entry {position} is blank")]
    BlankBackend { position: usize },

    /// The request timeout must be at least one second.
    #[error("Invalid request timeout: {0}s")]
    InvalidTimeout(u64),
}
