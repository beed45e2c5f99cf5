//! Round-robin load balancer verification.
//!
//! Sends one GET per expected backend to a frontend address and checks each
//! response body against the signature that backend reports about itself,
//! `Hi there, I'm served from ip-<id>!`.
//!
//! Two matching modes are available:
//! 1. Sequential: request N must be served by backend N of the list
//! 2. Observed-set: the bodies must cover the expected signatures in any order

pub mod error;
pub mod frontend;
pub mod report;
pub mod verifier;

pub use error::{ErrorKind, FetchError, Result, VerifyError};
pub use frontend::{Frontend, HttpFrontend, ScriptedFrontend};
pub use report::{BackendMatch, VerificationMode, VerificationReport};
pub use verifier::RoundRobinVerifier;
