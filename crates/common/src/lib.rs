//! Shared value types for the round-robin verifier.
//!
//! Everything here is constructed once from process input and never mutated.

pub mod error;
pub mod types;

pub use error::InputError;
pub use types::{BackendIdentity, BackendList, ExpectedSignature, FrontendAddress};
