//! Command-line smoke test for round-robin load balancing.
//!
//! Wires a validated [`config::Config`] to an HTTP-backed
//! [`verifier::RoundRobinVerifier`] and renders the outcome.

pub mod config;

use serde_json::json;
use verifier::{HttpFrontend, RoundRobinVerifier, VerificationReport, VerifyError};

use config::Config;

/// Runs one verification against the configured frontend.
pub async fn run(config: &Config) -> verifier::Result<VerificationReport> {
    let frontend = HttpFrontend::new(config.frontend.clone(), config.timeout)?;
    RoundRobinVerifier::new(frontend, config.backends.clone())
        .with_mode(config.mode)
        .verify()
        .await
}

/// JSON document printed for a failed run with `--json`.
pub fn failure_json(err: &VerifyError) -> serde_json::Value {
    json!({
        "status": "failed",
        "kind": err.kind(),
        "error": err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use common::InputError;

    use super::*;

    #[test]
    fn failure_json_names_kind() {
        let err = VerifyError::from(InputError::EmptyBackendList);
        let value = failure_json(&err);
        assert_eq!(value["status"], "failed");
        assert_eq!(value["kind"], "input");
        assert_eq!(value["error"], "Input error: Backend list is empty");
    }
}
