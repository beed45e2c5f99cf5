//! Round-robin verification against a single frontend.

use std::time::Instant;

use common::{BackendList, ExpectedSignature};

use crate::error::{Result, VerifyError};
use crate::frontend::Frontend;
use crate::report::{BackendMatch, VerificationMode, VerificationReport};

/// Checks that every expected backend serves a request routed through the
/// frontend.
///
/// Exactly one request is issued per listed backend, strictly one after the
/// other. The run stops at the first failure; later requests are never sent.
pub struct RoundRobinVerifier<F: Frontend> {
    frontend: F,
    backends: BackendList,
    mode: VerificationMode,
}

impl<F: Frontend> RoundRobinVerifier<F> {
    /// Creates a verifier in [`VerificationMode::Sequential`].
    pub fn new(frontend: F, backends: BackendList) -> Self {
        Self {
            frontend,
            backends,
            mode: VerificationMode::default(),
        }
    }

    /// Creates a verifier from a comma-separated backend list.
    ///
    /// Fails with an input error, without touching the network, if the list
    /// is empty or has a blank entry.
    pub fn from_list(frontend: F, backends: &str) -> Result<Self> {
        Ok(Self::new(frontend, BackendList::parse(backends)?))
    }

    pub fn with_mode(mut self, mode: VerificationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> VerificationMode {
        self.mode
    }

    pub fn backends(&self) -> &BackendList {
        &self.backends
    }

    /// Runs the verification.
    #[tracing::instrument(
        skip(self),
        fields(frontend = %self.frontend.address(), mode = %self.mode, backends = self.backends.len())
    )]
    pub async fn verify(&self) -> Result<VerificationReport> {
        let started = Instant::now();

        let result = match self.mode {
            VerificationMode::Sequential => self.verify_sequential().await,
            VerificationMode::ObservedSet => self.verify_observed_set().await,
        };

        metrics::histogram!("verifier_run_duration_seconds")
            .record(started.elapsed().as_secs_f64());

        if let Ok(report) = &result {
            tracing::info!(requests = report.requests_issued, "all backends verified");
        }
        result
    }

    async fn verify_sequential(&self) -> Result<VerificationReport> {
        let mut matches = Vec::with_capacity(self.backends.len());

        for (i, backend) in self.backends.iter().enumerate() {
            let request = i + 1;
            let body = self.request(request).await?;
            let expected = backend.expected_signature();

            if !expected.matches(&body) {
                metrics::counter!("verifier_mismatches_total").increment(1);
                tracing::error!(
                    request,
                    %backend,
                    expected = %expected,
                    actual = %body,
                    "response does not match expected backend"
                );
                return Err(VerifyError::Mismatch {
                    request,
                    backend: backend.clone(),
                    expected,
                    actual: body,
                });
            }

            tracing::info!(request, %backend, "backend matched");
            matches.push(BackendMatch {
                request,
                backend: backend.clone(),
                signature: expected,
            });
        }

        Ok(self.report(matches))
    }

    async fn verify_observed_set(&self) -> Result<VerificationReport> {
        let mut observed: Vec<(usize, String)> = Vec::with_capacity(self.backends.len());
        for request in 1..=self.backends.len() {
            observed.push((request, self.request(request).await?));
        }

        let mut matches = Vec::with_capacity(self.backends.len());
        let mut missing: Vec<ExpectedSignature> = Vec::new();

        for backend in &self.backends {
            let expected = backend.expected_signature();
            match observed.iter().position(|(_, body)| expected.matches(body)) {
                Some(pos) => {
                    let (request, _) = observed.remove(pos);
                    tracing::info!(request, %backend, "backend observed");
                    matches.push(BackendMatch {
                        request,
                        backend: backend.clone(),
                        signature: expected,
                    });
                }
                None => missing.push(expected),
            }
        }

        if !missing.is_empty() || !observed.is_empty() {
            let unexpected: Vec<String> = observed.into_iter().map(|(_, body)| body).collect();
            metrics::counter!("verifier_mismatches_total").increment(missing.len() as u64);
            tracing::error!(
                missing = missing.len(),
                unexpected = unexpected.len(),
                "observed responses differ from expected signatures"
            );
            return Err(VerifyError::UnobservedBackends {
                missing,
                unexpected,
            });
        }

        matches.sort_by_key(|m| m.request);
        Ok(self.report(matches))
    }

    /// Issues request number `request` (1-based).
    async fn request(&self, request: usize) -> Result<String> {
        metrics::counter!("verifier_requests_total").increment(1);
        tracing::debug!(request, "sending request");

        self.frontend.fetch().await.map_err(|err| {
            metrics::counter!("verifier_transport_failures_total").increment(1);
            tracing::warn!(request, error = %err, "request failed");
            VerifyError::Transport {
                request,
                frontend: self.frontend.address().to_string(),
                reason: err.0,
            }
        })
    }

    fn report(&self, matches: Vec<BackendMatch>) -> VerificationReport {
        VerificationReport {
            frontend: self.frontend.address().clone(),
            mode: self.mode,
            requests_issued: self.backends.len(),
            matches,
        }
    }
}
