//! Verification modes and the report produced by a successful run.

use std::fmt;
use std::str::FromStr;

use common::{BackendIdentity, ExpectedSignature, FrontendAddress};
use serde::Serialize;

/// How observed responses are matched against the backend list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationMode {
    /// Request N must be answered by backend N of the list.
    #[default]
    Sequential,
    /// One request per backend; the observed bodies must equal the expected
    /// signatures as a multiset, in any order.
    ObservedSet,
}

impl fmt::Display for VerificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationMode::Sequential => f.write_str("sequential"),
            VerificationMode::ObservedSet => f.write_str("observed-set"),
        }
    }
}

impl FromStr for VerificationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(VerificationMode::Sequential),
            "observed-set" | "observed_set" => Ok(VerificationMode::ObservedSet),
            other => Err(format!(
                "unknown verification mode '{other}' (expected 'sequential' or 'observed-set')"
            )),
        }
    }
}

/// A backend whose signature was observed, and the request that observed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendMatch {
    /// 1-based request number.
    pub request: usize,
    pub backend: BackendIdentity,
    pub signature: ExpectedSignature,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    pub frontend: FrontendAddress,
    pub mode: VerificationMode,
    pub requests_issued: usize,
    pub matches: Vec<BackendMatch>,
}
