use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Prefix every backend prepends to its self-reported identity.
const SIGNATURE_PREFIX: &str = "Hi there, I'm served from ip-";
const SIGNATURE_SUFFIX: &str = "!";

/// Load-balanced entry point, as a bare `host[:port]`.
///
/// Requests go to `http://<address>/`, so a scheme, path, query, fragment or
/// credentials here are rejected rather than folded into the request URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FrontendAddress(String);

impl FrontendAddress {
    /// Validates and wraps a frontend address. Surrounding whitespace is trimmed.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let address = raw.trim();
        let invalid = |reason: &str| InputError::InvalidFrontend {
            address: raw.to_string(),
            reason: reason.to_string(),
        };

        if address.is_empty() {
            return Err(invalid("address is empty"));
        }
        if address.chars().any(char::is_whitespace) {
            return Err(invalid("address contains whitespace"));
        }
        if address.contains("://") {
            return Err(invalid("address must not include a scheme"));
        }
        if address.contains('/') || address.contains('\\') {
            return Err(invalid("address must not include a path"));
        }
        if address.contains('?') {
            return Err(invalid("address must not include a query"));
        }
        if address.contains('#') {
            return Err(invalid("address must not include a fragment"));
        }
        if address.contains('@') {
            return Err(invalid("address must not include credentials"));
        }

        Ok(Self(address.to_string()))
    }

    /// Returns the address as given, without scheme.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the URL the verifier issues its GET requests to.
    pub fn url(&self) -> String {
        format!("http://{}/", self.0)
    }
}

impl fmt::Display for FrontendAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FrontendAddress {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FrontendAddress {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FrontendAddress> for String {
    fn from(address: FrontendAddress) -> Self {
        address.0
    }
}

/// Token identifying one backend server, typically a dotted IP address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BackendIdentity(String);

impl BackendIdentity {
    /// Wraps a backend identity. Blank input is rejected; whitespace is trimmed.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let id = raw.trim();
        if id.is_empty() {
            return Err(InputError::BlankBackendIdentity);
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the body this backend is expected to answer with.
    pub fn expected_signature(&self) -> ExpectedSignature {
        ExpectedSignature::for_backend(self)
    }
}

impl fmt::Display for BackendIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BackendIdentity {
    type Error = InputError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BackendIdentity> for String {
    fn from(id: BackendIdentity) -> Self {
        id.0
    }
}

/// Response body a backend reports about itself:
/// `Hi there, I'm served from ip-<id>!` with every `.` in the id replaced by `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpectedSignature(String);

impl ExpectedSignature {
    pub fn for_backend(backend: &BackendIdentity) -> Self {
        let id = backend.as_str().replace('.', "-");
        Self(format!("{SIGNATURE_PREFIX}{id}{SIGNATURE_SUFFIX}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact comparison against a response body. No trimming is applied.
    pub fn matches(&self, body: &str) -> bool {
        self.0 == body
    }
}

impl fmt::Display for ExpectedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, non-empty sequence of backend identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<BackendIdentity>", into = "Vec<BackendIdentity>")]
pub struct BackendList(Vec<BackendIdentity>);

impl BackendList {
    /// Parses a comma-separated list such as `"10.0.0.1,10.0.0.2"`.
    ///
    /// Every entry must be non-blank; `"a,,b"` and a trailing comma are errors.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        if raw.trim().is_empty() {
            return Err(InputError::EmptyBackendList);
        }

        let backends = raw
            .split(',')
            .enumerate()
            .map(|(i, entry)| {
                BackendIdentity::parse(entry)
                    .map_err(|_| InputError::BlankBackend { position: i + 1 })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(backends))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed list.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BackendIdentity> {
        self.0.iter()
    }

    /// Expected signatures in list order.
    pub fn signatures(&self) -> Vec<ExpectedSignature> {
        self.0.iter().map(BackendIdentity::expected_signature).collect()
    }
}

impl TryFrom<Vec<BackendIdentity>> for BackendList {
    type Error = InputError;

    fn try_from(backends: Vec<BackendIdentity>) -> Result<Self, Self::Error> {
        if backends.is_empty() {
            return Err(InputError::EmptyBackendList);
        }
        Ok(Self(backends))
    }
}

impl From<BackendList> for Vec<BackendIdentity> {
    fn from(list: BackendList) -> Self {
        list.0
    }
}

impl FromStr for BackendList {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'a> IntoIterator for &'a BackendList {
    type Item = &'a BackendIdentity;
    type IntoIter = std::slice::Iter<'a, BackendIdentity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
