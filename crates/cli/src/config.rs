//! Command-line arguments and the validated run configuration.

use std::time::Duration;

use clap::Parser;
use common::{BackendList, FrontendAddress, InputError};
use verifier::VerificationMode;

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Raw command-line input.
///
/// Options can also be supplied through the environment:
/// - `VERIFIER_TIMEOUT_SECS` — per-request timeout (default: `10`)
/// - `VERIFIER_MODE` — `sequential` or `observed-set` (default: `sequential`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Parser, Debug, Clone)]
#[command(
    name = "verify-roundrobin",
    author,
    version,
    about = "Checks that a load-balanced frontend serves every listed backend"
)]
pub struct Args {
    /// Load-balanced entry point, as host[:port]
    pub frontend_address: String,

    /// Comma-separated backend identities, e.g. 10.0.0.1,10.0.0.2
    pub backend_list: String,

    #[arg(
        long,
        env = "VERIFIER_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        help = "Per-request timeout, in seconds"
    )]
    pub timeout_secs: u64,

    #[arg(
        long,
        env = "VERIFIER_MODE",
        default_value_t = VerificationMode::Sequential,
        help = "Matching mode: sequential or observed-set"
    )]
    pub mode: VerificationMode,

    /// Print the report (or the failure) as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

/// Validated configuration for one verification run.
#[derive(Debug, Clone)]
pub struct Config {
    pub frontend: FrontendAddress,
    pub backends: BackendList,
    pub timeout: Duration,
    pub mode: VerificationMode,
    pub json: bool,
}

impl Config {
    /// Validates raw arguments once, failing on the first malformed value.
    pub fn from_args(args: Args) -> Result<Self, InputError> {
        let frontend = FrontendAddress::parse(&args.frontend_address)?;
        let backends = BackendList::parse(&args.backend_list)?;
        if args.timeout_secs == 0 {
            return Err(InputError::InvalidTimeout(args.timeout_secs));
        }

        Ok(Self {
            frontend,
            backends,
            timeout: Duration::from_secs(args.timeout_secs),
            mode: args.mode,
            json: args.json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<Config, InputError> {
        let mut full = vec!["verify-roundrobin"];
        full.extend_from_slice(argv);
        Config::from_args(Args::try_parse_from(full).unwrap())
    }

    #[test]
    fn test_positional_arguments() {
        let config = parse(&["lb.example.com", "10.0.0.1,10.0.0.2"]).unwrap();
        assert_eq!(config.frontend.as_str(), "lb.example.com");
        assert_eq!(config.backends.len(), 2);
        assert!(!config.json);
    }

    #[test]
    fn test_explicit_options() {
        let config = parse(&[
            "lb:8080",
            "10.0.0.1",
            "--timeout-secs",
            "3",
            "--mode",
            "observed-set",
            "--json",
        ])
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.mode, VerificationMode::ObservedSet);
        assert!(config.json);
    }

    #[test]
    fn test_empty_backend_list_rejected() {
        assert_eq!(
            parse(&["lb.example.com", ""]).unwrap_err(),
            InputError::EmptyBackendList
        );
    }

    #[test]
    fn test_blank_frontend_rejected() {
        assert!(matches!(
            parse(&[" ", "10.0.0.1"]),
            Err(InputError::InvalidFrontend { .. })
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert_eq!(
            parse(&["lb", "10.0.0.1", "--timeout-secs", "0"]).unwrap_err(),
            InputError::InvalidTimeout(0)
        );
    }

    #[test]
    fn test_missing_backend_list_is_usage_error() {
        assert!(Args::try_parse_from(["verify-roundrobin", "lb.example.com"]).is_err());
    }

    #[test]
    fn test_unknown_mode_is_usage_error() {
        assert!(
            Args::try_parse_from(["verify-roundrobin", "lb", "10.0.0.1", "--mode", "random"])
                .is_err()
        );
    }
}
