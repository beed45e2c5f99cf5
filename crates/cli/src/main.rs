//! verify-roundrobin entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use verifier::{ErrorKind, VerifyError};
use verify_roundrobin::config::{Args, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Logs go to stderr so --json output on stdout stays parseable.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let json = args.json;

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(err) => return fail(VerifyError::from(err), json),
    };

    tracing::info!(
        frontend = %config.frontend,
        backends = config.backends.len(),
        mode = %config.mode,
        "starting verification"
    );

    match verify_roundrobin::run(&config).await {
        Ok(report) => {
            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(out) => println!("{out}"),
                    Err(err) => {
                        tracing::error!(error = %err, "failed to render report");
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Err(err) => fail(err, json),
    }
}

fn fail(err: VerifyError, json: bool) -> ExitCode {
    let kind: ErrorKind = err.kind();
    tracing::error!(%kind, error = %err, "verification failed");
    if json {
        println!("{}", verify_roundrobin::failure_json(&err));
    }
    ExitCode::from(kind.exit_code())
}
