//! Frontend transport trait and its HTTP and scripted implementations.

pub mod http;
pub mod scripted;

pub use http::HttpFrontend;
pub use scripted::ScriptedFrontend;

use async_trait::async_trait;
use common::FrontendAddress;

use crate::error::FetchError;

/// A load-balanced entry point that can be asked for one response at a time.
#[async_trait]
pub trait Frontend: Send + Sync {
    /// Address requests are sent to.
    fn address(&self) -> &FrontendAddress;

    /// Issues a single GET and returns the raw response body.
    async fn fetch(&self) -> Result<String, FetchError>;
}
