//! In-memory frontend that replays queued responses.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::FrontendAddress;

use super::Frontend;
use crate::error::FetchError;

#[derive(Debug, Default)]
struct ScriptedState {
    responses: VecDeque<Result<String, FetchError>>,
    fetches: usize,
}

/// Frontend for tests: answers each fetch with the next queued response.
///
/// Clones share the same queue and fetch counter.
#[derive(Debug, Clone)]
pub struct ScriptedFrontend {
    address: FrontendAddress,
    state: Arc<RwLock<ScriptedState>>,
}

impl ScriptedFrontend {
    pub fn new(address: FrontendAddress) -> Self {
        Self {
            address,
            state: Arc::default(),
        }
    }

    /// Queues a response body.
    pub fn push_body(&self, body: impl Into<String>) -> &Self {
        self.state
            .write()
            .unwrap()
            .responses
            .push_back(Ok(body.into()));
        self
    }

    /// Queues a transport failure.
    pub fn push_failure(&self, reason: impl Into<String>) -> &Self {
        self.state
            .write()
            .unwrap()
            .responses
            .push_back(Err(FetchError(reason.into())));
        self
    }

    /// Number of fetches issued so far.
    pub fn fetch_count(&self) -> usize {
        self.state.read().unwrap().fetches
    }

    /// Number of queued responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.state.read().unwrap().responses.len()
    }
}

#[async_trait]
impl Frontend for ScriptedFrontend {
    fn address(&self) -> &FrontendAddress {
        &self.address
    }

    async fn fetch(&self) -> Result<String, FetchError> {
        let mut state = self.state.write().unwrap();
        state.fetches += 1;
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(FetchError("no scripted response left".to_string())))
    }
}
