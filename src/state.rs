//! Shared application state for all routes. The store is built once by the binary and injected here.

use crate::config::VotePolicy;
use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub vote_policy: VotePolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, vote_policy: VotePolicy) -> Self {
        AppState { store, vote_policy }
    }
}
