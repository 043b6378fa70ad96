use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::store::MovieStore;

/// Shared handles available to every request.
///
/// Built once in `main` and cloned per request by the router. The store is
/// a trait object so tests can swap in a fake.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MovieStore>,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(store: Arc<dyn MovieStore>, verifier: TokenVerifier) -> Self {
        Self { store, verifier }
    }
}
