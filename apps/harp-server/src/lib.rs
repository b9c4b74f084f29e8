//! harp-server — HTTP surface over the Harp tenant store.
//!
//! The interesting work lives in `harp_store` (guard + scoped CRUD) and
//! `harp_crypto` (login hashing); this crate is routing, header extraction,
//! and error-to-status mapping. Identity rides as two headers on every
//! guarded request and is re-verified per request — there are no sessions.

pub mod auth;
pub mod error;
pub mod routes;

use std::time::Duration;

use axum::Router;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use harp_store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
}

/// Build the full router. Separated from `main` so integration tests can
/// drive it without binding a socket.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    routes::router(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
