//! Per-request authentication extractor.
//!
//! Pulls the `username` / `authorization` headers and runs the store guard.
//! Handlers that take [`AuthedUser`] cannot run unauthenticated, and the
//! `OwnerContext` inside is the only handle they get to scoped operations.

use axum::{extract::FromRequestParts, http::request::Parts};

use harp_proto::{AUTHORIZATION_HEADER, USERNAME_HEADER};
use harp_store::{guard, OwnerContext};

use crate::error::ApiError;
use crate::AppState;

pub struct AuthedUser(pub OwnerContext);

impl FromRequestParts<AppState> for AuthedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Absent or non-ASCII headers fail exactly like bad credentials.
        let username = header_str(parts, USERNAME_HEADER).ok_or_else(ApiError::forbidden)?;
        let password = header_str(parts, AUTHORIZATION_HEADER).ok_or_else(ApiError::forbidden)?;

        let ctx = guard::authorize(&state.store, &username, &password).await?;
        Ok(AuthedUser(ctx))
    }
}

fn header_str(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}
