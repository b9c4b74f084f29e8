//! harp_store — Tenant-scoped persistence for the Harp secret store
//!
//! # Ownership model
//! Every row belongs to exactly one user. The only way to reach a scoped
//! operation is through an [`OwnerContext`], which can only be produced by
//! [`guard::authorize`] — so a query that forgets to filter by owner does not
//! typecheck into existence here; every operation takes the context and
//! filters on it.
//!
//! # What the store sees
//! Secret values arrive as hex envelopes sealed client-side. The store treats
//! them as opaque strings; there is no code path that could decrypt them.
//!
//! # Migration
//! SQLx migrations in `migrations/` are run on open.

pub mod db;
pub mod error;
pub mod guard;
pub mod keys;
pub mod models;
pub mod projects;
pub mod users;

pub use db::Store;
pub use error::StoreError;
pub use guard::OwnerContext;
