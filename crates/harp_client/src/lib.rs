//! harp_client — Session-scoped client for the Harp secret store
//!
//! All encryption happens here, before anything leaves the process: the
//! server only ever receives hex envelopes. A [`Session`] carries everything
//! one authenticated identity needs (credentials, derived envelope key,
//! server address, HTTP client) — there is no process-wide state.

pub mod error;
pub mod session;

pub use error::ClientError;
pub use session::{render_env, PlainKey, Session};
