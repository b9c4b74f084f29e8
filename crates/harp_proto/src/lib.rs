//! harp_proto — Wire types shared between the Harp server and clients
//!
//! All bodies are JSON with camelCase field names; identity rides on every
//! guarded request as two plain headers (stateless — there is no token
//! handshake, the login password itself is the per-request credential, which
//! assumes TLS on the channel).

pub mod api;

pub use api::{
    DeleteKeyRequest, KeyEntry, ProjectLookup, ProjectSummary, RegisterRequest, WriteKeyRequest,
    AUTHORIZATION_HEADER, USERNAME_HEADER,
};
