//! Remote REST collections.
//!
//! [`RemoteCollection`] is the seam between a resource store and the
//! backend. [`HttpCollection`] talks to the real server over blocking
//! `reqwest`; tests substitute scripted fakes.

mod auth;
mod error;
mod http;
mod traits;

pub use auth::{AUTH_TOKEN_CACHE_KEY, resolve_token};
pub use error::{RemoteError, TransportKind, extract_error_message};
pub use http::{HttpCollection, HttpConfig, build_http_client};
pub use traits::{RemoteCollection, RemoteResult};
