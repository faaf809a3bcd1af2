//! Yeastar PBX OpenAPI module
//!
//! Token exchange, the two read-only fetchers the dashboard needs, and the
//! single-slot token cache that sits in front of authentication.

pub mod auth;
pub mod client;
pub mod constants;
pub mod error;
pub mod models;

pub use auth::{AuthManager, Clock, SystemClock, TokenCache};
pub use client::PbxClient;
pub use error::{ApiError, ErrorKind};
pub use models::{ExtensionRecord, SystemInfo, TokenInfo};
