//! Core data models for the application
//!
//! This module contains the primary data structures used throughout the
//! application, separated from the logic that operates on them: the proxy
//! server type taxonomy with its option tables, and the feature set reported
//! by the installed sing-box binary.
//!
//! # Usage
//!
//! Import the models directly from this module:
//!
//! ```rust
//! use proxyform::models::{Features, ServerType};
//!
//! let features = Features::from_tags(["with_quic"]);
//! assert!(ServerType::Hysteria.requires_quic());
//! assert!(features.with_quic);
//! ```

mod features;
mod server;

pub use features::Features;
pub use server::{
    HysteriaAuthType, Network, ServerType, Transport, DNS_STRATEGIES,
    SHADOWSOCKS_ENCRYPT_METHODS, TLS_CIPHER_SUITES, TLS_VERSIONS,
};
