//! In-memory model of a uci configuration package
//!
//! The router OS stores configuration as packages of typed sections with
//! string-keyed options. This module holds one package as ordered data,
//! parses the `/etc/config` text syntax and serializes it back. It is a
//! store model only; reading and writing actual files is the caller's job.

mod document;

pub use document::{is_boolean, truthy, OptionValue, UciDocument, UciError, UciSection};
