//! Capabilities of the installed sing-box binary
//!
//! sing-box is compiled with optional features selected by Go build tags.
//! `sing-box version` prints the active tags on a `Tags:` line; the form
//! offers QUIC-based server types and the ACME field group only when the
//! matching tag is present.

use log::debug;
use serde::{Deserialize, Serialize};

/// Feature set of the proxy runtime. Defaults to everything off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    /// Built with `with_quic`: Hysteria and NaïveProxy are available.
    pub with_quic: bool,
    /// Built with `with_acme`: certificates can be issued via ACME.
    pub with_acme: bool,
}

impl Features {
    /// Every capability enabled. Used when no runtime is available to probe.
    pub fn all() -> Self {
        Features {
            with_quic: true,
            with_acme: true,
        }
    }

    /// Build the feature set from raw build tags. Tags the form does not
    /// consume are ignored.
    pub fn from_tags<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut features = Features::default();
        for tag in tags {
            match tag.trim() {
                "" => {}
                "with_quic" => features.with_quic = true,
                "with_acme" => features.with_acme = true,
                other => debug!("ignoring unknown build tag '{}'", other),
            }
        }
        features
    }

    /// Parse `sing-box version` output, e.g.
    ///
    /// ```text
    /// sing-box version 1.8.0
    ///
    /// Environment: go1.21.5 linux/amd64
    /// Tags: with_gvisor,with_quic,with_dhcp,with_utls,with_acme
    /// ```
    ///
    /// Output without a `Tags:` line yields the empty feature set.
    pub fn from_version_output(output: &str) -> Self {
        for line in output.lines() {
            if let Some(tags) = line.trim_start().strip_prefix("Tags:") {
                return Features::from_tags(tags.split(','));
            }
        }
        Features::default()
    }
}
