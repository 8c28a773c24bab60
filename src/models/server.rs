//! Server instance taxonomy
//!
//! Contains the protocol type enums and the option tables shared by the form
//! schema and the validators.

use serde::{Deserialize, Serialize};

/// Represents the protocol spoken by an inbound server instance.
/// This is the canonical enum used for server type identification across the
/// application; the uci `type` option stores its wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    Http,
    Hysteria,
    Naive,
    Shadowsocks,
    Socks,
    Trojan,
    Vless,
    Vmess,
}

impl ServerType {
    /// The value stored in the uci `type` option.
    pub fn value(self) -> &'static str {
        match self {
            ServerType::Http => "http",
            ServerType::Hysteria => "hysteria",
            ServerType::Naive => "naive",
            ServerType::Shadowsocks => "shadowsocks",
            ServerType::Socks => "socks",
            ServerType::Trojan => "trojan",
            ServerType::Vless => "vless",
            ServerType::Vmess => "vmess",
        }
    }

    /// The human-readable name shown in the type selector.
    pub fn label(self) -> &'static str {
        match self {
            ServerType::Http => "HTTP",
            ServerType::Hysteria => "Hysteria",
            ServerType::Naive => "NaïveProxy",
            ServerType::Shadowsocks => "Shadowsocks",
            ServerType::Socks => "Socks",
            ServerType::Trojan => "Trojan",
            ServerType::Vless => "VLESS",
            ServerType::Vmess => "VMess",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "http" => Some(ServerType::Http),
            "hysteria" => Some(ServerType::Hysteria),
            "naive" => Some(ServerType::Naive),
            "shadowsocks" => Some(ServerType::Shadowsocks),
            "socks" => Some(ServerType::Socks),
            "trojan" => Some(ServerType::Trojan),
            "vless" => Some(ServerType::Vless),
            "vmess" => Some(ServerType::Vmess),
            _ => None,
        }
    }

    /// Types only offered when the runtime is built with QUIC support.
    pub fn requires_quic(self) -> bool {
        matches!(self, ServerType::Hysteria | ServerType::Naive)
    }

    /// All types in selector order.
    pub fn all() -> &'static [ServerType] {
        &[
            ServerType::Http,
            ServerType::Hysteria,
            ServerType::Naive,
            ServerType::Shadowsocks,
            ServerType::Socks,
            ServerType::Trojan,
            ServerType::Vless,
            ServerType::Vmess,
        ]
    }
}

/// V2Ray-style transport layered under Trojan/VLESS/VMess.
/// The empty uci value means no extra transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Grpc,
    Http,
    Quic,
    Ws,
}

impl Transport {
    pub fn value(self) -> &'static str {
        match self {
            Transport::Grpc => "grpc",
            Transport::Http => "http",
            Transport::Quic => "quic",
            Transport::Ws => "ws",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Transport::Grpc => "gRPC",
            Transport::Http => "HTTP",
            Transport::Quic => "QUIC",
            Transport::Ws => "WebSocket",
        }
    }

    pub fn from_value(value: &str) -> Option<Self> {
        match value {
            "grpc" => Some(Transport::Grpc),
            "http" => Some(Transport::Http),
            "quic" => Some(Transport::Quic),
            "ws" => Some(Transport::Ws),
            _ => None,
        }
    }
}

/// Restriction of a listener to one L4 network. Empty means both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Tcp,
    Udp,
}

impl Network {
    pub fn value(self) -> &'static str {
        match self {
            Network::Tcp => "tcp",
            Network::Udp => "udp",
        }
    }
}

/// Hysteria client authentication scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HysteriaAuthType {
    Disabled,
    Base64,
    String,
}

impl HysteriaAuthType {
    pub fn value(self) -> &'static str {
        match self {
            HysteriaAuthType::Disabled => "disabled",
            HysteriaAuthType::Base64 => "base64",
            HysteriaAuthType::String => "string",
        }
    }
}

/// Shadowsocks encryption methods accepted by sing-box, in selector order.
pub const SHADOWSOCKS_ENCRYPT_METHODS: &[&str] = &[
    "none",
    "aes-128-gcm",
    "aes-192-gcm",
    "aes-256-gcm",
    "chacha20-ietf-poly1305",
    "xchacha20-ietf-poly1305",
    "2022-blake3-aes-128-gcm",
    "2022-blake3-aes-256-gcm",
    "2022-blake3-chacha20-poly1305",
];

/// TLS protocol versions selectable as minimum/maximum bounds.
pub const TLS_VERSIONS: &[&str] = &["1.0", "1.1", "1.2", "1.3"];

/// Go TLS cipher suite identifiers offered for the handshake.
pub const TLS_CIPHER_SUITES: &[&str] = &[
    "TLS_RSA_WITH_AES_128_CBC_SHA",
    "TLS_RSA_WITH_AES_256_CBC_SHA",
    "TLS_RSA_WITH_AES_128_GCM_SHA256",
    "TLS_RSA_WITH_AES_256_GCM_SHA384",
    "TLS_AES_128_GCM_SHA256",
    "TLS_AES_256_GCM_SHA384",
    "TLS_CHACHA20_POLY1305_SHA256",
    "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA",
    "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_ECDSA_WITH_AES_256_GCM_SHA384",
    "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
    "TLS_ECDHE_RSA_WITH_CHACHA20_POLY1305_SHA256",
    "TLS_ECDHE_ECDSA_WITH_CHACHA20_POLY1305_SHA256",
];

/// Domain resolution strategies, as `(value, label)` pairs. The empty value
/// leaves the sniffed domain unresolved.
pub const DNS_STRATEGIES: &[(&str, &str)] = &[
    ("", "Default"),
    ("prefer_ipv4", "Prefer IPv4"),
    ("prefer_ipv6", "Prefer IPv6"),
    ("ipv4_only", "IPv4 only"),
    ("ipv6_only", "IPv6 only"),
];
