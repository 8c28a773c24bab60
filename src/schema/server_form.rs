//! The server administration form
//!
//! [`server_form`] declares every section and field of the form for editing
//! proxy server instances of the `homeproxy` package. It is a pure function
//! of the runtime features: QUIC-based server types and the ACME group are
//! only offered when the matching build tag is present.

use crate::models::{
    Features, ServerType, DNS_STRATEGIES, SHADOWSOCKS_ENCRYPT_METHODS, TLS_CIPHER_SUITES,
    TLS_VERSIONS,
};

use super::changes::{ChangeEffect, ChangeRule};
use super::depends::DependsClause;
use super::field::{Datatype, FieldKind, UploadAction, ValidatorRef};
use super::{FormSchema, SectionSchema};

/// Default description of the transport selector.
pub const TRANSPORT_DESC: &str =
    "No TCP transport, plain HTTP is merged into the HTTP transport.";
/// Description shown while the HTTP transport is selected.
pub const TRANSPORT_DESC_HTTP: &str =
    "TLS is not enforced. If TLS is not configured, plain HTTP 1.1 is used.";
/// Description shown while the QUIC transport is selected.
pub const TRANSPORT_DESC_QUIC: &str =
    "No additional encryption support: It's basically duplicate encryption.";

const CERT_PATH: &str = "/etc/homeproxy/certs/server_publickey.pem";
const KEY_PATH: &str = "/etc/homeproxy/certs/server_privatekey.pem";

/// Build the complete server form schema for the given runtime features.
pub fn server_form(features: Features) -> FormSchema {
    FormSchema {
        package: "homeproxy".to_string(),
        title: "Edit servers".to_string(),
        sections: vec![global_section(), server_section(features)],
    }
}

fn global_section() -> SectionSchema {
    let mut s = SectionSchema::named("homeproxy", "server", "Global settings");

    let o = s.option(FieldKind::Flag, "enabled", "Enable");
    o.default = Some("0".to_string());
    o.required = true;

    let o = s.option(FieldKind::Flag, "auto_firewall", "Auto configure firewall");
    o.default = Some("1".to_string());

    s
}

fn server_section(features: Features) -> SectionSchema {
    let mut s = SectionSchema::grid("server");
    s.addremove = true;
    s.sortable = true;
    s.nodescriptions = true;
    s.modal_title = Some("Server".to_string());
    s.add_title = Some("Add a server".to_string());

    let o = s.option(FieldKind::Value, "label", "Label");
    o.required = true;
    o.modal_only = true;
    o.validator = Some(ValidatorRef::UniqueValue);

    let o = s.option(FieldKind::Flag, "enabled", "Enable");
    o.default = Some("1".to_string());
    o.required = true;
    o.editable = true;

    let o = s.option(FieldKind::ListValue, "type", "Type");
    for &server_type in ServerType::all() {
        if server_type.requires_quic() && !features.with_quic {
            continue;
        }
        o.choice(server_type.value(), server_type.label());
    }
    o.required = true;

    let o = s.option(FieldKind::Value, "port", "Port");
    o.description = Some("The port must be unique.".to_string());
    o.datatype = Some(Datatype::Port);
    o.validator = Some(ValidatorRef::UniqueValue);

    let o = s.option(FieldKind::Value, "username", "Username");
    o.depends_on("type", "http")
        .depends_on("type", "naive")
        .depends_on("type", "socks");
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "password", "Password");
    o.password = true;
    o.depends_on("type", "http")
        .depends_on("type", "naive")
        .depends_on("type", "shadowsocks")
        .depends_on("type", "socks")
        .depends_on("type", "trojan");
    o.validator = Some(ValidatorRef::ServerPassword);
    o.modal_only = true;

    // Hysteria settings
    let o = s.option(FieldKind::ListValue, "hysteria_protocol", "Protocol");
    o.choice_plain("udp");
    o.default = Some("udp".to_string());
    o.depends_on("type", "hysteria");
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "hysteria_down_mbps", "Max download speed");
    o.description = Some("Max download speed in Mbps.".to_string());
    o.datatype = Some(Datatype::UInteger);
    o.depends_on("type", "hysteria");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "hysteria_up_mbps", "Max upload speed");
    o.description = Some("Max upload speed in Mbps.".to_string());
    o.datatype = Some(Datatype::UInteger);
    o.depends_on("type", "hysteria");
    o.modal_only = true;

    let o = s.option(FieldKind::ListValue, "hysteria_auth_type", "Authentication type");
    o.choice("disabled", "Disable")
        .choice("base64", "Base64")
        .choice("string", "String");
    o.default = Some("disabled".to_string());
    o.depends_on("type", "hysteria");
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "hysteria_auth_payload", "Authentication payload");
    o.depends_when(DependsClause::equals("type", "hysteria").and_equals("hysteria_auth_type", "base64"));
    o.depends_when(DependsClause::equals("type", "hysteria").and_equals("hysteria_auth_type", "string"));
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "hysteria_obfs_password", "Obfuscate password");
    o.depends_on("type", "hysteria");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "hysteria_recv_window_conn", "QUIC stream receive window");
    o.description =
        Some("The QUIC stream-level flow control window for receiving data.".to_string());
    o.datatype = Some(Datatype::UInteger);
    o.default = Some("67108864".to_string());
    o.depends_on("type", "hysteria");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "hysteria_recv_window_client", "QUIC connection receive window");
    o.description =
        Some("The QUIC connection-level flow control window for receiving data.".to_string());
    o.datatype = Some(Datatype::UInteger);
    o.default = Some("15728640".to_string());
    o.depends_on("type", "hysteria");
    o.modal_only = true;

    let o = s.option(
        FieldKind::Value,
        "hysteria_max_conn_client",
        "QUIC maximum concurrent bidirectional streams",
    );
    o.description = Some(
        "The maximum number of QUIC concurrent bidirectional streams that a peer is allowed to open."
            .to_string(),
    );
    o.datatype = Some(Datatype::UInteger);
    o.default = Some("1024".to_string());
    o.depends_on("type", "hysteria");
    o.modal_only = true;

    let o = s.option(
        FieldKind::Flag,
        "hysteria_disable_mtu_discovery",
        "Disable Path MTU discovery",
    );
    o.description = Some(
        "Disables Path MTU Discovery (RFC 8899). Packets will then be at most 1252 (IPv4) / 1232 (IPv6) bytes in size."
            .to_string(),
    );
    o.default = Some("0".to_string());
    o.depends_on("type", "hysteria");
    o.modal_only = true;

    // Shadowsocks settings
    let o = s.option(FieldKind::ListValue, "shadowsocks_encrypt_method", "Encrypt method");
    for method in SHADOWSOCKS_ENCRYPT_METHODS {
        o.choice_plain(method);
    }
    o.default = Some("aes-128-gcm".to_string());
    o.depends_on("type", "shadowsocks");
    o.modal_only = true;

    // VLESS / VMess settings
    let o = s.option(FieldKind::Value, "uuid", "UUID");
    o.depends_on("type", "vless").depends_on("type", "vmess");
    o.validator = Some(ValidatorRef::Uuid);
    o.modal_only = true;

    let o = s.option(FieldKind::ListValue, "vless_flow", "Flow");
    o.choice("", "None").choice_plain("xtls-rprx-vision");
    o.depends_on("type", "vless");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "vmess_alterid", "Alter ID");
    o.description = Some(
        "Legacy protocol support (VMess MD5 Authentication) is provided for compatibility purposes only, use of alterId > 1 is not recommended."
            .to_string(),
    );
    o.datatype = Some(Datatype::UInteger);
    o.depends_on("type", "vmess");
    o.modal_only = true;

    // Transport settings
    let o = s.option(FieldKind::ListValue, "transport", "Transport");
    o.description = Some(TRANSPORT_DESC.to_string());
    o.choice("", "None")
        .choice("grpc", "gRPC")
        .choice("http", "HTTP")
        .choice("quic", "QUIC")
        .choice("ws", "WebSocket");
    o.depends_on("type", "trojan")
        .depends_on("type", "vless")
        .depends_on("type", "vmess");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "grpc_servicename", "gRPC service name");
    o.depends_on("transport", "grpc");
    o.modal_only = true;

    let o = s.option(FieldKind::DynamicList, "http_host", "Host");
    o.datatype = Some(Datatype::Hostname);
    o.depends_on("transport", "http");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "http_path", "Path");
    o.depends_on("transport", "http");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "http_method", "Method");
    o.depends_on("transport", "http");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "ws_host", "Host");
    o.depends_on("transport", "ws");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "ws_path", "Path");
    o.depends_on("transport", "ws");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "websocket_early_data", "Early data");
    o.description = Some("Allowed payload size is in the request.".to_string());
    o.datatype = Some(Datatype::UInteger);
    o.suggest("2048");
    o.depends_on("transport", "ws");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "websocket_early_data_header", "Early data header name");
    o.description = Some(
        "Early data is sent in path instead of header by default.<br/>To be compatible with Xray-core, set this to <code>Sec-WebSocket-Protocol</code>."
            .to_string(),
    );
    o.suggest("Sec-WebSocket-Protocol");
    o.depends_on("transport", "ws");
    o.modal_only = true;

    // TLS settings
    let o = s.option(FieldKind::Flag, "tls", "TLS");
    o.default = Some("0".to_string());
    o.depends_on("type", "http")
        .depends_on("type", "hysteria")
        .depends_on("type", "naive")
        .depends_on("type", "trojan")
        .depends_on("type", "vless")
        .depends_on("type", "vmess");
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "tls_sni", "TLS SNI");
    o.description = Some(
        "Used to verify the hostname on the returned certificates unless insecure is given."
            .to_string(),
    );
    o.depends_on("tls", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::DynamicList, "tls_alpn", "TLS ALPN");
    o.description =
        Some("List of supported application level protocols, in order of preference.".to_string());
    o.depends_on("tls", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::ListValue, "tls_min_version", "Minimum TLS version");
    o.description = Some("The minimum TLS version that is acceptable.".to_string());
    o.choice("", "default");
    for version in TLS_VERSIONS {
        o.choice_plain(version);
    }
    o.depends_on("tls", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::ListValue, "tls_max_version", "Maximum TLS version");
    o.description = Some("The maximum TLS version that is acceptable.".to_string());
    o.choice("", "default");
    for version in TLS_VERSIONS {
        o.choice_plain(version);
    }
    o.depends_on("tls", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::MultiValue, "tls_cipher_suites", "Cipher suites");
    o.description = Some(
        "The elliptic curves that will be used in an ECDHE handshake, in preference order. If empty, the default will be used."
            .to_string(),
    );
    for suite in TLS_CIPHER_SUITES {
        o.choice_plain(suite);
    }
    o.depends_on("tls", "1");
    o.modal_only = true;

    if features.with_acme {
        acme_fields(&mut s);
    }

    let o = s.option(FieldKind::Value, "tls_cert_path", "Certificate path");
    o.description = Some("The server public key, in PEM format.".to_string());
    o.suggest(CERT_PATH);
    o.depends_when(DependsClause::equals("tls", "1").and_unset("tls_acme"));
    o.depends_when(DependsClause::equals("tls", "1").and_equals("tls_acme", "0"));
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Button, "_upload_cert", "Upload certificate");
    o.description = Some("<strong>Save your configuration before uploading files!</strong>".to_string());
    o.depends_when(DependsClause::equals("tls", "1").and_equals("tls_cert_path", CERT_PATH));
    o.upload = Some(UploadAction {
        item: "certificate".to_string(),
        file_stem: "server_publickey".to_string(),
    });
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "tls_key_path", "Key path");
    o.description = Some("The server private key, in PEM format.".to_string());
    o.suggest(KEY_PATH);
    o.depends_when(DependsClause::equals("tls", "1").and_unset("tls_acme"));
    o.depends_when(DependsClause::equals("tls", "1").and_equals("tls_acme", "0"));
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Button, "_upload_key", "Upload key");
    o.description = Some("<strong>Save your configuration before uploading files!</strong>".to_string());
    o.depends_when(DependsClause::equals("tls", "1").and_equals("tls_key_path", KEY_PATH));
    o.upload = Some(UploadAction {
        item: "private key".to_string(),
        file_stem: "server_privatekey".to_string(),
    });
    o.modal_only = true;

    // Extra settings
    let o = s.option(FieldKind::Flag, "tcp_fast_open", "TCP fast open");
    o.description = Some("Enable tcp fast open for listener.".to_string());
    o.default = Some("0".to_string());
    o.depends_when(DependsClause::not_equals("network", "udp"));
    o.modal_only = true;

    let o = s.option(FieldKind::Flag, "udp_fragment", "UDP Fragment");
    o.description = Some("Enable UDP fragmentation.".to_string());
    o.default = Some("0".to_string());
    o.depends_when(DependsClause::not_equals("network", "tcp"));
    o.modal_only = true;

    let o = s.option(FieldKind::Flag, "sniff_override", "Override destination");
    o.description =
        Some("Override the connection destination address with the sniffed domain.".to_string());
    o.required = true;

    let o = s.option(FieldKind::ListValue, "domain_strategy", "Domain strategy");
    o.description =
        Some("If set, the requested domain name will be resolved to IP before routing.".to_string());
    for (value, label) in DNS_STRATEGIES {
        o.choice(value, label);
    }
    o.modal_only = true;

    let o = s.option(FieldKind::Flag, "proxy_protocol", "Proxy protocol");
    o.description = Some("Parse Proxy Protocol in the connection header.".to_string());
    o.default = Some("0".to_string());
    o.depends_when(DependsClause::not_equals("network", "udp"));
    o.modal_only = true;

    let o = s.option(FieldKind::Flag, "proxy_protocol_accept_no_header", "Accept no header");
    o.description = Some("Accept connections without Proxy Protocol header.".to_string());
    o.default = Some("0".to_string());
    o.depends_on("proxy_protocol", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::ListValue, "network", "Network");
    o.choice("tcp", "TCP").choice("udp", "UDP").choice("", "Both");
    o.depends_on("type", "naive").depends_on("type", "shadowsocks");
    o.modal_only = true;

    s.changes = vec![
        ChangeRule::new("type")
            .on_value(
                "hysteria",
                vec![
                    ChangeEffect::SetValue {
                        option: "tls".to_string(),
                        value: "1".to_string(),
                    },
                    ChangeEffect::DisableField {
                        option: "tls".to_string(),
                    },
                ],
            )
            .otherwise(vec![ChangeEffect::EnableField {
                option: "tls".to_string(),
            }]),
        ChangeRule::new("transport")
            .on_value(
                "http",
                vec![ChangeEffect::SetDescription {
                    option: "transport".to_string(),
                    text: TRANSPORT_DESC_HTTP.to_string(),
                }],
            )
            .on_value(
                "quic",
                vec![ChangeEffect::SetDescription {
                    option: "transport".to_string(),
                    text: TRANSPORT_DESC_QUIC.to_string(),
                }],
            )
            .otherwise(vec![ChangeEffect::SetDescription {
                option: "transport".to_string(),
                text: TRANSPORT_DESC.to_string(),
            }]),
    ];

    s
}

fn acme_fields(s: &mut SectionSchema) {
    let o = s.option(FieldKind::Flag, "tls_acme", "Enable ACME");
    o.description = Some("Use ACME TLS certificate issuer.".to_string());
    o.default = Some("0".to_string());
    o.depends_on("tls", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::DynamicList, "tls_acme_domain", "Domains");
    o.datatype = Some(Datatype::Hostname);
    o.depends_on("tls_acme", "1");
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "tls_acme_dsn", "Default server name");
    o.description = Some(
        "Server name to use when choosing a certificate if the ClientHello's ServerName field is empty."
            .to_string(),
    );
    o.depends_on("tls_acme", "1");
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "tls_acme_email", "Email");
    o.description = Some(
        "The email address to use when creating or selecting an existing ACME server account."
            .to_string(),
    );
    o.depends_on("tls_acme", "1");
    o.validator = Some(ValidatorRef::Email);
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "tls_acme_provider", "CA provider");
    o.description = Some("The ACME CA provider to use.".to_string());
    o.suggest_labeled("letsencrypt", "Let's Encrypt")
        .suggest_labeled("zerossl", "ZeroSSL");
    o.depends_on("tls_acme", "1");
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Flag, "tls_acme_dhc", "Disable HTTP challenge");
    o.default = Some("0".to_string());
    o.depends_on("tls_acme", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::Flag, "tls_acme_dtac", "Disable TLS ALPN challenge");
    o.default = Some("0".to_string());
    o.depends_on("tls_acme", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "tls_acme_ahp", "Alternative HTTP port");
    o.description = Some(
        "The alternate port to use for the ACME HTTP challenge; if non-empty, this port will be used instead of 80 to spin up a listener for the HTTP challenge."
            .to_string(),
    );
    o.datatype = Some(Datatype::Port);
    o.depends_on("tls_acme", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "tls_acme_atp", "Alternative TLS port");
    o.description = Some(
        "The alternate port to use for the ACME TLS-ALPN challenge; the system must forward 443 to this port for challenge to succeed."
            .to_string(),
    );
    o.datatype = Some(Datatype::Port);
    o.depends_on("tls_acme", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::Flag, "tls_acme_external_account", "External Account Binding");
    o.description = Some(
        "EAB (External Account Binding) contains information necessary to bind or map an ACME account to some other account known by the CA.<br/>External account bindings are \"used to associate an ACME account with an existing account in a non-ACME system, such as a CA customer database."
            .to_string(),
    );
    o.default = Some("0".to_string());
    o.depends_on("tls_acme", "1");
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "tls_acme_ea_keyid", "External account key ID");
    o.depends_on("tls_acme_external_account", "1");
    o.required = true;
    o.modal_only = true;

    let o = s.option(FieldKind::Value, "tls_acme_ea_mackey", "External account MAC key");
    o.depends_on("tls_acme_external_account", "1");
    o.required = true;
    o.modal_only = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Expect, FieldKind};

    #[test]
    fn test_sections() {
        let schema = server_form(Features::all());
        assert_eq!(schema.package, "homeproxy");
        assert_eq!(schema.sections.len(), 2);

        let global = schema.section_of_type("homeproxy").unwrap();
        assert_eq!(global.name.as_deref(), Some("server"));
        assert_eq!(global.fields.len(), 2);

        let grid = schema.section_of_type("server").unwrap();
        assert!(grid.addremove && grid.sortable && grid.nodescriptions);
        assert_eq!(grid.modal_title.as_deref(), Some("Server"));
    }

    #[test]
    fn test_quic_gates_type_choices() {
        let full = server_form(Features::all());
        let types = full.section_of_type("server").unwrap().field("type").unwrap();
        assert!(types.has_choice("hysteria"));
        assert!(types.has_choice("naive"));
        assert_eq!(types.choices.len(), 8);

        let bare = server_form(Features::default());
        let types = bare.section_of_type("server").unwrap().field("type").unwrap();
        assert!(!types.has_choice("hysteria"));
        assert!(!types.has_choice("naive"));
        assert_eq!(types.choices.len(), 6);
    }

    #[test]
    fn test_acme_gates_field_group() {
        let full = server_form(Features::all());
        let grid = full.section_of_type("server").unwrap();
        assert!(grid.field("tls_acme").is_some());
        assert!(grid.field("tls_acme_email").is_some());
        assert_eq!(grid.fields.len(), 58);

        let bare = server_form(Features::default());
        let grid = bare.section_of_type("server").unwrap();
        assert!(grid.field("tls_acme").is_none());
        assert!(grid.field("tls_acme_email").is_none());
        assert_eq!(grid.fields.len(), 46);
    }

    #[test]
    fn test_field_order_matches_form() {
        let schema = server_form(Features::all());
        let grid = schema.section_of_type("server").unwrap();
        let head: Vec<&str> = grid.fields.iter().take(6).map(|f| f.option.as_str()).collect();
        assert_eq!(
            head,
            vec!["label", "enabled", "type", "port", "username", "password"]
        );
        assert_eq!(grid.fields.last().unwrap().option, "network");
    }

    #[test]
    fn test_cert_path_dependencies() {
        let schema = server_form(Features::all());
        let field = schema
            .section_of_type("server")
            .unwrap()
            .field("tls_cert_path")
            .unwrap();
        assert_eq!(field.depends.len(), 2);
        assert!(field.depends[0]
            .conditions
            .iter()
            .any(|c| c.option == "tls_acme" && c.expect == Expect::Unset));
        assert!(field.suggestions.iter().any(|c| c.value == CERT_PATH));
    }

    #[test]
    fn test_reverse_network_dependencies() {
        let schema = server_form(Features::all());
        let grid = schema.section_of_type("server").unwrap();
        let tfo = grid.field("tcp_fast_open").unwrap();
        assert!(tfo.depends[0].reverse);
        let frag = grid.field("udp_fragment").unwrap();
        assert_eq!(frag.depends[0].conditions[0].option, "network");
    }

    #[test]
    fn test_change_rules() {
        let schema = server_form(Features::all());
        let grid = schema.section_of_type("server").unwrap();

        let type_rule = grid.rules_for("type").next().unwrap();
        let effects = type_rule.effects_for("hysteria");
        assert!(effects.contains(&ChangeEffect::SetValue {
            option: "tls".to_string(),
            value: "1".to_string()
        }));
        assert!(effects.contains(&ChangeEffect::DisableField {
            option: "tls".to_string()
        }));
        assert_eq!(
            type_rule.effects_for("socks"),
            &[ChangeEffect::EnableField {
                option: "tls".to_string()
            }]
        );

        let transport_rule = grid.rules_for("transport").next().unwrap();
        assert_eq!(
            transport_rule.effects_for("http"),
            &[ChangeEffect::SetDescription {
                option: "transport".to_string(),
                text: TRANSPORT_DESC_HTTP.to_string()
            }]
        );
    }

    #[test]
    fn test_dependencies_reference_declared_fields() {
        let schema = server_form(Features::all());
        let grid = schema.section_of_type("server").unwrap();
        for field in &grid.fields {
            for clause in &field.depends {
                for option in clause.referenced_options() {
                    assert!(
                        grid.field(option).is_some(),
                        "field '{}' depends on undeclared option '{}'",
                        field.option,
                        option
                    );
                }
            }
        }
    }

    #[test]
    fn test_upload_buttons_carry_targets() {
        let schema = server_form(Features::all());
        let grid = schema.section_of_type("server").unwrap();
        let button = grid.field("_upload_cert").unwrap();
        assert_eq!(button.kind, FieldKind::Button);
        assert_eq!(button.upload.as_ref().unwrap().file_stem, "server_publickey");
    }

    #[test]
    fn test_schema_serializes() {
        let schema = server_form(Features::all());
        let json = serde_json::to_string(&schema).unwrap();
        let parsed: FormSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.sections[1].fields.len(), 58);
    }
}
