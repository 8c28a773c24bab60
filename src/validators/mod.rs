//! Validation rules
//!
//! Every function returns `Ok(())` or a human-readable message of the form
//! `Expecting: <requirement>`. The form engine binds these to fields via
//! [`ValidatorRef`](crate::schema::ValidatorRef) and adds the option context
//! itself. Nothing here panics on malformed input.

use base64::{engine::general_purpose, Engine as _};
use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

use crate::uci::UciDocument;

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref HOSTNAME_LABEL_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
    static ref HOSTNAME_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9_][a-zA-Z0-9_\-.]*[a-zA-Z0-9]$").unwrap();
    static ref UCI_NAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_]+$").unwrap();
}

fn expecting(requirement: &str) -> String {
    format!("Expecting: {}", requirement)
}

/// No other section of `section_type` may hold the same value for `option`.
/// The section under edit is identified by `section_id` and skipped.
pub fn unique_value(
    doc: &UciDocument,
    section_type: &str,
    option: &str,
    section_id: &str,
    value: &str,
) -> Result<(), String> {
    if value.is_empty() {
        return Err(expecting("non-empty value"));
    }
    let duplicate = doc
        .sections_of_type(section_type)
        .any(|s| s.name() != Some(section_id) && s.get(option) == Some(value));
    if duplicate {
        return Err(expecting("unique value"));
    }
    Ok(())
}

/// Base64 text of exactly `expected_chars` characters. Empty values pass;
/// requiredness is a separate concern.
pub fn base64_key(expected_chars: usize, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    if value.len() != expected_chars || general_purpose::STANDARD.decode(value).is_err() {
        return Err(expecting(&format!(
            "valid base64 key with {} characters",
            expected_chars
        )));
    }
    Ok(())
}

/// The password rule: Shadowsocks 2022 methods need fixed-size base64 keys,
/// method `none` needs no password at all, every other server type just
/// needs a non-empty value.
pub fn server_password(
    server_type: Option<&str>,
    encrypt_method: Option<&str>,
    value: &str,
) -> Result<(), String> {
    if server_type == Some("shadowsocks") {
        match encrypt_method {
            Some("none") => return Ok(()),
            Some("2022-blake3-aes-128-gcm") => return base64_key(24, value),
            Some("2022-blake3-aes-256-gcm") | Some("2022-blake3-chacha20-poly1305") => {
                return base64_key(44, value)
            }
            _ => {}
        }
    }
    if value.is_empty() {
        return Err(expecting("non-empty value"));
    }
    Ok(())
}

/// Lowercase hyphenated UUID, 36 characters. Empty values pass.
pub fn uuid_string(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    let canonical = Uuid::try_parse(value)
        .map(|u| u.as_hyphenated().to_string())
        .unwrap_or_default();
    if canonical != value {
        return Err(expecting("valid uuid string"));
    }
    Ok(())
}

/// ACME account email address.
pub fn email_address(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(expecting("non-empty value"));
    }
    if !EMAIL_REGEX.is_match(value) {
        return Err(expecting("valid email address"));
    }
    Ok(())
}

/// TCP/UDP port number, 0 to 65535.
pub fn port(value: &str) -> Result<(), String> {
    if value.parse::<u16>().is_err() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(expecting("valid port value"));
    }
    Ok(())
}

/// Non-negative decimal integer.
pub fn uinteger(value: &str) -> Result<(), String> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(expecting("non-negative decimal value"));
    }
    Ok(())
}

/// Hostname: dot-separated labels, 253 characters at most. Plain numeric
/// addresses are not hostnames.
pub fn hostname(value: &str) -> Result<(), String> {
    let valid = value.len() <= 253
        && (HOSTNAME_LABEL_REGEX.is_match(value)
            || (HOSTNAME_REGEX.is_match(value)
                && value.chars().any(|c| !c.is_ascii_digit() && c != '.')));
    if !valid {
        return Err(expecting("valid hostname"));
    }
    Ok(())
}

/// Section identifiers: letters, digits and underscores.
pub fn uci_identifier(value: &str) -> Result<(), String> {
    if !UCI_NAME_REGEX.is_match(value) {
        return Err(expecting("valid UCI identifier"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_servers() -> UciDocument {
        UciDocument::parse(
            "config server 'a'\n\toption label 'alpha'\n\toption port '8080'\n\nconfig server 'b'\n\toption label 'beta'\n\toption port '8443'\n",
        )
        .unwrap()
    }

    #[test]
    fn test_unique_value() {
        let doc = doc_with_servers();
        assert!(unique_value(&doc, "server", "label", "a", "alpha").is_ok());
        assert_eq!(
            unique_value(&doc, "server", "label", "b", "alpha"),
            Err("Expecting: unique value".to_string())
        );
        assert_eq!(
            unique_value(&doc, "server", "port", "a", ""),
            Err("Expecting: non-empty value".to_string())
        );
        assert!(unique_value(&doc, "server", "port", "c", "9090").is_ok());
        assert!(unique_value(&doc, "server", "port", "c", "8080").is_err());
    }

    #[test]
    fn test_base64_key_lengths() {
        // 16 bytes encode to 24 characters, 32 bytes to 44.
        assert!(base64_key(24, "YWFhYWFhYWFhYWFhYWFhYQ==").is_ok());
        assert!(base64_key(44, "YWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWE=").is_ok());

        assert_eq!(
            base64_key(24, "dG9vc2hvcnQ="),
            Err("Expecting: valid base64 key with 24 characters".to_string())
        );
        // Right length, broken alphabet.
        assert!(base64_key(24, "!!!!YWFhYWFhYWFhYWFhYWF?").is_err());
        // Empty passes; the required check is separate.
        assert!(base64_key(24, "").is_ok());
    }

    #[test]
    fn test_server_password_dispatch() {
        // Shadowsocks without encryption needs no password.
        assert!(server_password(Some("shadowsocks"), Some("none"), "").is_ok());

        assert!(server_password(
            Some("shadowsocks"),
            Some("2022-blake3-aes-128-gcm"),
            "YWFhYWFhYWFhYWFhYWFhYQ=="
        )
        .is_ok());
        assert_eq!(
            server_password(Some("shadowsocks"), Some("2022-blake3-aes-256-gcm"), "c2hvcnQ="),
            Err("Expecting: valid base64 key with 44 characters".to_string())
        );
        assert!(server_password(
            Some("shadowsocks"),
            Some("2022-blake3-chacha20-poly1305"),
            "YWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWFhYWE="
        )
        .is_ok());

        // Classic AEAD methods only need something non-empty.
        assert!(server_password(Some("shadowsocks"), Some("aes-128-gcm"), "secret").is_ok());
        assert_eq!(
            server_password(Some("shadowsocks"), Some("aes-128-gcm"), ""),
            Err("Expecting: non-empty value".to_string())
        );

        // Other types: non-empty.
        assert!(server_password(Some("trojan"), None, "hunter2").is_ok());
        assert!(server_password(Some("http"), None, "").is_err());
    }

    #[test]
    fn test_uuid_string() {
        assert!(uuid_string("f47ac10b-58cc-4372-a567-0e02b2c3d479").is_ok());
        assert_eq!(
            uuid_string("F47AC10B-58CC-4372-A567-0E02B2C3D479"),
            Err("Expecting: valid uuid string".to_string())
        );
        assert!(uuid_string("f47ac10b58cc4372a5670e02b2c3d479").is_err());
        assert!(uuid_string("not-a-uuid").is_err());
        // Requiredness is not the validator's concern.
        assert!(uuid_string("").is_ok());
    }

    #[test]
    fn test_email_address() {
        assert!(email_address("admin@example.com").is_ok());
        assert!(email_address("a.b+c@mail.example.org").is_ok());
        assert_eq!(
            email_address("admin@localhost"),
            Err("Expecting: valid email address".to_string())
        );
        assert!(email_address("no at sign").is_err());
        assert!(email_address("two@@example.com").is_err());
        assert!(email_address("with space@example.com").is_err());
    }

    #[test]
    fn test_port() {
        assert!(port("1").is_ok());
        assert!(port("65535").is_ok());
        assert!(port("0").is_ok());
        assert_eq!(port("65536"), Err("Expecting: valid port value".to_string()));
        assert!(port("-1").is_err());
        assert!(port("http").is_err());
        assert!(port("").is_err());
    }

    #[test]
    fn test_uinteger() {
        assert!(uinteger("0").is_ok());
        assert!(uinteger("67108864").is_ok());
        assert_eq!(
            uinteger("-3"),
            Err("Expecting: non-negative decimal value".to_string())
        );
        assert!(uinteger("12.5").is_err());
        assert!(uinteger("").is_err());
    }

    #[test]
    fn test_hostname() {
        assert!(hostname("example.com").is_ok());
        assert!(hostname("sub.domain.example.org").is_ok());
        assert!(hostname("router").is_ok());
        assert!(hostname("_dmarc.example.com").is_ok());
        assert_eq!(
            hostname("bad host"),
            Err("Expecting: valid hostname".to_string())
        );
        assert!(hostname("-leading.example.com").is_err());
        assert!(hostname(&"a".repeat(254)).is_err());
        assert!(hostname("").is_err());
    }

    #[test]
    fn test_uci_identifier() {
        assert!(uci_identifier("server_1").is_ok());
        assert!(uci_identifier("CFG03").is_ok());
        assert_eq!(
            uci_identifier("bad-name"),
            Err("Expecting: valid UCI identifier".to_string())
        );
        assert!(uci_identifier("").is_err());
        assert!(uci_identifier("name with space").is_err());
    }
}
