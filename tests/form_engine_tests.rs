use proxyform::form::{FormError, SectionForm};
use proxyform::models::Features;
use proxyform::schema::server_form;
use proxyform::uci::UciDocument;

#[cfg(test)]
mod form_engine_tests {
    use super::*;

    fn parse(config: &str) -> UciDocument {
        UciDocument::parse(config).unwrap()
    }

    #[test]
    fn test_entry_lifecycle() {
        let schema = server_form(Features::all());
        let form = SectionForm::new(schema.section_of_type("server").unwrap());
        let mut doc = UciDocument::new();
        doc.set_package("homeproxy");

        form.add_section(&mut doc, "srv1").unwrap();
        assert_eq!(form.default_label(&mut doc, "srv1").unwrap(), "srv1");

        let mut draft = doc.section("srv1").unwrap().clone();
        draft.set("type", "vmess");
        draft.set("port", "10086");
        draft.set("uuid", "f47ac10b-58cc-4372-a567-0e02b2c3d479");
        draft.set("sniff_override", "1");
        form.save(&mut doc, "srv1", &draft).unwrap();

        let saved = doc.section("srv1").unwrap();
        assert_eq!(saved.get("label"), Some("srv1"));
        assert_eq!(saved.get("enabled"), Some("1"));
        assert_eq!(saved.get("uuid"), Some("f47ac10b-58cc-4372-a567-0e02b2c3d479"));
        // The TLS flag is active for vmess and written even when unchecked.
        assert_eq!(saved.get("tls"), Some("0"));
        assert_eq!(saved.get("transport"), None);

        form.remove_section(&mut doc, "srv1").unwrap();
        assert!(doc.section("srv1").is_none());
        assert!(matches!(
            form.remove_section(&mut doc, "srv1"),
            Err(FormError::NoSuchSection(_))
        ));
    }

    #[test]
    fn test_switching_transport_prunes_old_options() {
        let schema = server_form(Features::all());
        let form = SectionForm::new(schema.section_of_type("server").unwrap());
        let mut doc = parse(
            "config server 'v'\n\
             \toption label 'v'\n\
             \toption type 'vless'\n\
             \toption port '443'\n\
             \toption uuid 'f47ac10b-58cc-4372-a567-0e02b2c3d479'\n\
             \toption transport 'ws'\n\
             \toption ws_host 'cdn.example.org'\n\
             \toption ws_path '/stream'\n\
             \toption tls '0'\n\
             \toption sniff_override '1'\n",
        );

        let mut draft = doc.section("v").unwrap().clone();
        draft.set("transport", "grpc");
        draft.set("grpc_servicename", "TunService");
        form.save(&mut doc, "v", &draft).unwrap();

        let saved = doc.section("v").unwrap();
        assert_eq!(saved.get("transport"), Some("grpc"));
        assert_eq!(saved.get("grpc_servicename"), Some("TunService"));
        assert_eq!(saved.get("ws_host"), None);
        assert_eq!(saved.get("ws_path"), None);
    }

    #[test]
    fn test_switching_type_prunes_protocol_group() {
        let schema = server_form(Features::all());
        let form = SectionForm::new(schema.section_of_type("server").unwrap());
        let mut doc = parse(
            "config server 'h'\n\
             \toption label 'h'\n\
             \toption type 'hysteria'\n\
             \toption port '36712'\n\
             \toption hysteria_protocol 'udp'\n\
             \toption hysteria_obfs_password 'obfs'\n\
             \toption hysteria_recv_window_conn '67108864'\n\
             \toption tls '1'\n\
             \toption tls_cert_path '/tmp/cert.pem'\n\
             \toption tls_key_path '/tmp/key.pem'\n\
             \toption sniff_override '1'\n",
        );

        let mut draft = doc.section("h").unwrap().clone();
        draft.set("type", "socks");
        draft.set("username", "admin");
        draft.set("password", "hunter2");
        form.save(&mut doc, "h", &draft).unwrap();

        let saved = doc.section("h").unwrap();
        assert_eq!(saved.get("type"), Some("socks"));
        assert_eq!(saved.get("hysteria_protocol"), None);
        assert_eq!(saved.get("hysteria_obfs_password"), None);
        assert_eq!(saved.get("hysteria_recv_window_conn"), None);
        // socks has no TLS support at all.
        assert_eq!(saved.get("tls"), None);
        assert_eq!(saved.get("tls_cert_path"), None);
    }

    #[test]
    fn test_saved_document_round_trips() {
        let schema = server_form(Features::all());
        let form = SectionForm::new(schema.section_of_type("server").unwrap());
        let mut doc = parse(
            "package homeproxy\n\nconfig server 'ss'\n\
             \toption label 'ss'\n\
             \toption type 'shadowsocks'\n\
             \toption port '8388'\n\
             \toption password 'YWFhYWFhYWFhYWFhYWFhYQ=='\n\
             \toption shadowsocks_encrypt_method '2022-blake3-aes-128-gcm'\n\
             \toption sniff_override '1'\n",
        );

        let draft = doc.section("ss").unwrap().clone();
        form.save(&mut doc, "ss", &draft).unwrap();

        let rendered = doc.to_string();
        let reparsed = UciDocument::parse(&rendered).unwrap();
        assert_eq!(doc, reparsed);
        assert_eq!(
            reparsed.section("ss").unwrap().get("shadowsocks_encrypt_method"),
            Some("2022-blake3-aes-128-gcm")
        );
    }

    #[test]
    fn test_save_blocks_on_duplicate_port() {
        let schema = server_form(Features::all());
        let form = SectionForm::new(schema.section_of_type("server").unwrap());
        let mut doc = parse(
            "config server 'a'\n\
             \toption label 'a'\n\
             \toption type 'socks'\n\
             \toption port '1080'\n\
             \toption username 'u'\n\
             \toption password 'p'\n\
             \toption sniff_override '1'\n\n\
             config server 'b'\n\
             \toption label 'b'\n\
             \toption type 'socks'\n\
             \toption port '1081'\n\
             \toption username 'u'\n\
             \toption password 'p'\n\
             \toption sniff_override '1'\n",
        );

        let mut draft = doc.section("b").unwrap().clone();
        draft.set("port", "1080");
        match form.save(&mut doc, "b", &draft) {
            Err(FormError::Validation(findings)) => {
                assert!(findings
                    .iter()
                    .any(|e| e.option == "port" && e.message == "Expecting: unique value"));
            }
            other => panic!("expected validation failure, got {:?}", other.err()),
        }
        // The stored entry is untouched.
        assert_eq!(doc.section("b").unwrap().get("port"), Some("1081"));
    }

    #[test]
    fn test_global_section_save() {
        let schema = server_form(Features::all());
        let form = SectionForm::new(schema.section_of_type("homeproxy").unwrap());
        let mut doc = parse("config homeproxy 'server'\n\toption enabled '0'\n");

        let mut draft = doc.section("server").unwrap().clone();
        draft.set("enabled", "1");
        draft.set("auto_firewall", "0");
        form.save(&mut doc, "server", &draft).unwrap();

        let saved = doc.section("server").unwrap();
        assert_eq!(saved.get("enabled"), Some("1"));
        // Differs from the default, so it is written out.
        assert_eq!(saved.get("auto_firewall"), Some("0"));

        let mut draft = saved.clone();
        draft.set("auto_firewall", "1");
        form.save(&mut doc, "server", &draft).unwrap();
        // Back at the default, the optional flag is elided.
        assert_eq!(doc.section("server").unwrap().get("auto_firewall"), None);
    }
}
