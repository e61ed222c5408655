#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use chatterbox_gateway::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:3000"
chat:
  ai_reply_delay: 1000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:3000");
    assert!(cfg.server.index_html.is_none());
    assert_eq!(cfg.realtime.outbound_queue, 1024);
    assert_eq!(cfg.chat.ai_reply_delay_ms, 1000);
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:9000"
  index_html: "public/index.html"
realtime:
  outbound_queue: 64
chat:
  ai_reply_delay_ms: 250
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 9000);
    assert_eq!(cfg.server.index_html.as_deref(), Some("public/index.html"));
    assert_eq!(cfg.realtime.outbound_queue, 64);
    assert_eq!(cfg.chat.ai_reply_delay_ms, 250);
}

#[test]
fn rejects_bad_values() {
    let cases = [
        ("version: 2\n", "UNSUPPORTED_VERSION"),
        ("version: 1\nserver: { listen: \"not-an-addr\" }\n", "BAD_REQUEST"),
        ("version: 1\nrealtime: { outbound_queue: 1 }\n", "BAD_REQUEST"),
        ("version: 1\nchat: { ai_reply_delay_ms: 60001 }\n", "BAD_REQUEST"),
        ("server: { listen: \"0.0.0.0:1\" }\n", "BAD_REQUEST"),
    ];
    for (yaml, code) in cases {
        let err = config::load_from_str(yaml).expect_err(yaml);
        assert_eq!(err.client_code().as_str(), code, "yaml={yaml}");
    }
}

#[test]
fn missing_file_means_defaults() {
    let cfg = config::load_or_default("definitely/not/here/chatterbox.yaml").expect("defaults");
    assert_eq!(cfg.version, 1);
    assert!(config::load_from_file("definitely/not/here/chatterbox.yaml").is_err());
}
