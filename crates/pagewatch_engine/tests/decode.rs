use pagewatch_engine::{decode_body, DecodeError, DecodeMode, TextNormalizer};
use pretty_assertions::assert_eq;

#[test]
fn decode_respects_charset_header() {
    let bytes = b"caf\xe9"; // iso-8859-1
    let decoded = decode_body(bytes, Some("text/html; charset=ISO-8859-1"), DecodeMode::Lenient)
        .unwrap();
    assert_eq!(decoded.text, "café");
    assert!(!decoded.lossy);
    assert!(
        decoded.encoding_label.eq_ignore_ascii_case("ISO-8859-1")
            || decoded.encoding_label.eq_ignore_ascii_case("windows-1252")
    );
}

#[test]
fn decode_handles_utf8_bom() {
    let bytes = b"\xEF\xBB\xBFhello";
    let decoded = decode_body(bytes, Some("text/html"), DecodeMode::Lenient).unwrap();
    assert_eq!(decoded.text, "hello");
    assert_eq!(decoded.encoding_label, "UTF-8");
}

#[test]
fn decode_without_charset_detects_utf8() {
    let decoded = decode_body("ação".as_bytes(), None, DecodeMode::Lenient).unwrap();
    assert_eq!(decoded.text, "ação");
}

#[test]
fn lenient_mode_replaces_malformed_bytes() {
    let decoded =
        decode_body(b"ok \xff", Some("text/html; charset=utf-8"), DecodeMode::Lenient).unwrap();
    assert_eq!(decoded.text, "ok \u{fffd}");
    assert!(decoded.lossy);
}

#[test]
fn strict_mode_rejects_malformed_bytes() {
    let err = decode_body(b"ok \xff", Some("text/html; charset=utf-8"), DecodeMode::Strict)
        .unwrap_err();
    assert_eq!(
        err,
        DecodeError::Malformed {
            encoding: "UTF-8".to_string()
        }
    );
}

#[test]
fn decode_then_normalize_is_deterministic() {
    let bytes = br#"<html><head><title>X</title></head><body><article><p>A</p> <p>B</p></article></body></html>"#;
    let decoded = decode_body(bytes, Some("text/html; charset=utf-8"), DecodeMode::Lenient).unwrap();
    let text = TextNormalizer::default().normalize(&decoded.text);
    assert_eq!(text.as_str(), "XA B");
}
