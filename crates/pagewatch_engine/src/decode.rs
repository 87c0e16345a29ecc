use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use watch_logging::watch_debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub text: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub lossy: bool,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed {encoding} input")]
    Malformed { encoding: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    #[default]
    Lenient,
    Strict,
}

/// Decode a response body into UTF-8: BOM -> Content-Type charset -> chardetng guess.
pub fn decode_body(
    bytes: &[u8],
    content_type: Option<&str>,
    mode: DecodeMode,
) -> Result<DecodedBody, DecodeError> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding, mode);
    }

    if let Some(enc) = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, enc, mode);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc, mode)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        let value = value.trim().trim_matches(['"', '\'']);
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn decode_with(
    bytes: &[u8],
    enc: &'static Encoding,
    mode: DecodeMode,
) -> Result<DecodedBody, DecodeError> {
    // `decode` also sniffs a BOM; the label above already accounts for it.
    let (text, used, had_errors) = enc.decode(bytes);
    if had_errors {
        if mode == DecodeMode::Strict {
            return Err(DecodeError::Malformed {
                encoding: used.name().to_string(),
            });
        }
        watch_debug!("lossy {} decode of {} bytes", used.name(), bytes.len());
    }
    Ok(DecodedBody {
        text: text.into_owned(),
        encoding_label: used.name().to_string(),
        lossy: had_errors,
    })
}
