use std::fmt::Write;

use pagewatch_core::Fingerprint;
use sha2::{Digest, Sha256};

/// Hex length of a SHA-256 fingerprint.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// SHA-256 over the UTF-8 bytes of `text`, as lowercase hex.
pub fn fingerprint(text: &str) -> Fingerprint {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex = String::with_capacity(FINGERPRINT_HEX_LEN);
    for byte in digest.iter() {
        let _ = write!(&mut hex, "{byte:02x}");
    }
    Fingerprint::from_hex(hex)
}
