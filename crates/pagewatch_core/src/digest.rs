use std::fmt;

/// Whitespace-collapsed, markup-free page text used as the comparison basis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CanonicalText(String);

impl CanonicalText {
    /// Wraps text that is already in canonical form.
    pub fn from_canonical(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for CanonicalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lowercase hexadecimal digest of a canonical text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` characters, for compact display.
    pub fn short(&self, len: usize) -> &str {
        match self.0.char_indices().nth(len) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Fingerprint;

    #[test]
    fn short_truncates_hex_and_tolerates_short_values() {
        let fp = Fingerprint::from_hex("a591a6d40bf420404a011733cfb7b190");
        assert_eq!(fp.short(8), "a591a6d4");
        assert_eq!(fp.short(100), fp.as_str());
        assert_eq!(Fingerprint::from_hex("").short(4), "");
    }

    #[test]
    fn short_cuts_on_character_boundaries() {
        let fp = Fingerprint::from_hex("éé-ü");
        assert_eq!(fp.short(1), "é");
        assert_eq!(fp.short(3), "éé-");
    }
}
