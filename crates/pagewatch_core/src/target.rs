use url::Url;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UrlError {
    #[error("url is empty")]
    Empty,
    #[error("url could not be parsed: {0}")]
    Malformed(String),
    #[error("url has no host")]
    MissingHost,
}

/// Accepts only absolute URLs carrying both a scheme and a non-empty host.
///
/// Surrounding whitespace is ignored; the scheme itself is not restricted.
pub fn validate_url(raw: &str) -> Result<Url, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }
    let parsed = Url::parse(trimmed).map_err(|err| UrlError::Malformed(err.to_string()))?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(parsed),
        _ => Err(UrlError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_url, UrlError};

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("  http://example.com/a?b=c  ").is_ok());
    }

    #[test]
    fn rejects_relative_and_hostless() {
        assert_eq!(validate_url(""), Err(UrlError::Empty));
        assert!(matches!(
            validate_url("example.com/page"),
            Err(UrlError::Malformed(_))
        ));
        assert_eq!(validate_url("mailto:someone@example.com"), Err(UrlError::MissingHost));
        assert_eq!(validate_url("file:///tmp/page.html"), Err(UrlError::MissingHost));
    }
}
