use std::sync::Arc;

use pagewatch_core::{CanonicalText, Fingerprint};
use url::Url;
use watch_logging::watch_debug;

use crate::decode::{decode_body, DecodeMode};
use crate::fingerprint::fingerprint;
use crate::{Fetcher, PipelineError, TextNormalizer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub fingerprint: Fingerprint,
    pub text: CanonicalText,
}

/// Fetch -> decode -> normalize -> fingerprint. The first failing stage wins.
#[derive(Clone)]
pub struct Pipeline {
    fetcher: Arc<dyn Fetcher>,
    normalizer: TextNormalizer,
    decode_mode: DecodeMode,
}

impl Pipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, normalizer: TextNormalizer) -> Self {
        Self {
            fetcher,
            normalizer,
            decode_mode: DecodeMode::default(),
        }
    }

    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.decode_mode = mode;
        self
    }

    pub async fn run(&self, url: &Url) -> Result<PipelineOutput, PipelineError> {
        let fetched = self.fetcher.fetch(url).await?;
        let meta = &fetched.metadata;
        watch_debug!(
            "{} -> {} status {} ({} bytes)",
            meta.requested_url,
            meta.final_url,
            meta.status,
            meta.byte_len
        );
        let decoded = decode_body(
            &fetched.bytes,
            fetched.metadata.content_type.as_deref(),
            self.decode_mode,
        )?;
        let text = self.normalizer.normalize(&decoded.text);
        Ok(PipelineOutput {
            fingerprint: fingerprint(text.as_str()),
            text,
        })
    }
}
