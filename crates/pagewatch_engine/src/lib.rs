//! Pagewatch engine: fetch, normalize, fingerprint and track pages for changes.
mod decode;
mod engine;
mod fetch;
mod fingerprint;
mod normalize;
mod pipeline;
mod registry;
mod settings;
mod types;

pub use decode::{decode_body, DecodeError, DecodeMode, DecodedBody};
pub use engine::MonitorHandle;
pub use fetch::{Fetcher, ReqwestFetcher};
pub use fingerprint::{fingerprint, FINGERPRINT_HEX_LEN};
pub use normalize::{
    collapse_whitespace, TagDenyList, TextNormalizer, VisibilityFilter, NON_RENDERED_TAGS,
};
pub use pipeline::{Pipeline, PipelineOutput};
pub use registry::{Clock, Registry, ResourceIter, ResourceList};
pub use settings::{FetchSettings, MonitorSettings, DEFAULT_USER_AGENT};
pub use types::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, MonitorError, PipelineError,
};
