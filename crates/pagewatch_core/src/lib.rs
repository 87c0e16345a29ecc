//! Pagewatch core: monitored-resource records and their pure state transitions.
mod digest;
mod resource;
mod snapshot;
mod target;

pub use digest::{CanonicalText, Fingerprint};
pub use resource::MonitoredResource;
pub use snapshot::{ResourceSnapshot, ResourceState};
pub use target::{validate_url, UrlError};
