use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use pagewatch_core::{validate_url, MonitoredResource, ResourceSnapshot};
use url::Url;
use watch_logging::{watch_info, watch_warn};

use crate::{FetchError, MonitorError, MonitorSettings, Pipeline, ReqwestFetcher, TextNormalizer};

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

type EntryId = u64;

struct Entry {
    url: Url,
    /// Held for the whole read-modify-write of a check.
    check_lock: tokio::sync::Mutex<()>,
    record: Mutex<MonitoredResource>,
}

impl Entry {
    fn record(&self) -> MutexGuard<'_, MonitoredResource> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> ResourceSnapshot {
        self.record().snapshot()
    }
}

#[derive(Default)]
struct Index {
    next_id: EntryId,
    /// Ascending ids give insertion order.
    entries: BTreeMap<EntryId, Arc<Entry>>,
    by_url: HashMap<String, EntryId>,
}

impl Index {
    fn lookup(&self, url: &str) -> Option<(EntryId, Arc<Entry>)> {
        let id = *self.by_url.get(url)?;
        self.entries.get(&id).map(|entry| (id, entry.clone()))
    }

    fn is_current(&self, url: &str, id: EntryId) -> bool {
        self.by_url.get(url) == Some(&id)
    }
}

/// Owns every monitored resource. Checks on the same URL are serialized;
/// unrelated URLs proceed concurrently.
pub struct Registry {
    pipeline: Pipeline,
    clock: Clock,
    index: Mutex<Index>,
}

impl Registry {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            clock: Arc::new(Utc::now),
            index: Mutex::new(Index::default()),
        }
    }

    /// Registry backed by a [`ReqwestFetcher`] and the default normalizer.
    pub fn from_settings(settings: MonitorSettings) -> Result<Self, FetchError> {
        let decode_mode = if settings.strict_decoding {
            crate::DecodeMode::Strict
        } else {
            crate::DecodeMode::Lenient
        };
        let fetcher = ReqwestFetcher::new(settings.fetch)?;
        let pipeline = Pipeline::new(Arc::new(fetcher), TextNormalizer::default())
            .with_decode_mode(decode_mode);
        Ok(Self::new(pipeline))
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn index(&self) -> MutexGuard<'_, Index> {
        self.index.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the page and records its fingerprint as the baseline. A failed
    /// fetch leaves nothing behind.
    pub async fn add(&self, raw_url: &str) -> Result<ResourceSnapshot, MonitorError> {
        let key = raw_url.trim().to_string();
        let url = validate_url(&key).map_err(|reason| MonitorError::InvalidUrl {
            url: key.clone(),
            reason,
        })?;
        if self.index().by_url.contains_key(&key) {
            return Err(MonitorError::AlreadyTracked(key));
        }

        let output = match self.pipeline.run(&url).await {
            Ok(output) => output,
            Err(source) => {
                watch_warn!("registration of {} failed: {}", key, source);
                return Err(MonitorError::RegistrationFailed { url: key, source });
            }
        };

        let resource = MonitoredResource::new(key.clone(), output.fingerprint, (self.clock)())
            .with_baseline_text(output.text);
        let snapshot = resource.snapshot();

        let mut index = self.index();
        // Another add may have won while we were fetching.
        if index.by_url.contains_key(&key) {
            return Err(MonitorError::AlreadyTracked(key));
        }
        let id = index.next_id;
        index.next_id += 1;
        index.entries.insert(
            id,
            Arc::new(Entry {
                url,
                check_lock: tokio::sync::Mutex::new(()),
                record: Mutex::new(resource),
            }),
        );
        index.by_url.insert(key.clone(), id);
        drop(index);

        watch_info!(
            "tracking {} baseline={}",
            key,
            snapshot.baseline_fingerprint.short(12)
        );
        Ok(snapshot)
    }

    /// Re-fetches the page and compares it with the baseline. A failure is
    /// recorded on the resource and also returned.
    pub async fn check(&self, raw_url: &str) -> Result<ResourceSnapshot, MonitorError> {
        let key = raw_url.trim();
        let (id, entry) = self
            .index()
            .lookup(key)
            .ok_or_else(|| MonitorError::NotFound(key.to_string()))?;

        let _serial = entry.check_lock.lock().await;
        let outcome = self.pipeline.run(&entry.url).await;

        if !self.index().is_current(key, id) {
            return Err(MonitorError::NotFound(key.to_string()));
        }

        let checked_at = (self.clock)();
        let mut record = entry.record();
        match outcome {
            Ok(output) => {
                record.record_success(output.fingerprint, checked_at);
                watch_info!(
                    "checked {}: {}",
                    key,
                    if record.changed() { "changed" } else { "unchanged" }
                );
                Ok(record.snapshot())
            }
            Err(source) => {
                record.record_failure(source.cause(), checked_at);
                watch_warn!("check of {} failed: {}", key, source);
                Err(MonitorError::Pipeline {
                    url: key.to_string(),
                    source,
                })
            }
        }
    }

    pub fn remove(&self, raw_url: &str) -> Result<(), MonitorError> {
        let key = raw_url.trim();
        let mut index = self.index();
        let id = index
            .by_url
            .remove(key)
            .ok_or_else(|| MonitorError::NotFound(key.to_string()))?;
        index.entries.remove(&id);
        drop(index);

        watch_info!("stopped tracking {}", key);
        Ok(())
    }

    pub fn get(&self, raw_url: &str) -> Option<ResourceSnapshot> {
        let (_, entry) = self.index().lookup(raw_url.trim())?;
        Some(entry.snapshot())
    }

    /// Resources present at call time, in insertion order.
    pub fn list(&self) -> ResourceList {
        ResourceList {
            entries: self.index().entries.values().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.index().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resources captured by [`Registry::list`]. Snapshots are taken lazily as the
/// sequence is walked, and [`ResourceList::iter`] can be called any number of times.
pub struct ResourceList {
    entries: Vec<Arc<Entry>>,
}

impl ResourceList {
    pub fn iter(&self) -> ResourceIter<'_> {
        ResourceIter {
            inner: self.entries.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ResourceList {
    type Item = ResourceSnapshot;
    type IntoIter = ResourceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct ResourceIter<'a> {
    inner: std::slice::Iter<'a, Arc<Entry>>,
}

impl Iterator for ResourceIter<'_> {
    type Item = ResourceSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| entry.snapshot())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ResourceIter<'_> {}
