#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use pagewatch_engine::{
    Clock, FailureKind, FetchError, FetchMetadata, FetchOutput, Fetcher, Pipeline, Registry,
    TextNormalizer,
};
use url::Url;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(watch_logging::initialize_for_tests);
}

/// In-memory pages keyed by URL; unknown URLs fail like a 404.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: Mutex<HashMap<String, Result<String, FetchError>>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn serve(&self, url: &str, body: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(body.to_string()));
    }

    pub fn fail(&self, url: &str, kind: FailureKind, message: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(FetchError::new(kind, message)));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchOutput, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let page = self.pages.lock().unwrap().get(url.as_str()).cloned();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let body = match page {
            Some(Ok(body)) => body,
            Some(Err(err)) => return Err(err),
            None => return Err(FetchError::new(FailureKind::HttpStatus(404), "404 Not Found")),
        };
        Ok(FetchOutput {
            metadata: FetchMetadata {
                requested_url: url.to_string(),
                final_url: url.to_string(),
                status: 200,
                content_type: Some("text/html; charset=utf-8".to_string()),
                byte_len: body.len() as u64,
            },
            bytes: body.into_bytes(),
        })
    }
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// Clock that advances one second per reading.
pub fn ticking_clock() -> Clock {
    let ticks = Arc::new(AtomicUsize::new(0));
    Arc::new(move || at(ticks.fetch_add(1, Ordering::SeqCst) as i64))
}

pub fn registry_with(fetcher: Arc<ScriptedFetcher>) -> Registry {
    Registry::new(Pipeline::new(fetcher, TextNormalizer::default())).with_clock(ticking_clock())
}
