//! Debounced free-text location search.

use crate::location::{
    config::LocationSearchConfig,
    domain::{LocationSample, LocationValidationError},
    ports::{GeocodingError, LocationProvider},
    services::DebounceTimer,
    validation::{coordinate_validation_error, sanitize_address_text},
};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Failures surfaced by a location search.
///
/// None of them is fatal: the previous result stays visible.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationSearchError {
    /// The provider answered with an out-of-range coordinate.
    #[error(transparent)]
    Validation(#[from] LocationValidationError),
    /// The lookup failed or found nothing.
    #[error(transparent)]
    Geocoding(#[from] GeocodingError),
}

/// Observable state of a search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSnapshot {
    /// Sequence number of the most recent query.
    pub query_seq: u64,
    /// Trimmed text of the most recent query; empty after clearing.
    pub query: String,
    /// Latest accepted location.
    pub result: Option<LocationSample>,
    /// Failure of the most recent lookup, if it failed.
    pub error: Option<LocationSearchError>,
    /// Whether a lookup for the most recent query is scheduled or running.
    pub pending: bool,
}

/// Turns free-text input into a validated [`LocationSample`].
///
/// Input is debounced; each change gets a new sequence number, and an
/// outcome is applied only when its sequence number is still the latest.
/// Superseded lookups keep running but their results, successes and
/// failures alike, are discarded. Dropping the coordinator cancels any
/// scheduled lookup.
///
/// [`Self::on_query_changed`] must be called from within a Tokio runtime.
pub struct LocationSearchCoordinator<P>
where
    P: LocationProvider + 'static,
{
    shared: Arc<SearchShared<P>>,
    timer: DebounceTimer,
}

struct SearchShared<P> {
    provider: Arc<P>,
    config: LocationSearchConfig,
    last_seq: AtomicU64,
    snapshot: watch::Sender<SearchSnapshot>,
}

impl<P> LocationSearchCoordinator<P>
where
    P: LocationProvider + 'static,
{
    /// Creates a coordinator with an empty result.
    #[must_use]
    pub fn new(provider: Arc<P>, config: LocationSearchConfig) -> Self {
        let (snapshot, _) = watch::channel(SearchSnapshot::default());
        Self {
            shared: Arc::new(SearchShared {
                provider,
                config,
                last_seq: AtomicU64::new(0),
                snapshot,
            }),
            timer: DebounceTimer::new(),
        }
    }

    /// Handles a change of the search text.
    ///
    /// Cancels the scheduled lookup. Blank text clears the result and error
    /// immediately; anything else clears the error of the previous query and
    /// schedules a lookup after the configured quiet period.
    pub fn on_query_changed(&self, text: &str) {
        self.timer.cancel();
        let seq = self.shared.next_seq();
        let trimmed = text.trim();

        if trimmed.is_empty() {
            self.shared.snapshot.send_modify(|snapshot| {
                *snapshot = SearchSnapshot {
                    query_seq: seq,
                    ..SearchSnapshot::default()
                };
            });
            return;
        }

        let query = trimmed.to_owned();
        self.shared.snapshot.send_modify(|snapshot| {
            snapshot.query_seq = seq;
            snapshot.query.clone_from(&query);
            snapshot.error = None;
            snapshot.pending = true;
        });

        debug!(seq, "scheduling location lookup");
        let shared = Arc::clone(&self.shared);
        self.timer.schedule(self.shared.config.debounce, move || {
            tokio::spawn(shared.lookup(seq, query));
        });
    }

    /// Cancels the scheduled lookup and ignores any lookup still running.
    ///
    /// The current result is kept.
    pub fn cancel_pending(&self) {
        self.timer.cancel();
        let seq = self.shared.next_seq();
        self.shared.snapshot.send_modify(|snapshot| {
            snapshot.query_seq = seq;
            snapshot.pending = false;
        });
    }

    /// Subscribes to snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.shared.snapshot.subscribe()
    }

    /// Returns a copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        self.shared.snapshot.borrow().clone()
    }

    /// Returns the latest accepted location.
    #[must_use]
    pub fn current_result(&self) -> Option<LocationSample> {
        self.shared.snapshot.borrow().result.clone()
    }

    /// Returns the failure of the most recent lookup.
    #[must_use]
    pub fn last_error(&self) -> Option<LocationSearchError> {
        self.shared.snapshot.borrow().error.clone()
    }

    /// Returns whether a lookup for the latest query is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.shared.snapshot.borrow().pending
    }
}

impl<P> SearchShared<P>
where
    P: LocationProvider + 'static,
{
    fn next_seq(&self) -> u64 {
        self.last_seq.fetch_add(1, Ordering::SeqCst).wrapping_add(1)
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.snapshot.borrow().query_seq == seq
    }

    async fn lookup(self: Arc<Self>, seq: u64, query: String) {
        if !self.is_latest(seq) {
            return;
        }

        let sanitized = sanitize_address_text(&query);
        if sanitized.is_empty() {
            debug!(seq, "search text is empty after sanitizing, skipping lookup");
            self.apply(seq, |snapshot| snapshot.pending = false);
            return;
        }

        let outcome = self.geocode(&sanitized).await;
        if let Err(err) = &outcome {
            warn!(seq, query = %sanitized, error = %err, "location lookup failed");
        }
        self.apply(seq, move |snapshot| {
            snapshot.pending = false;
            match outcome {
                Ok(sample) => {
                    snapshot.result = Some(sample);
                    snapshot.error = None;
                }
                Err(err) => snapshot.error = Some(err),
            }
        });
    }

    async fn geocode(&self, text: &str) -> Result<LocationSample, LocationSearchError> {
        let lookup = self.provider.forward_geocode(text);
        let answer = match self.config.geocode_timeout {
            Some(limit) => tokio::time::timeout(limit, lookup)
                .await
                .map_err(|_elapsed| GeocodingError::Timeout)?,
            None => lookup.await,
        };

        let sample = answer?.ok_or(GeocodingError::AddressNotFound)?;
        if let Some(err) = coordinate_validation_error(Some(sample.coordinate())) {
            return Err(err.into());
        }
        Ok(sample)
    }

    /// Applies `update` only if `seq` still identifies the latest query.
    fn apply(&self, seq: u64, update: impl FnOnce(&mut SearchSnapshot)) {
        let applied = self.snapshot.send_if_modified(|snapshot| {
            if snapshot.query_seq != seq {
                return false;
            }
            update(snapshot);
            true
        });
        if !applied {
            debug!(seq, "discarding outcome of superseded location query");
        }
    }
}
