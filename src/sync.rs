//! Thread-safe wrapper for shared collection access.
//!
//! `SyncCollection` wraps `PoiCollection` in `Arc<RwLock<_>>`. Every mutating
//! call holds the write lock for its whole duration, so a batch import or a
//! dedupe pass is never observed half done.
//!
//! Enable the `sync` feature to use this module:
//!
//! ```toml
//! [dependencies]
//! poimerge = { version = "0.1", features = ["sync"] }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use poimerge::{PoiRecord, SyncCollection};
//! use std::thread;
//!
//! let pois = SyncCollection::new();
//! let writer = pois.clone();
//!
//! let handle = thread::spawn(move || {
//!     writer.add(vec![PoiRecord::new("Olavsbu", 61.4225, 8.2208)]);
//! });
//! handle.join().unwrap();
//!
//! pois.add(vec![PoiRecord::new("OLAVSBU", 61.4226, 8.2208)]);
//! assert_eq!(pois.len(), 1);
//! ```

use crate::collection::PoiCollection;
use crate::config::DedupConfig;
use crate::dedup::ImportSummary;
use crate::enrich::{ElevationLookup, ElevationProvider};
use crate::error::Result;
use crate::poi::Poi;
use parking_lot::RwLock;
use poimerge_types::{PoiId, PoiRecord};
use std::sync::Arc;

/// Cloneable handle to a collection shared between threads.
///
/// Reads (`len`, `snapshot`, `with_read`) run concurrently; writes take
/// exclusive access.
#[derive(Clone, Default)]
pub struct SyncCollection {
    inner: Arc<RwLock<PoiCollection>>,
}

impl SyncCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DedupConfig) -> Result<Self> {
        Ok(Self::from_collection(PoiCollection::with_config(config)?))
    }

    pub fn from_collection(collection: PoiCollection) -> Self {
        Self {
            inner: Arc::new(RwLock::new(collection)),
        }
    }

    pub fn add<I>(&self, records: I) -> ImportSummary
    where
        I: IntoIterator<Item = PoiRecord>,
    {
        self.inner.write().add(records)
    }

    pub fn add_pois<I>(&self, pois: I) -> ImportSummary
    where
        I: IntoIterator<Item = Poi>,
    {
        self.inner.write().add_pois(pois)
    }

    pub fn dedupe(&self) -> usize {
        self.inner.write().dedupe()
    }

    pub fn reconfigure(&self, config: DedupConfig) -> Result<()> {
        self.inner.write().reconfigure(config)
    }

    pub fn apply_elevations<I>(&self, results: I) -> usize
    where
        I: IntoIterator<Item = (PoiId, ElevationLookup)>,
    {
        self.inner.write().apply_elevations(results)
    }

    /// Runs the provider while holding the write lock.
    pub fn enrich_elevations<P>(&self, provider: &mut P) -> Result<usize>
    where
        P: ElevationProvider + ?Sized,
    {
        self.inner.write().enrich_elevations(provider)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Copy of the current entries.
    pub fn snapshot(&self) -> Vec<Poi> {
        self.inner.read().as_slice().to_vec()
    }

    /// Run `f` against the collection under the read lock.
    pub fn with_read<R>(&self, f: impl FnOnce(&PoiCollection) -> R) -> R {
        f(&self.inner.read())
    }

    /// Unwrap the collection if this is the last handle.
    pub fn try_into_inner(self) -> std::result::Result<PoiCollection, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl std::fmt::Debug for SyncCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncCollection")
            .field("len", &self.len())
            .finish()
    }
}
