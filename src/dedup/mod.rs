//! Duplicate detection and merging.
//!
//! Two operations share one predicate:
//!
//! - **Import** (`add_batch`): each incoming record is compared against the
//!   entries in collection order. The first duplicate is replaced in place by
//!   `merge(existing, incoming)`; otherwise the record is appended.
//! - **Self-dedupe** (`dedupe_collection`): entries are walked in order and an
//!   entry is kept only if it duplicates nothing already kept. Later
//!   duplicates are dropped as they are, without merging.
//!
//! Lookups use one of two interchangeable strategies picked by size against
//! the configured cutoff: a direct pairwise scan for small inputs, or the
//! grid-backed [`MatchIndex`] above the cutoff. Both return the lowest
//! matching index, so the choice changes speed and never the outcome.

mod index;
mod policy;

pub use index::MatchIndex;
pub use policy::{is_duplicate, merge};

use crate::config::DedupConfig;
use crate::error::{PoiError, Result};
use crate::poi::Poi;
use poimerge_types::{PoiId, PoiRecord};
use rustc_hash::FxHashSet;
use serde::Serialize;

/// How candidate duplicates are looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Compare against every entry in order.
    Pairwise,
    /// Ask the spatial grid and name index, then verify each candidate.
    Grid,
}

/// Counts reported by a batch import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// Records appended as new entries
    pub added: usize,
    /// Records merged into an existing entry
    pub merged: usize,
    /// Records rejected by validation
    pub skipped: usize,
}

impl ImportSummary {
    /// Records seen, whatever happened to them.
    pub fn total(&self) -> usize {
        self.added + self.merged + self.skipped
    }
}

impl std::ops::AddAssign for ImportSummary {
    fn add_assign(&mut self, other: Self) {
        self.added += other.added;
        self.merged += other.merged;
        self.skipped += other.skipped;
    }
}

/// Duplicate resolution with a fixed threshold and size cutoff.
///
/// # Examples
///
/// ```rust
/// use poimerge::{DedupConfig, DeduplicationEngine, Poi};
/// use poimerge_types::PoiRecord;
///
/// let engine = DeduplicationEngine::new(DedupConfig::default())?;
/// let mut entries = vec![Poi::new("Gjendebu", 61.4822, 8.6286)?];
///
/// let summary = engine.add_batch(
///     &mut entries,
///     vec![
///         PoiRecord::new("GJENDEBU", 61.4822, 8.6286).with_elevation(995.0),
///         PoiRecord::new("Memurubu", 61.5500, 8.7300),
///     ],
/// );
///
/// assert_eq!((summary.added, summary.merged), (1, 1));
/// assert_eq!(entries[0].elevation(), Some(995.0));
/// # Ok::<(), poimerge::PoiError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DeduplicationEngine {
    config: DedupConfig,
}

impl DeduplicationEngine {
    /// Fails with `InvalidThreshold` or `InvalidCutoff` for unusable settings.
    pub fn new(config: DedupConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    pub fn threshold_meters(&self) -> f64 {
        self.config.threshold_meters
    }

    pub fn size_cutoff(&self) -> usize {
        self.config.size_cutoff
    }

    /// The duplicate predicate at this engine's threshold.
    pub fn is_duplicate(&self, a: &Poi, b: &Poi) -> bool {
        is_duplicate(a, b, self.config.threshold_meters)
    }

    /// Grid above the cutoff, pairwise at or below it.
    pub fn select_strategy(&self, size: usize) -> Strategy {
        if size > self.config.size_cutoff {
            Strategy::Grid
        } else {
            Strategy::Pairwise
        }
    }

    /// Empty candidate index sized for this engine's threshold.
    pub fn new_index(&self) -> MatchIndex {
        MatchIndex::new(self.config.threshold_meters)
    }

    /// Candidate index over `entries`, keyed by position.
    pub fn build_index(&self, entries: &[Poi]) -> MatchIndex {
        MatchIndex::build(self.config.threshold_meters, entries)
    }

    /// Lowest index in `entries` that duplicates `poi`.
    ///
    /// `index` should describe `entries` exactly; it is only consulted when
    /// the strategy for `entries.len()` is [`Strategy::Grid`]. Indexed
    /// positions past the end of `entries` are ignored.
    pub fn find_duplicate(&self, entries: &[Poi], index: &MatchIndex, poi: &Poi) -> Option<usize> {
        match self.select_strategy(entries.len()) {
            Strategy::Pairwise => entries.iter().position(|e| self.is_duplicate(e, poi)),
            Strategy::Grid => index
                .candidates(poi)
                .into_iter()
                .find(|&i| entries.get(i).is_some_and(|e| self.is_duplicate(e, poi))),
        }
    }

    /// Every index in `entries` that duplicates `poi`, ascending.
    pub fn find_all_duplicates(
        &self,
        entries: &[Poi],
        index: &MatchIndex,
        poi: &Poi,
    ) -> Vec<usize> {
        match self.select_strategy(entries.len()) {
            Strategy::Pairwise => entries
                .iter()
                .enumerate()
                .filter(|(_, e)| self.is_duplicate(e, poi))
                .map(|(i, _)| i)
                .collect(),
            Strategy::Grid => index
                .candidates(poi)
                .into_iter()
                .filter(|&i| entries.get(i).is_some_and(|e| self.is_duplicate(e, poi)))
                .collect(),
        }
    }

    /// Import `records` into `entries`, merging duplicates in place.
    ///
    /// Records with bad coordinates or names are counted in `skipped` and
    /// the rest of the batch carries on.
    pub fn add_batch<I>(&self, entries: &mut Vec<Poi>, records: I) -> ImportSummary
    where
        I: IntoIterator<Item = PoiRecord>,
    {
        let mut index = self.build_index(entries);
        self.import_into(
            entries,
            &mut index,
            records.into_iter().map(Poi::from_record),
        )
    }

    /// Import loop shared by [`add_batch`](Self::add_batch) and collections
    /// that keep a persistent index. `index` is kept in step with `entries`.
    pub(crate) fn import_into<I>(
        &self,
        entries: &mut Vec<Poi>,
        index: &mut MatchIndex,
        incoming: I,
    ) -> ImportSummary
    where
        I: IntoIterator<Item = Result<Poi>>,
    {
        let mut summary = ImportSummary::default();
        let mut ids: FxHashSet<PoiId> = entries.iter().map(Poi::id).collect();
        log::debug!(
            "Importing into {} entries using {:?} lookup",
            entries.len(),
            self.select_strategy(entries.len())
        );

        for (position, item) in incoming.into_iter().enumerate() {
            let poi = match item {
                Ok(poi) => poi,
                Err(e) => {
                    log::warn!("Skipping record {} of batch: {}", position, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.find_duplicate(entries, index, &poi) {
                Some(i) => {
                    let merged = merge(&entries[i], &poi);
                    index.replace(i, &entries[i], &merged);
                    entries[i] = merged;
                    summary.merged += 1;
                }
                None => {
                    // Ids stay unique even when a record reuses one that is
                    // already taken by an unrelated entry.
                    let poi = if ids.contains(&poi.id()) {
                        let fresh = poi.with_fresh_id();
                        log::warn!(
                            "Record {} of batch reuses an existing id; assigned {}",
                            position,
                            fresh.id()
                        );
                        fresh
                    } else {
                        poi
                    };
                    ids.insert(poi.id());
                    index.insert(entries.len(), &poi);
                    entries.push(poi);
                    summary.added += 1;
                }
            }
        }

        log::debug!(
            "Batch done: {} added, {} merged, {} skipped",
            summary.added,
            summary.merged,
            summary.skipped
        );
        summary
    }

    /// Collapse duplicates inside `pois`, keeping the first of each group
    /// verbatim. Returns how many entries were dropped.
    pub fn dedupe_collection(&self, pois: &mut Vec<Poi>) -> usize {
        let original_len = pois.len();
        let strategy = self.select_strategy(original_len);
        log::debug!(
            "Deduplicating {} entries using {:?} lookup",
            original_len,
            strategy
        );

        let mut accepted: Vec<Poi> = Vec::with_capacity(original_len);
        let mut index = self.new_index();

        for poi in pois.drain(..) {
            let is_dup = match strategy {
                Strategy::Pairwise => accepted.iter().any(|kept| self.is_duplicate(kept, &poi)),
                Strategy::Grid => index
                    .candidates(&poi)
                    .into_iter()
                    .any(|i| self.is_duplicate(&accepted[i], &poi)),
            };

            if !is_dup {
                if strategy == Strategy::Grid {
                    index.insert(accepted.len(), &poi);
                }
                accepted.push(poi);
            }
        }

        *pois = accepted;
        let removed = original_len - pois.len();
        log::debug!("Dropped {} duplicate entries", removed);
        removed
    }
}

impl Default for DeduplicationEngine {
    fn default() -> Self {
        Self {
            config: DedupConfig::default(),
        }
    }
}

impl TryFrom<DedupConfig> for DeduplicationEngine {
    type Error = PoiError;

    fn try_from(config: DedupConfig) -> Result<Self> {
        Self::new(config)
    }
}
