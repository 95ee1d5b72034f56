//! The master POI collection.
//!
//! `PoiCollection` owns the ordered entries and the candidate index built over
//! them. Entries change only through:
//!
//! - [`add`](PoiCollection::add): import with merge-in-place
//! - [`dedupe`](PoiCollection::dedupe): drop internal duplicates
//! - the elevation update interface, which touches nothing but `elevation`
//!
//! The index stores positions, and every mutation updates it before returning,
//! so it always describes the current entries.
//!
//! # Thread Safety
//!
//! The collection is not internally synchronized. Serialize access from the
//! outside (one owning thread, or an exclusive lock held for the whole call),
//! or enable the `sync` feature and use `SyncCollection`.

use crate::config::DedupConfig;
use crate::dedup::{DeduplicationEngine, ImportSummary, MatchIndex};
use crate::enrich::{ElevationLookup, ElevationProvider, ElevationRequest};
use crate::error::Result;
use crate::poi::Poi;
use poimerge_types::{PoiId, PoiRecord};
use rustc_hash::FxHashMap;

/// An ordered, internally deduplicable set of POIs.
///
/// # Examples
///
/// ```rust
/// use poimerge::PoiCollection;
/// use poimerge_types::PoiRecord;
///
/// let mut pois = PoiCollection::new();
/// let summary = pois.add(vec![
///     PoiRecord::new("Fannaråkhytta", 61.5153, 7.9061),
///     PoiRecord::new("fannaråkhytta", 61.5154, 7.9061).with_elevation(2068.0),
///     PoiRecord::new("Broken", 200.0, 7.9),
/// ]);
///
/// assert_eq!((summary.added, summary.merged, summary.skipped), (1, 1, 1));
/// assert_eq!(pois.len(), 1);
/// assert_eq!(pois[0].elevation(), Some(2068.0));
/// ```
#[derive(Debug, Clone)]
pub struct PoiCollection {
    entries: Vec<Poi>,
    index: MatchIndex,
    engine: DeduplicationEngine,
}

impl PoiCollection {
    /// Empty collection with the default threshold and cutoff.
    pub fn new() -> Self {
        Self::with_engine(DeduplicationEngine::default())
    }

    /// Empty collection with custom settings.
    pub fn with_config(config: DedupConfig) -> Result<Self> {
        Ok(Self::with_engine(DeduplicationEngine::new(config)?))
    }

    pub fn with_engine(engine: DeduplicationEngine) -> Self {
        Self {
            entries: Vec::new(),
            index: engine.new_index(),
            engine,
        }
    }

    /// Switch to new settings and rebuild the index.
    ///
    /// Invalid settings are rejected and the collection is left as it was.
    pub fn reconfigure(&mut self, config: DedupConfig) -> Result<()> {
        let engine = DeduplicationEngine::new(config)?;
        self.index = engine.build_index(&self.entries);
        self.engine = engine;
        log::info!(
            "Reconfigured collection of {} entries: threshold {} m, size cutoff {}",
            self.entries.len(),
            config.threshold_meters,
            config.size_cutoff
        );
        Ok(())
    }

    pub fn config(&self) -> &DedupConfig {
        self.engine.config()
    }

    pub fn engine(&self) -> &DeduplicationEngine {
        &self.engine
    }

    /// Validate and import records, merging duplicates into existing entries.
    pub fn add<I>(&mut self, records: I) -> ImportSummary
    where
        I: IntoIterator<Item = PoiRecord>,
    {
        self.engine.import_into(
            &mut self.entries,
            &mut self.index,
            records.into_iter().map(Poi::from_record),
        )
    }

    /// Import already validated POIs; `skipped` is always zero.
    pub fn add_pois<I>(&mut self, pois: I) -> ImportSummary
    where
        I: IntoIterator<Item = Poi>,
    {
        self.engine
            .import_into(&mut self.entries, &mut self.index, pois.into_iter().map(Ok))
    }

    /// Drop every entry that duplicates an earlier one. Returns how many went.
    pub fn dedupe(&mut self) -> usize {
        let removed = self.engine.dedupe_collection(&mut self.entries);
        if removed > 0 {
            self.index.rebuild(&self.entries);
        }
        removed
    }

    /// Positions of every entry that `poi` duplicates, ascending.
    pub fn find_duplicates_of(&self, poi: &Poi) -> Vec<usize> {
        self.engine
            .find_all_duplicates(&self.entries, &self.index, poi)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Poi> {
        self.entries.get(index)
    }

    /// Position and value of the entry with `id`.
    pub fn find(&self, id: PoiId) -> Option<(usize, &Poi)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, poi)| poi.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Poi> {
        self.entries.iter()
    }

    /// Read-only view for exporters.
    pub fn as_slice(&self) -> &[Poi] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<Poi> {
        self.entries
    }

    /// Entries whose elevation is unknown, in collection order.
    pub fn pending_elevations(&self) -> Vec<ElevationRequest> {
        self.entries
            .iter()
            .filter(|poi| poi.elevation().is_none())
            .map(ElevationRequest::for_poi)
            .collect()
    }

    /// Set elevations by id. Only `elevation` changes; unknown ids,
    /// `Unavailable` and non-finite readings are ignored.
    ///
    /// Returns how many entries were updated.
    pub fn apply_elevations<I>(&mut self, results: I) -> usize
    where
        I: IntoIterator<Item = (PoiId, ElevationLookup)>,
    {
        let positions: FxHashMap<PoiId, usize> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, poi)| (poi.id(), i))
            .collect();

        let mut updated = 0;
        for (id, lookup) in results {
            let ElevationLookup::Found(meters) = lookup else {
                continue;
            };
            if !meters.is_finite() {
                log::warn!("Ignoring non-finite elevation {} for {}", meters, id);
                continue;
            }
            let Some(&i) = positions.get(&id) else {
                log::debug!("Elevation result for unknown id {}", id);
                continue;
            };

            // Coordinates and name are untouched, so the index stays valid.
            self.entries[i].set_elevation(Some(meters));
            updated += 1;
        }
        updated
    }

    /// Ask `provider` for every missing elevation and apply the answers.
    ///
    /// A provider error is returned as is and nothing is changed.
    pub fn enrich_elevations<P>(&mut self, provider: &mut P) -> Result<usize>
    where
        P: ElevationProvider + ?Sized,
    {
        let requests = self.pending_elevations();
        if requests.is_empty() {
            log::debug!("All {} entries already have elevation", self.entries.len());
            return Ok(0);
        }

        let results = provider.lookup(&requests)?;
        let updated = self.apply_elevations(results);
        log::info!(
            "Elevation enrichment: {} of {} requested entries updated",
            updated,
            requests.len()
        );
        Ok(updated)
    }

    /// Treat an elevation of exactly 0 m as a missing reading.
    ///
    /// Returns how many entries were reset.
    pub fn clear_zero_elevations(&mut self) -> usize {
        let mut cleared = 0;
        for poi in self.entries.iter_mut() {
            if poi.elevation() == Some(0.0) {
                poi.set_elevation(None);
                cleared += 1;
            }
        }
        if cleared > 0 {
            log::debug!("Cleared {} zero elevations", cleared);
        }
        cleared
    }
}

impl Default for PoiCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for PoiCollection {
    type Output = Poi;

    fn index(&self, index: usize) -> &Poi {
        &self.entries[index]
    }
}

impl<'a> IntoIterator for &'a PoiCollection {
    type Item = &'a Poi;
    type IntoIter = std::slice::Iter<'a, Poi>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
