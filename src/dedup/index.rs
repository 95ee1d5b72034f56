//! Candidate index combining the spatial grid with a case-folded name index.
//!
//! The duplicate predicate has two arms: proximity and case-insensitive name
//! equality at any distance. The grid only answers the first, so a name map
//! sits beside it; the union of both is a superset of every entry the
//! predicate can accept.

use crate::compute::grid::{GridStats, SpatialGrid};
use crate::poi::Poi;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

#[derive(Debug, Clone)]
pub struct MatchIndex {
    grid: SpatialGrid,
    names: FxHashMap<String, SmallVec<[usize; 2]>>,
}

impl MatchIndex {
    /// Empty index for an already validated threshold.
    pub(crate) fn new(threshold_meters: f64) -> Self {
        Self {
            grid: SpatialGrid::with_valid_threshold(threshold_meters),
            names: FxHashMap::default(),
        }
    }

    /// Index every entry of `entries` at its position.
    pub(crate) fn build(threshold_meters: f64, entries: &[Poi]) -> Self {
        let mut index = Self::new(threshold_meters);
        for (i, poi) in entries.iter().enumerate() {
            index.insert(i, poi);
        }
        index
    }

    pub fn threshold_meters(&self) -> f64 {
        self.grid.threshold_meters()
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub(crate) fn insert(&mut self, index: usize, poi: &Poi) {
        self.grid.insert(index, poi.coordinate());
        self.names
            .entry(poi.name_key().to_string())
            .or_default()
            .push(index);
    }

    /// Forget `index`, which was stored for `poi`.
    pub(crate) fn remove(&mut self, index: usize, poi: &Poi) {
        self.grid.remove(index);
        if let Some(slots) = self.names.get_mut(poi.name_key()) {
            slots.retain(|i| *i != index);
            if slots.is_empty() {
                self.names.remove(poi.name_key());
            }
        }
    }

    /// Point `index` at `replacement` instead of `previous`.
    pub(crate) fn replace(&mut self, index: usize, previous: &Poi, replacement: &Poi) {
        if previous.coordinate() == replacement.coordinate()
            && previous.name_key() == replacement.name_key()
        {
            return;
        }
        self.remove(index, previous);
        self.insert(index, replacement);
    }

    /// Indices that may satisfy the duplicate predicate against `poi`, ascending.
    pub(crate) fn candidates(&self, poi: &Poi) -> Vec<usize> {
        let mut found = self.grid.candidates_near(poi.coordinate());
        if let Some(slots) = self.names.get(poi.name_key()) {
            found.extend_from_slice(slots);
            found.sort_unstable();
            found.dedup();
        }
        found
    }

    pub(crate) fn rebuild(&mut self, entries: &[Poi]) {
        *self = Self::build(self.threshold_meters(), entries);
    }

    pub fn grid_stats(&self) -> GridStats {
        self.grid.stats()
    }
}
