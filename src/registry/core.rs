use std::collections::{HashMap, HashSet};

use crate::geometry::Position3D;
use crate::graph::ZoneId;
use crate::layout::PlacementResult;

/// Tracks the last known placement of every zone and which ones changed.
#[derive(Debug, Default)]
pub struct PlacementRegistry {
    entries: HashMap<ZoneId, Position3D>,
    dirty: HashSet<ZoneId>,
    removed: Vec<ZoneId>,
}

impl PlacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a fresh projection, flagging new or moved zones and recording vanished ones.
    pub fn sync(&mut self, placement: &PlacementResult) {
        use std::collections::hash_map::Entry;

        for (id, position) in &placement.positions {
            match self.entries.entry(id.clone()) {
                Entry::Occupied(mut entry) => {
                    if entry.get() != position {
                        entry.insert(*position);
                        self.dirty.insert(id.clone());
                    }
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(*position);
                    self.dirty.insert(id.clone());
                }
            }
        }

        let mut gone: Vec<_> = self
            .entries
            .keys()
            .filter(|id| !placement.positions.contains_key(*id))
            .cloned()
            .collect();
        gone.sort();
        for id in gone {
            self.entries.remove(&id);
            self.dirty.remove(&id);
            self.removed.push(id);
        }
    }

    /// Drain zones whose placement changed since the last call, ordered by id.
    pub fn take_dirty(&mut self) -> Vec<(ZoneId, Position3D)> {
        let mut ids: Vec<_> = self.dirty.drain().collect();
        ids.sort();
        ids.into_iter()
            .filter_map(|id| self.entries.get(&id).map(|position| (id.clone(), *position)))
            .collect()
    }

    /// Drain zones that disappeared from the layout.
    pub fn take_removed(&mut self) -> Vec<ZoneId> {
        std::mem::take(&mut self.removed)
    }

    pub fn position_of(&self, zone_id: &str) -> Option<Position3D> {
        self.entries.get(zone_id).copied()
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
