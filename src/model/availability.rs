use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::slot::WeeklyTimeSlot;

/// A recurring weekly pattern of free time. Only free slots are kept; a slot
/// that is absent is not free.
///
/// Serialized as the document-store map `{"Mon-8AM": true, ...}`. Keys that
/// are not part of the slot vocabulary, and `false` entries, are dropped when
/// deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct AvailabilityGrid {
    free: BTreeSet<WeeklyTimeSlot>,
}

impl AvailabilityGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_free(&self, slot: WeeklyTimeSlot) -> bool {
        self.free.contains(&slot)
    }

    pub fn set_free(&mut self, slot: WeeklyTimeSlot, free: bool) {
        if free {
            self.free.insert(slot);
        } else {
            self.free.remove(&slot);
        }
    }

    /// Flips a slot and returns its new state.
    pub fn toggle(&mut self, slot: WeeklyTimeSlot) -> bool {
        let now_free = !self.is_free(slot);
        self.set_free(slot, now_free);
        now_free
    }

    pub fn free_slots(&self) -> impl Iterator<Item = WeeklyTimeSlot> + '_ {
        self.free.iter().copied()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Builds a grid from raw document-store keys, ignoring unknown ones.
    pub fn from_keys<'a, I>(keys: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            free: keys
                .into_iter()
                .filter_map(WeeklyTimeSlot::parse_key)
                .collect(),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.free.iter().map(|s| s.key()).collect()
    }
}

impl FromIterator<WeeklyTimeSlot> for AvailabilityGrid {
    fn from_iter<I: IntoIterator<Item = WeeklyTimeSlot>>(iter: I) -> Self {
        Self {
            free: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, bool>> for AvailabilityGrid {
    fn from(map: BTreeMap<String, bool>) -> Self {
        Self::from_keys(
            map.iter()
                .filter(|(_, free)| **free)
                .map(|(key, _)| key.as_str()),
        )
    }
}

impl From<AvailabilityGrid> for BTreeMap<String, bool> {
    fn from(grid: AvailabilityGrid) -> Self {
        grid.free.iter().map(|s| (s.key(), true)).collect()
    }
}
