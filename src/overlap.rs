//! Comparing two availability grids cell by cell.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{AvailabilityGrid, WeeklyTimeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Both,
    MineOnly,
    TheirsOnly,
    Neither,
}

impl CellState {
    fn of(mine: bool, theirs: bool) -> Self {
        match (mine, theirs) {
            (true, true) => CellState::Both,
            (true, false) => CellState::MineOnly,
            (false, true) => CellState::TheirsOnly,
            (false, false) => CellState::Neither,
        }
    }
}

/// Classification of every canonical slot. Always holds exactly 98 entries.
pub type OverlapGrid = BTreeMap<WeeklyTimeSlot, CellState>;

pub fn classify_overlap(mine: &AvailabilityGrid, theirs: &AvailabilityGrid) -> OverlapGrid {
    WeeklyTimeSlot::all()
        .map(|slot| (slot, CellState::of(mine.is_free(slot), theirs.is_free(slot))))
        .collect()
}

/// Number of slots where both people are free.
pub fn count_overlap(mine: &AvailabilityGrid, theirs: &AvailabilityGrid) -> usize {
    classify_overlap(mine, theirs)
        .values()
        .filter(|state| **state == CellState::Both)
        .count()
}

/// The slots where both people are free, in grid order.
pub fn shared_free_slots(mine: &AvailabilityGrid, theirs: &AvailabilityGrid) -> Vec<WeeklyTimeSlot> {
    classify_overlap(mine, theirs)
        .into_iter()
        .filter(|(_, state)| *state == CellState::Both)
        .map(|(slot, _)| slot)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Day;

    fn grid(keys: &[&str]) -> AvailabilityGrid {
        AvailabilityGrid::from_keys(keys.iter().copied())
    }

    #[test]
    fn empty_grids_are_all_neither() {
        let result = classify_overlap(&AvailabilityGrid::new(), &AvailabilityGrid::new());
        assert_eq!(result.len(), 98);
        assert!(result.values().all(|s| *s == CellState::Neither));
        assert_eq!(count_overlap(&AvailabilityGrid::new(), &AvailabilityGrid::new()), 0);
    }

    #[test]
    fn classifies_each_combination() {
        let mine = grid(&["Mon-8AM", "Mon-9AM"]);
        let theirs = grid(&["Mon-9AM", "Mon-10AM"]);
        let result = classify_overlap(&mine, &theirs);

        let at = |hour| result[&WeeklyTimeSlot::new(Day::Mon, hour).unwrap()];
        assert_eq!(at(8), CellState::MineOnly);
        assert_eq!(at(9), CellState::Both);
        assert_eq!(at(10), CellState::TheirsOnly);
        assert_eq!(at(11), CellState::Neither);
        assert_eq!(count_overlap(&mine, &theirs), 1);
    }

    #[test]
    fn shared_slots_follow_grid_order() {
        let mine = grid(&["Tue-2PM", "Mon-9PM", "Wed-8AM"]);
        let theirs = grid(&["Wed-8AM", "Tue-2PM", "Mon-9PM"]);
        let keys: Vec<String> = shared_free_slots(&mine, &theirs).iter().map(|s| s.key()).collect();
        assert_eq!(keys, vec!["Mon-9PM", "Tue-2PM", "Wed-8AM"]);
    }
}
