//! Scoring herds by how well their meeting time fits a user's weekly
//! availability.

use chrono::Datelike;
use serde::Serialize;

use crate::clock;
use crate::model::{AvailabilityGrid, Day, Herd, Schedule, WeeklyTimeSlot};

/// A herd paired with its availability score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedHerd {
    pub herd: Herd,
    pub score: u32,
}

/// Counts the whole hours in `[start, end)` of the herd's meeting that fall
/// on free slots of `availability`. Minutes are ignored. A schedule missing
/// its date or either time scores 0; an unparseable time counts as noon.
pub fn score_herd(availability: &AvailabilityGrid, schedule: &Schedule) -> u32 {
    let (Some(date), Some(start), Some(end)) = (schedule.date, schedule.start(), schedule.end()) else {
        return 0;
    };

    let day = Day::from_weekday(date.weekday());
    let start_hour = clock::hour_or_fallback(start);
    let end_hour = clock::hour_or_fallback(end);

    (start_hour..end_hour)
        .filter_map(|hour| u8::try_from(hour).ok())
        .filter_map(|hour| WeeklyTimeSlot::new(day, hour))
        .filter(|slot| availability.is_free(*slot))
        .count() as u32
}

/// Scores every herd and sorts by score, highest first. Herds with equal
/// scores keep their input order.
pub fn rank_herds(availability: &AvailabilityGrid, herds: Vec<Herd>) -> Vec<RankedHerd> {
    let mut ranked: Vec<RankedHerd> = herds
        .into_iter()
        .map(|herd| RankedHerd {
            score: score_herd(availability, &herd.schedule),
            herd,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}
