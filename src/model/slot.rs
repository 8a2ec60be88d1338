//! The weekly time-slot vocabulary shared by every producer and consumer of
//! availability data: seven day names and fourteen hourly labels from 8 AM
//! to 9 PM. Storage keys are `"<Day>-<Label>"` with the label's space removed,
//! e.g. `"Mon-8AM"` or `"Thu-12PM"`.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day names in grid column order.
pub const DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Time labels in grid row order.
pub const TIMES: [&str; 14] = [
    "8 AM", "9 AM", "10 AM", "11 AM", "12 PM", "1 PM", "2 PM", "3 PM", "4 PM", "5 PM", "6 PM",
    "7 PM", "8 PM", "9 PM",
];

/// Hour of day (24h) of the first row in `TIMES`.
pub const FIRST_HOUR: u8 = 8;

/// Hour of day (24h) of the last row in `TIMES`.
pub const LAST_HOUR: u8 = 21;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn short_name(&self) -> &'static str {
        DAYS[self.index()]
    }

    pub fn from_short_name(s: &str) -> Option<Self> {
        DAYS.iter().position(|d| *d == s).map(|i| Day::ALL[i])
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        Day::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// One cell of the weekly availability grid. Ordering is day-major, then
/// hour, which is the order the grid is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeeklyTimeSlot {
    day: Day,
    hour: u8,
}

impl WeeklyTimeSlot {
    /// Returns the slot for `hour` (0-23) on `day`, or `None` when the hour
    /// falls outside the grid.
    pub fn new(day: Day, hour: u8) -> Option<Self> {
        if (FIRST_HOUR..=LAST_HOUR).contains(&hour) {
            Some(Self { day, hour })
        } else {
            None
        }
    }

    pub fn day(&self) -> Day {
        self.day
    }

    /// Hour of day in 24h form.
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Display label such as `"2 PM"`.
    pub fn label(&self) -> &'static str {
        TIMES[(self.hour - FIRST_HOUR) as usize]
    }

    /// Storage key such as `"Mon-2PM"`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.day.short_name(), self.label().replace(' ', ""))
    }

    /// Parses a storage key. Anything outside the vocabulary is `None`.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (day, label) = key.split_once('-')?;
        let day = Day::from_short_name(day)?;
        let row = TIMES.iter().position(|t| t.replace(' ', "") == label)?;
        Self::new(day, FIRST_HOUR + row as u8)
    }

    /// All 98 slots, day-major.
    pub fn all() -> impl Iterator<Item = WeeklyTimeSlot> {
        Day::ALL.into_iter().flat_map(|day| {
            (FIRST_HOUR..=LAST_HOUR).map(move |hour| WeeklyTimeSlot { day, hour })
        })
    }
}

impl fmt::Display for WeeklyTimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.label())
    }
}

impl Serialize for WeeklyTimeSlot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for WeeklyTimeSlot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Self::parse_key(&key)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown time slot '{}'", key)))
    }
}
