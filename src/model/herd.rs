use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::user::UserProfile;

/// The social tone of a herd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrazingStyle {
    #[default]
    Quiet,
    Casual,
    Stampede,
}

impl GrazingStyle {
    pub const ALL: &'static [GrazingStyle] =
        &[GrazingStyle::Quiet, GrazingStyle::Casual, GrazingStyle::Stampede];

    pub fn display_name(&self) -> &'static str {
        match self {
            GrazingStyle::Quiet => "Quiet",
            GrazingStyle::Casual => "Casual",
            GrazingStyle::Stampede => "Stampede",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GrazingStyle::Quiet => "heads down, minimal talking",
            GrazingStyle::Casual => "work and chat",
            GrazingStyle::Stampede => "high energy, lots of discussion",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "quiet" => Some(GrazingStyle::Quiet),
            "casual" => Some(GrazingStyle::Casual),
            "stampede" => Some(GrazingStyle::Stampede),
            _ => None,
        }
    }

    /// Convert to database string representation.
    pub fn to_db_str(&self) -> &'static str {
        match self {
            GrazingStyle::Quiet => "quiet",
            GrazingStyle::Casual => "casual",
            GrazingStyle::Stampede => "stampede",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Open,
    Closed,
}

impl Visibility {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Visibility::Open),
            "closed" => Some(Visibility::Closed),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            Visibility::Open => "open",
            Visibility::Closed => "closed",
        }
    }
}

/// When a herd meets. Times are kept in the 12-hour display form
/// (`"2:00 PM"`) they are shown in. Any part may be missing on older records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl Schedule {
    pub fn new(date: NaiveDate, start_time: &str, end_time: &str) -> Self {
        Self {
            date: Some(date),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
        }
    }

    /// Start time, with an empty string read as missing.
    pub fn start(&self) -> Option<&str> {
        self.start_time.as_deref().filter(|s| !s.is_empty())
    }

    pub fn end(&self) -> Option<&str> {
        self.end_time.as_deref().filter(|s| !s.is_empty())
    }

    /// Date and both times are present, so the schedule can be scored.
    pub fn is_complete(&self) -> bool {
        self.date.is_some() && self.start().is_some() && self.end().is_some()
    }
}

/// A single scheduled study-group occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Herd {
    pub id: Id<Herd>,
    pub name: String,
    pub class_code: Option<String>,
    pub location: String,
    pub style: GrazingStyle,
    pub visibility: Visibility,
    pub creator: Id<UserProfile>,
    pub creator_name: String,
    /// Always contains the creator.
    pub members: Vec<Id<UserProfile>>,
    pub schedule: Schedule,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Herd {
    pub fn create(
        name: String,
        location: String,
        creator: &UserProfile,
        schedule: Schedule,
    ) -> Self {
        Self {
            id: Id::generate(),
            name,
            class_code: None,
            location,
            style: GrazingStyle::default(),
            visibility: Visibility::default(),
            creator: creator.id.clone(),
            creator_name: creator.name.clone(),
            members: vec![creator.id.clone()],
            schedule,
            active: true,
            created_at: Utc::now(),
        }
    }

    /// Derived from the member list; there is no separately stored count.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_member(&self, user_id: &Id<UserProfile>) -> bool {
        self.members.contains(user_id)
    }

    pub fn is_creator(&self, user_id: &Id<UserProfile>) -> bool {
        &self.creator == user_id
    }

    /// Case-insensitive match against name or location.
    pub fn matches_search(&self, term: &str) -> bool {
        let lower = term.to_lowercase();
        self.name.to_lowercase().contains(&lower) || self.location.to_lowercase().contains(&lower)
    }
}
