use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::user::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Declined,
}

impl RequestStatus {
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RequestStatus::Pending),
            "accepted" => Some(RequestStatus::Accepted),
            "declined" => Some(RequestStatus::Declined),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accepted => "accepted",
            RequestStatus::Declined => "declined",
        }
    }
}

/// A directed friend request. There is at most one request per ordered
/// (from, to) pair; its id is derived from the pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendRequest {
    pub id: Id<FriendRequest>,
    pub from: Id<UserProfile>,
    pub from_name: String,
    pub to: Id<UserProfile>,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

impl FriendRequest {
    pub fn create(from: &UserProfile, to: Id<UserProfile>) -> Self {
        Self {
            id: Self::id_for(&from.id, &to),
            from: from.id.clone(),
            from_name: from.name.clone(),
            to,
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn id_for(from: &Id<UserProfile>, to: &Id<UserProfile>) -> Id<FriendRequest> {
        Id::new(format!("{}_{}", from, to))
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}
