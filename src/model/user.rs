use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::availability::AvailabilityGrid;
use super::ids::Id;

/// The signed-in identity as reported by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Id<UserProfile>,
    pub email: String,
}

/// A student's profile document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Id<UserProfile>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    pub classes: Vec<String>,
    pub availability: AvailabilityGrid,
    /// Set once the user has picked classes and availability.
    pub profile_setup: bool,
    pub friends: Vec<Id<UserProfile>>,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// A freshly signed-up account that still needs profile setup.
    pub fn create(name: String, email: String) -> Self {
        Self {
            id: Id::generate(),
            name,
            email,
            phone: None,
            photo_url: None,
            classes: Vec::new(),
            availability: AvailabilityGrid::new(),
            profile_setup: false,
            friends: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.id.clone(),
            email: self.email.clone(),
        }
    }

    pub fn is_friend(&self, other: &Id<UserProfile>) -> bool {
        self.friends.contains(other)
    }

    pub fn takes_class(&self, code: &str) -> bool {
        self.classes.iter().any(|c| c == code)
    }
}
