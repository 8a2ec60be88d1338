use log::debug;
use rusqlite::Connection;
use serde::Serialize;

use crate::classes;
use crate::db::user_repo;
use crate::error::HerdResult;
use crate::model::{Id, UserProfile};
use crate::overlap::{self, OverlapGrid};

/// Another student with at least one class in common.
#[derive(Debug, Clone, Serialize)]
pub struct Classmate {
    pub profile: UserProfile,
    /// In the classmate's own class order.
    pub shared_classes: Vec<String>,
}

/// Side-by-side availability of the viewer and one other student.
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityComparison {
    pub grid: OverlapGrid,
    pub overlap_count: usize,
}

/// Set-up students sharing a class with `user`, most shared classes first.
/// With `class_filter`, only students taking that class are listed.
pub fn classmates(
    conn: &Connection,
    user: &UserProfile,
    class_filter: Option<&str>,
) -> HerdResult<Vec<Classmate>> {
    let filter = class_filter
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty());

    let mut result: Vec<Classmate> = user_repo::find_setup_taking_any(conn, &user.classes)?
        .into_iter()
        .filter(|other| other.id != user.id)
        .filter_map(|other| {
            let shared = classes::shared_classes(&user.classes, &other.classes);
            if shared.is_empty() {
                return None;
            }
            if let Some(code) = &filter {
                if !shared.contains(code) {
                    return None;
                }
            }
            Some(Classmate {
                profile: other,
                shared_classes: shared,
            })
        })
        .collect();

    result.sort_by(|a, b| b.shared_classes.len().cmp(&a.shared_classes.len()));
    debug!("{} classmates for {}", result.len(), user.id);
    Ok(result)
}

/// Classmates who are not yet friends with `user`.
pub fn suggested_friends(conn: &Connection, user: &UserProfile) -> HerdResult<Vec<Classmate>> {
    Ok(classmates(conn, user, None)?
        .into_iter()
        .filter(|c| !user.is_friend(&c.profile.id))
        .collect())
}

pub fn compare_availability(user: &UserProfile, other: &UserProfile) -> AvailabilityComparison {
    AvailabilityComparison {
        grid: overlap::classify_overlap(&user.availability, &other.availability),
        overlap_count: overlap::count_overlap(&user.availability, &other.availability),
    }
}

pub fn get_user(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<Option<UserProfile>> {
    user_repo::find_by_id(conn, user_id)
}

/// Other users whose name contains `query`.
pub fn find_user_by_name(conn: &Connection, viewer: &UserProfile, query: &str) -> HerdResult<Vec<UserProfile>> {
    Ok(user_repo::find_by_name(conn, query.trim())?
        .into_iter()
        .filter(|u| u.id != viewer.id)
        .collect())
}
