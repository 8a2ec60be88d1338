use chrono::NaiveDate;
use log::debug;
use rusqlite::Connection;

use crate::db::{herd_repo, user_repo};
use crate::error::HerdResult;
use crate::model::{GrazingStyle, Herd, Id, UserProfile, Visibility};
use crate::ranking::{self, RankedHerd};

/// How many other-day herds the pasture view lists under "nearby".
pub const NEARBY_LIMIT: usize = 5;

pub fn get_herd(conn: &Connection, herd_id: &Id<Herd>) -> HerdResult<Option<Herd>> {
    herd_repo::find_by_id(conn, herd_id)
}

/// Active herds the user belongs to, oldest first.
pub fn my_herds(conn: &Connection, user: &UserProfile) -> HerdResult<Vec<Herd>> {
    herd_repo::find_active_for_member(conn, &user.id)
}

/// Open herds the user has not joined, for a class they take (or for no
/// class in particular), best availability fit first.
pub fn recommended_herds(conn: &Connection, user: &UserProfile) -> HerdResult<Vec<RankedHerd>> {
    let candidates: Vec<Herd> = herd_repo::find_active(conn)?
        .into_iter()
        .filter(|h| !h.is_member(&user.id))
        .filter(|h| h.visibility != Visibility::Closed)
        .filter(|h| match h.class_code.as_deref() {
            None | Some("") => true,
            Some(code) => user.takes_class(code),
        })
        .collect();

    debug!("ranking {} candidate herds for {}", candidates.len(), user.id);
    Ok(ranking::rank_herds(&user.availability, candidates))
}

pub fn herds_on_date(conn: &Connection, date: NaiveDate) -> HerdResult<Vec<Herd>> {
    herd_repo::find_active_on_date(conn, date)
}

/// The first few active herds scheduled on any other day.
pub fn nearby_herds(conn: &Connection, date: NaiveDate) -> HerdResult<Vec<Herd>> {
    Ok(herd_repo::find_active(conn)?
        .into_iter()
        .filter(|h| h.schedule.date != Some(date))
        .take(NEARBY_LIMIT)
        .collect())
}

/// Herds visible on the roam map. Closed herds only show up for members.
pub fn roam_herds(
    conn: &Connection,
    viewer: &UserProfile,
    style: Option<GrazingStyle>,
    search: Option<&str>,
) -> HerdResult<Vec<Herd>> {
    let term = search.map(str::trim).filter(|s| !s.is_empty());
    let herds: Vec<Herd> = herd_repo::find_active(conn)?
        .into_iter()
        .filter(|h| h.visibility != Visibility::Closed || h.is_member(&viewer.id))
        .filter(|h| style.map_or(true, |s| h.style == s))
        .filter(|h| term.map_or(true, |t| h.matches_search(t)))
        .collect();

    debug!("roam view: {} herds (style {:?}, search {:?})", herds.len(), style, term);
    Ok(herds)
}

/// Active herds visible to the viewer whose name contains `query`.
pub fn find_herd_by_name(conn: &Connection, viewer: &UserProfile, query: &str) -> HerdResult<Vec<Herd>> {
    let lower = query.trim().to_lowercase();
    Ok(roam_herds(conn, viewer, None, None)?
        .into_iter()
        .filter(|h| h.name.to_lowercase().contains(&lower))
        .collect())
}

pub fn herd_members(conn: &Connection, herd: &Herd) -> HerdResult<Vec<UserProfile>> {
    user_repo::find_by_ids(conn, &herd.members)
}
