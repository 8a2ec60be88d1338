use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::error::{HerdError, HerdResult};
use crate::model::{AvailabilityGrid, Id, UserProfile};

const USER_COLUMNS: &str = "id, name, email, phone, photo_url, profile_setup, created_at";

pub fn insert(conn: &Connection, user: &UserProfile) -> HerdResult<()> {
    conn.execute(
        "INSERT INTO users (id, name, email, phone, photo_url, profile_setup, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            user.id.as_str(),
            user.name,
            user.email,
            user.phone,
            user.photo_url,
            user.profile_setup as i32,
            user.created_at.to_rfc3339(),
        ],
    )?;

    set_classes(conn, &user.id, &user.classes)?;
    set_availability(conn, &user.id, &user.availability)?;
    for friend_id in &user.friends {
        add_friend_link(conn, &user.id, friend_id)?;
    }
    Ok(())
}

/// Records `friend_id` in `user_id`'s friend list only.
pub fn add_friend_link(
    conn: &Connection,
    user_id: &Id<UserProfile>,
    friend_id: &Id<UserProfile>,
) -> HerdResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO friendships (user_id, friend_id) VALUES (?1, ?2)",
        params![user_id.as_str(), friend_id.as_str()],
    )?;
    Ok(())
}

/// Writes the profile row, classes and availability. Friendships are only
/// changed through [`add_friendship`].
pub fn update(conn: &Connection, user: &UserProfile) -> HerdResult<()> {
    conn.execute(
        "UPDATE users SET name = ?1, email = ?2, phone = ?3, photo_url = ?4, profile_setup = ?5
         WHERE id = ?6",
        params![
            user.name,
            user.email,
            user.phone,
            user.photo_url,
            user.profile_setup as i32,
            user.id.as_str(),
        ],
    )?;
    set_classes(conn, &user.id, &user.classes)?;
    set_availability(conn, &user.id, &user.availability)?;
    Ok(())
}

pub fn set_classes(conn: &Connection, user_id: &Id<UserProfile>, classes: &[String]) -> HerdResult<()> {
    conn.execute(
        "DELETE FROM user_classes WHERE user_id = ?1",
        params![user_id.as_str()],
    )?;
    for (position, code) in classes.iter().enumerate() {
        conn.execute(
            "INSERT OR IGNORE INTO user_classes (user_id, class_code, position) VALUES (?1, ?2, ?3)",
            params![user_id.as_str(), code, position as i64],
        )?;
    }
    Ok(())
}

pub fn set_availability(
    conn: &Connection,
    user_id: &Id<UserProfile>,
    grid: &AvailabilityGrid,
) -> HerdResult<()> {
    conn.execute(
        "DELETE FROM user_availability WHERE user_id = ?1",
        params![user_id.as_str()],
    )?;
    for key in grid.keys() {
        conn.execute(
            "INSERT INTO user_availability (user_id, slot_key) VALUES (?1, ?2)",
            params![user_id.as_str(), key],
        )?;
    }
    Ok(())
}

/// Records a mutual friendship.
pub fn add_friendship(conn: &Connection, a: &Id<UserProfile>, b: &Id<UserProfile>) -> HerdResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO friendships (user_id, friend_id) VALUES (?1, ?2), (?2, ?1)",
        params![a.as_str(), b.as_str()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: &Id<UserProfile>) -> HerdResult<Option<UserProfile>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS),
            params![id.as_str()],
            read_row,
        )
        .optional()?;
    row.map(|r| hydrate(conn, r)).transpose()
}

pub fn find_by_email(conn: &Connection, email: &str) -> HerdResult<Option<UserProfile>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM users WHERE email = ?1 COLLATE NOCASE", USER_COLUMNS),
            params![email.trim()],
            read_row,
        )
        .optional()?;
    row.map(|r| hydrate(conn, r)).transpose()
}

pub fn find_all(conn: &Connection) -> HerdResult<Vec<UserProfile>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM users ORDER BY name", USER_COLUMNS))?;
    let rows = stmt
        .query_map([], read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(|r| hydrate(conn, r)).collect()
}

pub fn find_by_ids(conn: &Connection, ids: &[Id<UserProfile>]) -> HerdResult<Vec<UserProfile>> {
    let mut users = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(user) = find_by_id(conn, id)? {
            users.push(user);
        }
    }
    Ok(users)
}

pub fn find_by_name(conn: &Connection, query: &str) -> HerdResult<Vec<UserProfile>> {
    let pattern = format!("%{}%", query.to_lowercase());
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM users WHERE LOWER(name) LIKE ?1 ORDER BY name",
        USER_COLUMNS
    ))?;
    let rows = stmt
        .query_map(params![pattern], read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(|r| hydrate(conn, r)).collect()
}

/// Users with a completed profile who take at least one of `classes`.
pub fn find_setup_taking_any(conn: &Connection, classes: &[String]) -> HerdResult<Vec<UserProfile>> {
    if classes.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; classes.len()].join(", ");
    let sql = format!(
        "SELECT {} FROM users WHERE profile_setup = 1 AND id IN (
            SELECT DISTINCT user_id FROM user_classes WHERE class_code IN ({})
         ) ORDER BY name",
        USER_COLUMNS, placeholders
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(classes.iter()), read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(|r| hydrate(conn, r)).collect()
}

struct UserRow {
    id: String,
    name: String,
    email: String,
    phone: Option<String>,
    photo_url: Option<String>,
    profile_setup: bool,
    created_at: String,
}

fn read_row(row: &rusqlite::Row) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        photo_url: row.get(4)?,
        profile_setup: row.get::<_, i32>(5)? != 0,
        created_at: row.get(6)?,
    })
}

fn hydrate(conn: &Connection, row: UserRow) -> HerdResult<UserProfile> {
    let id: Id<UserProfile> = Id::new(row.id);
    Ok(UserProfile {
        classes: find_classes(conn, &id)?,
        availability: find_availability(conn, &id)?,
        friends: find_friend_ids(conn, &id)?,
        id,
        name: row.name,
        email: row.email,
        phone: row.phone,
        photo_url: row.photo_url,
        profile_setup: row.profile_setup,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

pub(crate) fn parse_timestamp(s: &str) -> HerdResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| HerdError::Other(format!("Invalid timestamp '{}': {}", s, e)))
}

fn find_classes(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT class_code FROM user_classes WHERE user_id = ?1 ORDER BY position",
    )?;
    let codes = stmt
        .query_map(params![user_id.as_str()], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(codes)
}

fn find_availability(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<AvailabilityGrid> {
    let mut stmt = conn.prepare("SELECT slot_key FROM user_availability WHERE user_id = ?1")?;
    let keys = stmt
        .query_map(params![user_id.as_str()], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(AvailabilityGrid::from_keys(keys.iter().map(String::as_str)))
}

fn find_friend_ids(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<Vec<Id<UserProfile>>> {
    let mut stmt = conn.prepare(
        "SELECT friend_id FROM friendships WHERE user_id = ?1 ORDER BY rowid",
    )?;
    let ids = stmt
        .query_map(params![user_id.as_str()], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(Id::new)
        .collect();
    Ok(ids)
}
