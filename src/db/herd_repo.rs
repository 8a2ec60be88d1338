use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::user_repo::parse_timestamp;
use crate::error::{HerdError, HerdResult};
use crate::model::{GrazingStyle, Herd, Id, Schedule, UserProfile, Visibility};

const HERD_COLUMNS: &str = "id, name, class_code, location, style, visibility, creator_id, creator_name,
     schedule_date, start_time, end_time, active, created_at";

pub fn insert(conn: &Connection, herd: &Herd) -> HerdResult<()> {
    conn.execute(
        "INSERT INTO herds (id, name, class_code, location, style, visibility, creator_id, creator_name,
         schedule_date, start_time, end_time, active, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            herd.id.as_str(),
            herd.name,
            herd.class_code,
            herd.location,
            herd.style.to_db_str(),
            herd.visibility.to_db_str(),
            herd.creator.as_str(),
            herd.creator_name,
            herd.schedule.date.map(|d| d.to_string()),
            herd.schedule.start_time,
            herd.schedule.end_time,
            herd.active as i32,
            herd.created_at.to_rfc3339(),
        ],
    )?;

    add_members(conn, &herd.id, &herd.members)?;
    Ok(())
}

/// Updates the editable fields. Membership is changed with [`add_members`].
pub fn update(conn: &Connection, herd: &Herd) -> HerdResult<()> {
    conn.execute(
        "UPDATE herds SET name = ?1, class_code = ?2, location = ?3, style = ?4, visibility = ?5,
         schedule_date = ?6, start_time = ?7, end_time = ?8, active = ?9
         WHERE id = ?10",
        params![
            herd.name,
            herd.class_code,
            herd.location,
            herd.style.to_db_str(),
            herd.visibility.to_db_str(),
            herd.schedule.date.map(|d| d.to_string()),
            herd.schedule.start_time,
            herd.schedule.end_time,
            herd.active as i32,
            herd.id.as_str(),
        ],
    )?;
    Ok(())
}

/// Adds members, ignoring ones already present. Each insert is a single
/// statement, so concurrent joins cannot drop one another.
pub fn add_members(conn: &Connection, herd_id: &Id<Herd>, member_ids: &[Id<UserProfile>]) -> HerdResult<()> {
    for member_id in member_ids {
        conn.execute(
            "INSERT OR IGNORE INTO herd_members (herd_id, user_id, joined_seq)
             VALUES (?1, ?2, (SELECT COALESCE(MAX(joined_seq), 0) + 1 FROM herd_members WHERE herd_id = ?1))",
            params![herd_id.as_str(), member_id.as_str()],
        )?;
    }
    Ok(())
}

pub fn count_members(conn: &Connection, herd_id: &Id<Herd>) -> HerdResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM herd_members WHERE herd_id = ?1",
        params![herd_id.as_str()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

pub fn find_by_id(conn: &Connection, id: &Id<Herd>) -> HerdResult<Option<Herd>> {
    let row = conn
        .query_row(
            &format!("SELECT {} FROM herds WHERE id = ?1", HERD_COLUMNS),
            params![id.as_str()],
            read_row,
        )
        .optional()?;
    row.map(|r| hydrate(conn, r)).transpose()
}

/// All active herds, oldest first.
pub fn find_active(conn: &Connection) -> HerdResult<Vec<Herd>> {
    query_herds(
        conn,
        &format!("SELECT {} FROM herds WHERE active = 1 ORDER BY created_at, rowid", HERD_COLUMNS),
        params![],
    )
}

pub fn find_active_on_date(conn: &Connection, date: NaiveDate) -> HerdResult<Vec<Herd>> {
    query_herds(
        conn,
        &format!(
            "SELECT {} FROM herds WHERE active = 1 AND schedule_date = ?1 ORDER BY created_at, rowid",
            HERD_COLUMNS
        ),
        params![date.to_string()],
    )
}

pub fn find_active_for_member(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<Vec<Herd>> {
    query_herds(
        conn,
        &format!(
            "SELECT {} FROM herds WHERE active = 1 AND id IN (
                SELECT herd_id FROM herd_members WHERE user_id = ?1
             ) ORDER BY created_at, rowid",
            HERD_COLUMNS
        ),
        params![user_id.as_str()],
    )
}

fn query_herds(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> HerdResult<Vec<Herd>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(|r| hydrate(conn, r)).collect()
}

struct HerdRow {
    id: String,
    name: String,
    class_code: Option<String>,
    location: String,
    style: String,
    visibility: String,
    creator_id: String,
    creator_name: String,
    schedule_date: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    active: bool,
    created_at: String,
}

fn read_row(row: &rusqlite::Row) -> rusqlite::Result<HerdRow> {
    Ok(HerdRow {
        id: row.get(0)?,
        name: row.get(1)?,
        class_code: row.get(2)?,
        location: row.get(3)?,
        style: row.get(4)?,
        visibility: row.get(5)?,
        creator_id: row.get(6)?,
        creator_name: row.get(7)?,
        schedule_date: row.get(8)?,
        start_time: row.get(9)?,
        end_time: row.get(10)?,
        active: row.get::<_, i32>(11)? != 0,
        created_at: row.get(12)?,
    })
}

fn hydrate(conn: &Connection, row: HerdRow) -> HerdResult<Herd> {
    let id: Id<Herd> = Id::new(row.id);
    let style = GrazingStyle::from_db_str(&row.style)
        .ok_or_else(|| HerdError::Other(format!("Invalid grazing style: {}", row.style)))?;
    let visibility = Visibility::from_db_str(&row.visibility)
        .ok_or_else(|| HerdError::Other(format!("Invalid visibility: {}", row.visibility)))?;

    Ok(Herd {
        members: find_member_ids(conn, &id)?,
        id,
        name: row.name,
        class_code: row.class_code,
        location: row.location,
        style,
        visibility,
        creator: Id::new(row.creator_id),
        creator_name: row.creator_name,
        schedule: Schedule {
            date: row
                .schedule_date
                .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
            start_time: row.start_time,
            end_time: row.end_time,
        },
        active: row.active,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn find_member_ids(conn: &Connection, herd_id: &Id<Herd>) -> HerdResult<Vec<Id<UserProfile>>> {
    let mut stmt = conn.prepare(
        "SELECT user_id FROM herd_members WHERE herd_id = ?1 ORDER BY joined_seq",
    )?;
    let ids = stmt
        .query_map(params![herd_id.as_str()], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(Id::new)
        .collect();
    Ok(ids)
}
