use rusqlite::{params, Connection, OptionalExtension};

use crate::db::user_repo::parse_timestamp;
use crate::error::{HerdError, HerdResult};
use crate::model::{FriendRequest, Id, RequestStatus, UserProfile};

/// Inserts the request, replacing an earlier one for the same pair (e.g. a
/// declined request being sent again).
pub fn upsert(conn: &Connection, request: &FriendRequest) -> HerdResult<()> {
    conn.execute(
        "INSERT INTO friend_requests (id, from_id, from_name, to_id, status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET
             from_name = excluded.from_name,
             status = excluded.status,
             created_at = excluded.created_at",
        params![
            request.id.as_str(),
            request.from.as_str(),
            request.from_name,
            request.to.as_str(),
            request.status.to_db_str(),
            request.created_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub fn update_status(conn: &Connection, id: &Id<FriendRequest>, status: RequestStatus) -> HerdResult<()> {
    conn.execute(
        "UPDATE friend_requests SET status = ?1 WHERE id = ?2",
        params![status.to_db_str(), id.as_str()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: &Id<FriendRequest>) -> HerdResult<Option<FriendRequest>> {
    let row = conn
        .query_row(
            "SELECT id, from_id, from_name, to_id, status, created_at FROM friend_requests WHERE id = ?1",
            params![id.as_str()],
            read_row,
        )
        .optional()?;
    row.map(hydrate).transpose()
}

pub fn find_between(
    conn: &Connection,
    from: &Id<UserProfile>,
    to: &Id<UserProfile>,
) -> HerdResult<Option<FriendRequest>> {
    find_by_id(conn, &FriendRequest::id_for(from, to))
}

pub fn find_incoming(
    conn: &Connection,
    to: &Id<UserProfile>,
    status: RequestStatus,
) -> HerdResult<Vec<FriendRequest>> {
    let mut stmt = conn.prepare(
        "SELECT id, from_id, from_name, to_id, status, created_at FROM friend_requests
         WHERE to_id = ?1 AND status = ?2 ORDER BY created_at, rowid",
    )?;
    let rows = stmt
        .query_map(params![to.as_str(), status.to_db_str()], read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(hydrate).collect()
}

pub fn find_outgoing(
    conn: &Connection,
    from: &Id<UserProfile>,
    status: RequestStatus,
) -> HerdResult<Vec<FriendRequest>> {
    let mut stmt = conn.prepare(
        "SELECT id, from_id, from_name, to_id, status, created_at FROM friend_requests
         WHERE from_id = ?1 AND status = ?2 ORDER BY created_at, rowid",
    )?;
    let rows = stmt
        .query_map(params![from.as_str(), status.to_db_str()], read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(hydrate).collect()
}

type RequestRow = (String, String, String, String, String, String);

fn read_row(row: &rusqlite::Row) -> rusqlite::Result<RequestRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
    ))
}

fn hydrate((id, from, from_name, to, status, created_at): RequestRow) -> HerdResult<FriendRequest> {
    let status = RequestStatus::from_db_str(&status)
        .ok_or_else(|| HerdError::Other(format!("Invalid request status: {}", status)))?;
    Ok(FriendRequest {
        id: Id::new(id),
        from: Id::new(from),
        from_name,
        to: Id::new(to),
        status,
        created_at: parse_timestamp(&created_at)?,
    })
}
