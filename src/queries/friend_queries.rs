use rusqlite::Connection;
use serde::Serialize;

use crate::db::{request_repo, user_repo};
use crate::error::HerdResult;
use crate::model::{FriendRequest, Id, RequestStatus, UserProfile};

/// Where the viewer stands with another student; drives the action shown
/// next to a classmate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    Friends,
    PendingSent,
    PendingReceived,
    NotConnected,
}

pub fn friends(conn: &Connection, user: &UserProfile) -> HerdResult<Vec<UserProfile>> {
    let mut friends = user_repo::find_by_ids(conn, &user.friends)?;
    friends.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(friends)
}

pub fn incoming_requests(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<Vec<FriendRequest>> {
    request_repo::find_incoming(conn, user_id, RequestStatus::Pending)
}

pub fn outgoing_requests(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<Vec<FriendRequest>> {
    request_repo::find_outgoing(conn, user_id, RequestStatus::Pending)
}

pub fn relation(conn: &Connection, user: &UserProfile, other_id: &Id<UserProfile>) -> HerdResult<Relation> {
    if user.is_friend(other_id) {
        return Ok(Relation::Friends);
    }
    let pending = |r: Option<FriendRequest>| r.is_some_and(|r| r.is_pending());
    if pending(request_repo::find_between(conn, &user.id, other_id)?) {
        return Ok(Relation::PendingSent);
    }
    if pending(request_repo::find_between(conn, other_id, &user.id)?) {
        return Ok(Relation::PendingReceived);
    }
    Ok(Relation::NotConnected)
}
