use log::info;
use rusqlite::Connection;

use crate::db::{request_repo, user_repo};
use crate::error::{HerdError, HerdResult};
use crate::model::{FriendRequest, Id, RequestStatus, UserProfile};

/// Sends a friend request. If the other user already asked us, their
/// pending request is accepted instead of opening a second one.
pub fn send_request(
    conn: &Connection,
    from_id: &Id<UserProfile>,
    to_id: &Id<UserProfile>,
) -> HerdResult<FriendRequest> {
    if from_id == to_id {
        return Err(HerdError::SelfRequest);
    }
    let from = find_user(conn, from_id)?;
    let to = find_user(conn, to_id)?;

    if from.is_friend(&to.id) {
        return Err(HerdError::AlreadyFriends { name: to.name });
    }

    if let Some(incoming) = request_repo::find_between(conn, &to.id, &from.id)? {
        if incoming.is_pending() {
            return accept_request(conn, &from.id, &to.id);
        }
    }

    if let Some(existing) = request_repo::find_between(conn, &from.id, &to.id)? {
        if existing.is_pending() {
            return Err(HerdError::AlreadyExists {
                entity_type: "Friend request".into(),
                identifier: to.name,
            });
        }
    }

    let request = FriendRequest::create(&from, to.id.clone());
    request_repo::upsert(conn, &request)?;
    info!("{} sent a friend request to {}", from.id, to.id);
    Ok(request)
}

/// Accepts the pending request `from_id` sent to `user_id` and records the
/// friendship on both sides.
pub fn accept_request(
    conn: &Connection,
    user_id: &Id<UserProfile>,
    from_id: &Id<UserProfile>,
) -> HerdResult<FriendRequest> {
    let mut request = find_pending(conn, from_id, user_id)?;

    let tx = conn.unchecked_transaction()?;
    request_repo::update_status(&tx, &request.id, RequestStatus::Accepted)?;
    user_repo::add_friendship(&tx, user_id, from_id)?;
    tx.commit()?;
    request.status = RequestStatus::Accepted;

    info!("{} accepted friend request from {}", user_id, from_id);
    Ok(request)
}

pub fn decline_request(
    conn: &Connection,
    user_id: &Id<UserProfile>,
    from_id: &Id<UserProfile>,
) -> HerdResult<FriendRequest> {
    let mut request = find_pending(conn, from_id, user_id)?;

    request_repo::update_status(conn, &request.id, RequestStatus::Declined)?;
    request.status = RequestStatus::Declined;

    info!("{} declined friend request from {}", user_id, from_id);
    Ok(request)
}

fn find_pending(
    conn: &Connection,
    from_id: &Id<UserProfile>,
    to_id: &Id<UserProfile>,
) -> HerdResult<FriendRequest> {
    request_repo::find_between(conn, from_id, to_id)?
        .filter(FriendRequest::is_pending)
        .ok_or_else(|| HerdError::NotFound {
            entity_type: "Friend request".into(),
            id: FriendRequest::id_for(from_id, to_id).to_string(),
        })
}

fn find_user(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<UserProfile> {
    user_repo::find_by_id(conn, user_id)?.ok_or_else(|| HerdError::NotFound {
        entity_type: "User".into(),
        id: user_id.to_string(),
    })
}
