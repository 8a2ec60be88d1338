use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use rusqlite::Connection;
use serde_json::Value;

use crate::classes;
use crate::db::{herd_repo, request_repo, schema, user_repo};
use crate::error::{HerdError, HerdResult};
use crate::model::*;

/// Imports a JSON export of the document store (`users`, `herds` and
/// `friendRequests` collections keyed by document id) into a SQLite database.
pub fn import_json(json_path: &Path, db_path: &Path) -> HerdResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    let json: Value = serde_json::from_str(&json_str)?;

    let conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;

    import_export(&conn, &json)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub users: usize,
    pub friendships: usize,
    pub herds: usize,
    pub memberships: usize,
    pub friend_requests: usize,
    pub skipped: usize,
}

/// Imports an already parsed export into `conn`. Runs in one transaction;
/// records that reference unknown users are skipped with a warning.
pub fn import_export(conn: &Connection, json: &Value) -> HerdResult<ImportStats> {
    if !json.is_object() {
        return Err(HerdError::Other("Export must be a JSON object".into()));
    }
    let tx = conn.unchecked_transaction()?;
    let mut stats = ImportStats::default();

    // Users first, without friendships, so every reference can be checked
    let mut known_users: HashSet<String> = HashSet::new();
    let mut pending_friends: Vec<(Id<UserProfile>, Vec<Id<UserProfile>>)> = Vec::new();
    if let Some(users) = json["users"].as_object() {
        for (doc_id, user_val) in users {
            let Some(mut user) = parse_user(doc_id, user_val) else {
                warn!("skipping user {}: missing email", doc_id);
                stats.skipped += 1;
                continue;
            };
            if user_repo::find_by_email(&tx, &user.email)?.is_some() {
                warn!("skipping user {}: duplicate email {}", doc_id, user.email);
                stats.skipped += 1;
                continue;
            }
            let friends = std::mem::take(&mut user.friends);
            user_repo::insert(&tx, &user)?;
            known_users.insert(user.id.value.clone());
            pending_friends.push((user.id, friends));
            stats.users += 1;
        }
    }

    for (user_id, friends) in &pending_friends {
        for friend_id in friends {
            if !known_users.contains(friend_id.as_str()) {
                warn!("dropping friend {} of {}: unknown user", friend_id, user_id);
                continue;
            }
            user_repo::add_friend_link(&tx, user_id, friend_id)?;
            stats.friendships += 1;
        }
    }

    if let Some(herds) = json["herds"].as_object() {
        for (doc_id, herd_val) in herds {
            let mut herd = parse_herd(doc_id, herd_val);
            if !known_users.contains(herd.creator.as_str()) {
                warn!("skipping herd {}: unknown creator {}", doc_id, herd.creator);
                stats.skipped += 1;
                continue;
            }
            let mut seen = HashSet::new();
            herd.members.retain(|m| {
                if !known_users.contains(m.as_str()) {
                    warn!("dropping member {} of herd {}: unknown user", m, doc_id);
                    return false;
                }
                seen.insert(m.clone())
            });
            if !herd.is_member(&herd.creator) {
                herd.members.insert(0, herd.creator.clone());
            }
            herd_repo::insert(&tx, &herd)?;
            stats.memberships += herd.member_count();
            stats.herds += 1;
        }
    }

    if let Some(requests) = json["friendRequests"].as_object() {
        for (doc_id, request_val) in requests {
            let request = parse_request(request_val);
            if !known_users.contains(request.from.as_str()) || !known_users.contains(request.to.as_str()) {
                warn!("skipping friend request {}: unknown user", doc_id);
                stats.skipped += 1;
                continue;
            }
            request_repo::upsert(&tx, &request)?;
            stats.friend_requests += 1;
        }
    }

    tx.commit()?;
    info!(
        "imported {} users, {} herds, {} friend requests ({} skipped)",
        stats.users, stats.herds, stats.friend_requests, stats.skipped
    );
    Ok(stats)
}

fn parse_user(doc_id: &str, val: &Value) -> Option<UserProfile> {
    let email = str_field(val, "email").filter(|e| !e.is_empty())?;
    let availability = match &val["availability"] {
        Value::Null => AvailabilityGrid::new(),
        other => serde_json::from_value(other.clone()).unwrap_or_else(|e| {
            warn!("ignoring availability of user {}: {}", doc_id, e);
            AvailabilityGrid::new()
        }),
    };

    Some(UserProfile {
        id: Id::new(doc_id),
        name: str_field(val, "name").unwrap_or_default(),
        email,
        phone: str_field(val, "phone").filter(|s| !s.is_empty()),
        photo_url: str_field(val, "photoURL").filter(|s| !s.is_empty()),
        classes: class_codes(doc_id, &val["classes"]),
        availability,
        profile_setup: val["profileSetup"].as_bool().unwrap_or(false),
        friends: string_list(&val["friends"]).into_iter().map(Id::new).collect(),
        created_at: timestamp(&val["createdAt"]),
    })
}

fn parse_herd(doc_id: &str, val: &Value) -> Herd {
    let schedule = &val["schedule"];
    Herd {
        id: Id::new(doc_id),
        name: str_field(val, "name").unwrap_or_default(),
        class_code: str_field(val, "classId").filter(|s| !s.is_empty()),
        location: str_field(val, "location").unwrap_or_default(),
        style: val["style"]
            .as_str()
            .and_then(GrazingStyle::from_db_str)
            .unwrap_or_default(),
        visibility: val["visibility"]
            .as_str()
            .and_then(Visibility::from_db_str)
            .unwrap_or_default(),
        creator: Id::new(str_field(val, "creator").unwrap_or_default()),
        creator_name: str_field(val, "creatorName").unwrap_or_default(),
        members: string_list(&val["members"]).into_iter().map(Id::new).collect(),
        schedule: Schedule {
            date: schedule["date"]
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
            start_time: str_field(schedule, "startTime").filter(|s| !s.is_empty()),
            end_time: str_field(schedule, "endTime").filter(|s| !s.is_empty()),
        },
        active: val["active"].as_bool().unwrap_or(true),
        created_at: timestamp(&val["createdAt"]),
    }
}

fn parse_request(val: &Value) -> FriendRequest {
    let from: Id<UserProfile> = Id::new(str_field(val, "from").unwrap_or_default());
    let to: Id<UserProfile> = Id::new(str_field(val, "to").unwrap_or_default());
    FriendRequest {
        id: FriendRequest::id_for(&from, &to),
        from,
        from_name: str_field(val, "fromName").unwrap_or_default(),
        to,
        status: val["status"]
            .as_str()
            .and_then(RequestStatus::from_db_str)
            .unwrap_or(RequestStatus::Pending),
        created_at: timestamp(&val["createdAt"]),
    }
}

/// Catalog codes in export order, uppercased and without repeats.
fn class_codes(doc_id: &str, val: &Value) -> Vec<String> {
    let mut codes: Vec<String> = Vec::new();
    for raw in string_list(val) {
        let code = raw.trim().to_uppercase();
        if !classes::is_known(&code) {
            warn!("dropping class {:?} of user {}: not in catalog", raw, doc_id);
            continue;
        }
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}

fn str_field(val: &Value, key: &str) -> Option<String> {
    val[key].as_str().map(|s| s.trim().to_string())
}

fn string_list(val: &Value) -> Vec<String> {
    match val {
        Value::Array(arr) => arr.iter().filter_map(|v| v.as_str().map(|s| s.to_string())).collect(),
        _ => Vec::new(),
    }
}

fn timestamp(val: &Value) -> DateTime<Utc> {
    val.as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}
