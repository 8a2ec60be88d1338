use chrono::NaiveDate;
use log::info;
use rusqlite::Connection;

use crate::classes;
use crate::clock;
use crate::db::{herd_repo, user_repo};
use crate::error::{HerdError, HerdResult};
use crate::model::{GrazingStyle, Herd, Id, Schedule, UserProfile, Visibility};
use crate::validation;

/// Meeting spots offered as quick picks when creating a herd.
pub const LOCATION_QUICK_PICKS: &[&str] = &[
    "HBLL Library",
    "Wilkinson Student Center",
    "Talmage Building",
    "Tanner Building",
    "JFSB",
];

/// Everything the create/edit form collects. Times accept `"14:00"` or
/// `"2:00 PM"`.
#[derive(Debug, Clone, Default)]
pub struct HerdForm<'a> {
    pub name: &'a str,
    pub class_code: &'a str,
    pub location: &'a str,
    pub style: GrazingStyle,
    pub visibility: Visibility,
    pub date: Option<NaiveDate>,
    pub start_time: Option<&'a str>,
    pub end_time: Option<&'a str>,
}

struct ValidForm {
    name: String,
    class_code: String,
    location: String,
    schedule: Schedule,
}

fn validate(form: &HerdForm) -> HerdResult<ValidForm> {
    let class_code = validation::non_blank(form.class_code, "class")?.to_uppercase();
    if !classes::is_known(&class_code) {
        return Err(HerdError::UnknownClass { code: class_code });
    }
    let name = validation::non_blank(form.name, "name")?;
    let location = validation::non_blank(form.location, "location")?;
    let date = form.date.ok_or_else(|| HerdError::BlankField {
        field: "date".into(),
    })?;
    let (start, end) = validation::time_range(form.start_time, form.end_time)?;

    Ok(ValidForm {
        name,
        class_code,
        location,
        schedule: Schedule {
            date: Some(date),
            start_time: start.map(clock::format_display_time),
            end_time: end.map(clock::format_display_time),
        },
    })
}

pub fn create_herd(conn: &Connection, creator_id: &Id<UserProfile>, form: &HerdForm) -> HerdResult<Herd> {
    let creator = find_user(conn, creator_id)?;
    let valid = validate(form)?;

    let mut herd = Herd::create(valid.name, valid.location, &creator, valid.schedule);
    herd.class_code = Some(valid.class_code);
    herd.style = form.style;
    herd.visibility = form.visibility;

    herd_repo::insert(conn, &herd)?;
    info!("{} created herd {} ({})", creator.id, herd.id, herd.name);
    Ok(herd)
}

/// Replaces the editable fields of a herd. Only its creator may do this.
pub fn edit_herd(
    conn: &Connection,
    editor_id: &Id<UserProfile>,
    herd_id: &Id<Herd>,
    form: &HerdForm,
) -> HerdResult<Herd> {
    let mut herd = find_herd(conn, herd_id)?;
    if !herd.is_creator(editor_id) {
        return Err(HerdError::NotHerdCreator);
    }
    let valid = validate(form)?;

    herd.name = valid.name;
    herd.class_code = Some(valid.class_code);
    herd.location = valid.location;
    herd.style = form.style;
    herd.visibility = form.visibility;
    herd.schedule = valid.schedule;

    herd_repo::update(conn, &herd)?;
    info!("herd {} updated", herd.id);
    Ok(herd)
}

/// Adds the user to the herd. Joining a herd twice is a no-op.
pub fn join_herd(conn: &Connection, user_id: &Id<UserProfile>, herd_id: &Id<Herd>) -> HerdResult<Herd> {
    let user = find_user(conn, user_id)?;
    let herd = find_herd(conn, herd_id)?;
    if herd.is_member(&user.id) {
        return Ok(herd);
    }

    herd_repo::add_members(conn, &herd.id, std::slice::from_ref(&user.id))?;
    info!("{} joined herd {}", user.id, herd.id);

    // Re-fetch to get updated member list
    Ok(herd_repo::find_by_id(conn, herd_id)?.unwrap_or(herd))
}

fn find_user(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<UserProfile> {
    user_repo::find_by_id(conn, user_id)?.ok_or_else(|| HerdError::NotFound {
        entity_type: "User".into(),
        id: user_id.to_string(),
    })
}

fn find_herd(conn: &Connection, herd_id: &Id<Herd>) -> HerdResult<Herd> {
    herd_repo::find_by_id(conn, herd_id)?.ok_or_else(|| HerdError::NotFound {
        entity_type: "Herd".into(),
        id: herd_id.to_string(),
    })
}
