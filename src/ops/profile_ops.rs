use log::info;
use rusqlite::Connection;

use crate::db::user_repo;
use crate::error::{HerdError, HerdResult};
use crate::model::{AvailabilityGrid, Id, UserProfile};
use crate::validation::{self, trim_optional};

/// Creates an account that still needs profile setup.
pub fn sign_up(conn: &Connection, name: &str, email: &str) -> HerdResult<UserProfile> {
    let valid_name = validation::non_blank(name, "name")?;
    let valid_email = validation::non_blank(email, "email")?;

    if user_repo::find_by_email(conn, &valid_email)?.is_some() {
        return Err(HerdError::AlreadyExists {
            entity_type: "Account".into(),
            identifier: valid_email,
        });
    }

    let user = UserProfile::create(valid_name, valid_email);
    user_repo::insert(conn, &user)?;
    info!("created account {} for {}", user.id, user.email);
    Ok(user)
}

pub fn sign_in(conn: &Connection, email: &str) -> HerdResult<UserProfile> {
    let valid_email = validation::non_blank(email, "email")?;
    user_repo::find_by_email(conn, &valid_email)?.ok_or_else(|| HerdError::NotFound {
        entity_type: "Account".into(),
        id: valid_email,
    })
}

/// Saves the setup wizard: contact details, at least one class, and the
/// availability grid. Marks the profile as set up.
pub fn complete_setup(
    conn: &Connection,
    user_id: &Id<UserProfile>,
    name: &str,
    email: &str,
    phone: Option<&str>,
    classes: &[String],
    availability: AvailabilityGrid,
) -> HerdResult<UserProfile> {
    let mut user = find_user(conn, user_id)?;

    user.name = validation::non_blank(name, "name")?;
    user.email = validation::non_blank(email, "email")?;
    if let Some(existing) = user_repo::find_by_email(conn, &user.email)? {
        if existing.id != user.id {
            return Err(HerdError::AlreadyExists {
                entity_type: "Account".into(),
                identifier: user.email,
            });
        }
    }
    user.phone = trim_optional(phone);

    let classes = validation::known_classes(classes)?;
    validation::non_empty_set(&classes, "classes")?;
    user.classes = classes;
    user.availability = availability;
    user.profile_setup = true;

    user_repo::update(conn, &user)?;
    info!(
        "profile {} set up with {} classes and {} free slots",
        user.id,
        user.classes.len(),
        user.availability.free_count()
    );
    Ok(user)
}

pub fn update_classes(
    conn: &Connection,
    user_id: &Id<UserProfile>,
    classes: &[String],
) -> HerdResult<UserProfile> {
    let mut user = find_user(conn, user_id)?;
    let classes = validation::known_classes(classes)?;
    validation::non_empty_set(&classes, "classes")?;
    user.classes = classes;
    user_repo::set_classes(conn, &user.id, &user.classes)?;
    Ok(user)
}

pub fn update_availability(
    conn: &Connection,
    user_id: &Id<UserProfile>,
    availability: AvailabilityGrid,
) -> HerdResult<UserProfile> {
    let mut user = find_user(conn, user_id)?;
    user.availability = availability;
    user_repo::set_availability(conn, &user.id, &user.availability)?;
    Ok(user)
}

pub fn set_photo_url(
    conn: &Connection,
    user_id: &Id<UserProfile>,
    photo_url: Option<&str>,
) -> HerdResult<UserProfile> {
    let mut user = find_user(conn, user_id)?;
    user.photo_url = trim_optional(photo_url);
    user_repo::update(conn, &user)?;
    Ok(user)
}

fn find_user(conn: &Connection, user_id: &Id<UserProfile>) -> HerdResult<UserProfile> {
    user_repo::find_by_id(conn, user_id)?.ok_or_else(|| HerdError::NotFound {
        entity_type: "User".into(),
        id: user_id.to_string(),
    })
}
