use chrono::NaiveDate;
use herd::model::*;

fn slot(day: Day, hour: u8) -> WeeklyTimeSlot {
    WeeklyTimeSlot::new(day, hour).unwrap()
}

// ==========================================================================
// ID TESTS
// ==========================================================================

#[test]
fn generated_ids_are_unique() {
    let a: Id<Herd> = Id::generate();
    let b: Id<Herd> = Id::generate();
    assert_ne!(a, b);
}

#[test]
fn id_keeps_opaque_value() {
    let id: Id<UserProfile> = Id::new("x7Fq2LmA9");
    assert_eq!(id.as_str(), "x7Fq2LmA9");
    assert_eq!(id.to_string(), "x7Fq2LmA9");
}

#[test]
fn id_serializes_as_plain_string() {
    let id: Id<UserProfile> = Id::new("abc");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
}

// ==========================================================================
// TIME SLOT TESTS
// ==========================================================================

#[test]
fn slot_vocabulary_sizes() {
    assert_eq!(DAYS.len(), 7);
    assert_eq!(TIMES.len(), 14);
    assert_eq!(TIMES[0], "8 AM");
    assert_eq!(TIMES[13], "9 PM");
}

#[test]
fn slot_keys_round_trip_for_every_cell() {
    for s in WeeklyTimeSlot::all() {
        assert_eq!(WeeklyTimeSlot::parse_key(&s.key()), Some(s));
    }
}

#[test]
fn slot_key_spelling() {
    assert_eq!(slot(Day::Mon, 8).key(), "Mon-8AM");
    assert_eq!(slot(Day::Thu, 12).key(), "Thu-12PM");
    assert_eq!(slot(Day::Sun, 21).key(), "Sun-9PM");
}

#[test]
fn slot_rejects_hours_outside_grid() {
    assert!(WeeklyTimeSlot::new(Day::Mon, 7).is_none());
    assert!(WeeklyTimeSlot::new(Day::Mon, 22).is_none());
    assert!(WeeklyTimeSlot::parse_key("Mon-7AM").is_none());
    assert!(WeeklyTimeSlot::parse_key("Monday-8AM").is_none());
}

#[test]
fn day_from_weekday() {
    let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    let sunday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
    use chrono::Datelike;
    assert_eq!(Day::from_weekday(monday.weekday()), Day::Mon);
    assert_eq!(Day::from_weekday(sunday.weekday()), Day::Sun);
}

// ==========================================================================
// AVAILABILITY GRID TESTS
// ==========================================================================

#[test]
fn grid_deserializes_from_document_map() {
    let json = r#"{"Mon-8AM": true, "Tue-2PM": false, "Bogus-1AM": true, "Wed-12PM": true}"#;
    let grid: AvailabilityGrid = serde_json::from_str(json).unwrap();
    assert_eq!(grid.free_count(), 2);
    assert!(grid.is_free(slot(Day::Mon, 8)));
    assert!(grid.is_free(slot(Day::Wed, 12)));
    assert!(!grid.is_free(slot(Day::Tue, 14)));
}

#[test]
fn grid_serializes_only_free_slots() {
    let grid: AvailabilityGrid = [slot(Day::Fri, 15)].into_iter().collect();
    let json = serde_json::to_value(&grid).unwrap();
    assert_eq!(json, serde_json::json!({"Fri-3PM": true}));
}

#[test]
fn grid_toggle_flips_state() {
    let mut grid = AvailabilityGrid::new();
    assert!(grid.toggle(slot(Day::Sat, 10)));
    assert!(grid.is_free(slot(Day::Sat, 10)));
    assert!(!grid.toggle(slot(Day::Sat, 10)));
    assert!(grid.is_empty());
}

// ==========================================================================
// HERD TESTS
// ==========================================================================

#[test]
fn herd_create_includes_creator_as_member() {
    let creator = UserProfile::create("Jane Smith".into(), "jane@school.edu".into());
    let herd = Herd::create("Late Night CS".into(), "HBLL Library".into(), &creator, Schedule::default());
    assert!(herd.is_member(&creator.id));
    assert!(herd.is_creator(&creator.id));
    assert_eq!(herd.member_count(), 1);
    assert_eq!(herd.creator_name, "Jane Smith");
    assert!(herd.active);
    assert_eq!(herd.style, GrazingStyle::Quiet);
    assert_eq!(herd.visibility, Visibility::Open);
}

#[test]
fn herd_search_matches_name_or_location() {
    let creator = UserProfile::create("Jane".into(), "jane@school.edu".into());
    let herd = Herd::create("Calc Crammers".into(), "Talmage Building".into(), &creator, Schedule::default());
    assert!(herd.matches_search("calc"));
    assert!(herd.matches_search("TALMAGE"));
    assert!(!herd.matches_search("library"));
}

#[test]
fn schedule_completeness() {
    let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    assert!(Schedule::new(date, "2:00 PM", "4:00 PM").is_complete());
    assert!(!Schedule::default().is_complete());

    let mut blank_end = Schedule::new(date, "2:00 PM", "4:00 PM");
    blank_end.end_time = Some(String::new());
    assert!(!blank_end.is_complete());
    assert_eq!(blank_end.end(), None);
    assert_eq!(blank_end.start(), Some("2:00 PM"));
}

#[test]
fn grazing_style_db_strings() {
    for style in GrazingStyle::ALL {
        assert_eq!(GrazingStyle::from_db_str(style.to_db_str()), Some(*style));
    }
    assert_eq!(GrazingStyle::from_db_str("rowdy"), None);
}

#[test]
fn grazing_style_serde_is_lowercase() {
    assert_eq!(serde_json::to_string(&GrazingStyle::Stampede).unwrap(), "\"stampede\"");
}

// ==========================================================================
// FRIEND REQUEST TESTS
// ==========================================================================

#[test]
fn friend_request_id_is_derived_from_pair() {
    let from = UserProfile::create("Ann".into(), "ann@school.edu".into());
    let to: Id<UserProfile> = Id::new("bob");
    let request = FriendRequest::create(&from, to.clone());
    assert_eq!(request.id.as_str(), format!("{}_bob", from.id));
    assert_eq!(request.id, FriendRequest::id_for(&from.id, &to));
    assert!(request.is_pending());
    assert_eq!(request.from_name, "Ann");
}

#[test]
fn request_status_db_strings() {
    assert_eq!(RequestStatus::from_db_str("accepted"), Some(RequestStatus::Accepted));
    assert_eq!(RequestStatus::Declined.to_db_str(), "declined");
    assert_eq!(RequestStatus::from_db_str("maybe"), None);
}

// ==========================================================================
// USER TESTS
// ==========================================================================

#[test]
fn new_user_needs_setup() {
    let user = UserProfile::create("Ann".into(), "ann@school.edu".into());
    assert!(!user.profile_setup);
    assert!(user.classes.is_empty());
    assert!(user.friends.is_empty());
    assert_eq!(user.auth_user().id, user.id);
}
