use chrono::NaiveDate;
use herd::db::*;
use herd::error::HerdError;
use herd::model::*;
use herd::ops::herd_ops::HerdForm;
use herd::ops::*;

fn classes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Signs up a student and completes their profile.
fn ready_student(conn: &rusqlite::Connection, name: &str, email: &str, class_list: &[&str]) -> UserProfile {
    let user = profile_ops::sign_up(conn, name, email).unwrap();
    profile_ops::complete_setup(conn, &user.id, name, email, None, &classes(class_list), AvailabilityGrid::new())
        .unwrap()
}

fn setup() -> (rusqlite::Connection, UserProfile) {
    let conn = schema::test_connection();
    let jane = ready_student(&conn, "Jane Smith", "jane@school.edu", &["CS142", "MATH112"]);
    (conn, jane)
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn form<'a>(name: &'a str) -> HerdForm<'a> {
    HerdForm {
        name,
        class_code: "CS142",
        location: "HBLL Library",
        date: Some(monday()),
        start_time: Some("14:00"),
        end_time: Some("16:00"),
        ..Default::default()
    }
}

// ==========================================================================
// PROFILE OPS TESTS
// ==========================================================================

#[test]
fn sign_up_creates_incomplete_profile() {
    let conn = schema::test_connection();
    let user = profile_ops::sign_up(&conn, "  Ann Lee ", "ann@school.edu").unwrap();
    assert_eq!(user.name, "Ann Lee");
    assert!(!user.profile_setup);
}

#[test]
fn set_photo_url_trims_and_clears() {
    let conn = schema::test_connection();
    let user = profile_ops::sign_up(&conn, "Ann Lee", "ann@school.edu").unwrap();

    let updated = profile_ops::set_photo_url(&conn, &user.id, Some("  https://img.example/ann.png ")).unwrap();
    assert_eq!(updated.photo_url.as_deref(), Some("https://img.example/ann.png"));

    let cleared = profile_ops::set_photo_url(&conn, &user.id, Some("   ")).unwrap();
    assert_eq!(cleared.photo_url, None);
    let stored = user_repo::find_by_id(&conn, &user.id).unwrap().unwrap();
    assert_eq!(stored.photo_url, None);
}

#[test]
fn sign_up_rejects_blank_name() {
    let conn = schema::test_connection();
    let result = profile_ops::sign_up(&conn, "   ", "ann@school.edu");
    assert!(matches!(result, Err(HerdError::BlankField { .. })));
}

#[test]
fn sign_up_rejects_taken_email() {
    let (conn, _) = setup();
    let result = profile_ops::sign_up(&conn, "Impostor", "JANE@school.edu");
    assert!(matches!(result, Err(HerdError::AlreadyExists { .. })));
}

#[test]
fn sign_in_finds_account_by_email() {
    let (conn, jane) = setup();
    let user = profile_ops::sign_in(&conn, "jane@school.edu").unwrap();
    assert_eq!(user.id, jane.id);
    assert!(matches!(
        profile_ops::sign_in(&conn, "nobody@school.edu"),
        Err(HerdError::NotFound { .. })
    ));
}

#[test]
fn complete_setup_marks_profile_ready() {
    let (_, jane) = setup();
    assert!(jane.profile_setup);
    assert_eq!(jane.classes, classes(&["CS142", "MATH112"]));
}

#[test]
fn complete_setup_requires_a_class() {
    let conn = schema::test_connection();
    let user = profile_ops::sign_up(&conn, "Ann", "ann@school.edu").unwrap();
    let result = profile_ops::complete_setup(&conn, &user.id, "Ann", "ann@school.edu", None, &[], AvailabilityGrid::new());
    assert!(matches!(result, Err(HerdError::EmptySet { .. })));

    let stored = user_repo::find_by_id(&conn, &user.id).unwrap().unwrap();
    assert!(!stored.profile_setup);
}

#[test]
fn complete_setup_rejects_unknown_class() {
    let conn = schema::test_connection();
    let user = profile_ops::sign_up(&conn, "Ann", "ann@school.edu").unwrap();
    let result = profile_ops::complete_setup(
        &conn, &user.id, "Ann", "ann@school.edu", None, &classes(&["CS999"]), AvailabilityGrid::new(),
    );
    assert!(matches!(result, Err(HerdError::UnknownClass { code }) if code == "CS999"));
}

#[test]
fn complete_setup_normalizes_classes() {
    let conn = schema::test_connection();
    let user = profile_ops::sign_up(&conn, "Ann", "ann@school.edu").unwrap();
    let ready = profile_ops::complete_setup(
        &conn, &user.id, "Ann", "ann@school.edu", Some("  "), &classes(&["cs142", " CS142", "stat121"]), AvailabilityGrid::new(),
    )
    .unwrap();
    assert_eq!(ready.classes, classes(&["CS142", "STAT121"]));
    assert!(ready.phone.is_none());
}

#[test]
fn update_availability_persists() {
    let (conn, jane) = setup();
    let grid = AvailabilityGrid::from_keys(["Tue-10AM", "Tue-11AM"]);
    profile_ops::update_availability(&conn, &jane.id, grid.clone()).unwrap();

    let stored = user_repo::find_by_id(&conn, &jane.id).unwrap().unwrap();
    assert_eq!(stored.availability, grid);
}

#[test]
fn update_classes_requires_one_class() {
    let (conn, jane) = setup();
    assert!(profile_ops::update_classes(&conn, &jane.id, &[]).is_err());
    let updated = profile_ops::update_classes(&conn, &jane.id, &classes(&["WRTG150"])).unwrap();
    assert_eq!(updated.classes, classes(&["WRTG150"]));
}

// ==========================================================================
// HERD OPS TESTS
// ==========================================================================

#[test]
fn create_herd_formats_times_for_display() {
    let (conn, jane) = setup();
    let herd = herd_ops::create_herd(&conn, &jane.id, &form("Late Night CS")).unwrap();

    assert_eq!(herd.schedule.start_time.as_deref(), Some("2:00 PM"));
    assert_eq!(herd.schedule.end_time.as_deref(), Some("4:00 PM"));
    assert_eq!(herd.class_code.as_deref(), Some("CS142"));
    assert_eq!(herd.members, vec![jane.id.clone()]);

    let stored = herd_repo::find_by_id(&conn, &herd.id).unwrap().unwrap();
    assert_eq!(stored.schedule, herd.schedule);
}

#[test]
fn create_herd_without_times() {
    let (conn, jane) = setup();
    let mut f = form("Drop-in Study");
    f.start_time = None;
    f.end_time = Some("   ");
    let herd = herd_ops::create_herd(&conn, &jane.id, &f).unwrap();
    assert!(herd.schedule.start_time.is_none());
    assert!(herd.schedule.end_time.is_none());
}

#[test]
fn create_herd_requires_class_name_location_and_date() {
    let (conn, jane) = setup();

    let mut f = form("Herd");
    f.class_code = "";
    assert!(matches!(herd_ops::create_herd(&conn, &jane.id, &f), Err(HerdError::BlankField { field }) if field == "class"));

    let f = form("  ");
    assert!(matches!(herd_ops::create_herd(&conn, &jane.id, &f), Err(HerdError::BlankField { field }) if field == "name"));

    let mut f = form("Herd");
    f.location = "";
    assert!(matches!(herd_ops::create_herd(&conn, &jane.id, &f), Err(HerdError::BlankField { field }) if field == "location"));

    let mut f = form("Herd");
    f.date = None;
    assert!(matches!(herd_ops::create_herd(&conn, &jane.id, &f), Err(HerdError::BlankField { field }) if field == "date"));

    assert!(herd_repo::find_active(&conn).unwrap().is_empty());
}

#[test]
fn create_herd_rejects_end_before_start() {
    let (conn, jane) = setup();
    let mut f = form("Backwards");
    f.start_time = Some("4:00 PM");
    f.end_time = Some("14:00");
    assert!(matches!(herd_ops::create_herd(&conn, &jane.id, &f), Err(HerdError::EndBeforeStart)));
}

#[test]
fn create_herd_rejects_bad_time() {
    let (conn, jane) = setup();
    let mut f = form("Whenever");
    f.start_time = Some("noonish");
    assert!(matches!(herd_ops::create_herd(&conn, &jane.id, &f), Err(HerdError::InvalidTime { .. })));
}

#[test]
fn create_herd_rejects_unknown_class() {
    let (conn, jane) = setup();
    let mut f = form("Mystery");
    f.class_code = "ZZZ100";
    assert!(matches!(herd_ops::create_herd(&conn, &jane.id, &f), Err(HerdError::UnknownClass { .. })));
}

#[test]
fn edit_herd_only_by_creator() {
    let (conn, jane) = setup();
    let bob = ready_student(&conn, "Bob Lee", "bob@school.edu", &["CS142"]);
    let herd = herd_ops::create_herd(&conn, &jane.id, &form("Late Night CS")).unwrap();

    let mut f = form("Renamed");
    f.style = GrazingStyle::Casual;
    assert!(matches!(
        herd_ops::edit_herd(&conn, &bob.id, &herd.id, &f),
        Err(HerdError::NotHerdCreator)
    ));

    let edited = herd_ops::edit_herd(&conn, &jane.id, &herd.id, &f).unwrap();
    assert_eq!(edited.name, "Renamed");
    assert_eq!(edited.style, GrazingStyle::Casual);
    assert_eq!(edited.members, herd.members);
}

#[test]
fn join_herd_adds_member_once() {
    let (conn, jane) = setup();
    let bob = ready_student(&conn, "Bob Lee", "bob@school.edu", &["CS142"]);
    let herd = herd_ops::create_herd(&conn, &jane.id, &form("Late Night CS")).unwrap();

    let joined = herd_ops::join_herd(&conn, &bob.id, &herd.id).unwrap();
    assert_eq!(joined.member_count(), 2);
    let again = herd_ops::join_herd(&conn, &bob.id, &herd.id).unwrap();
    assert_eq!(again.member_count(), 2);
    assert_eq!(herd_repo::count_members(&conn, &herd.id).unwrap(), 2);
}

#[test]
fn join_missing_herd_fails() {
    let (conn, jane) = setup();
    let result = herd_ops::join_herd(&conn, &jane.id, &Id::new("missing"));
    assert!(matches!(result, Err(HerdError::NotFound { .. })));
}

// ==========================================================================
// FRIEND OPS TESTS
// ==========================================================================

#[test]
fn send_and_accept_request() {
    let (conn, jane) = setup();
    let bob = ready_student(&conn, "Bob Lee", "bob@school.edu", &["CS142"]);

    let request = friend_ops::send_request(&conn, &jane.id, &bob.id).unwrap();
    assert!(request.is_pending());

    let accepted = friend_ops::accept_request(&conn, &bob.id, &jane.id).unwrap();
    assert_eq!(accepted.status, RequestStatus::Accepted);

    let jane = user_repo::find_by_id(&conn, &jane.id).unwrap().unwrap();
    let bob = user_repo::find_by_id(&conn, &bob.id).unwrap().unwrap();
    assert!(jane.is_friend(&bob.id));
    assert!(bob.is_friend(&jane.id));
}

#[test]
fn failed_accept_leaves_request_pending() {
    let (conn, jane) = setup();
    let bob = ready_student(&conn, "Bob Lee", "bob@school.edu", &["CS142"]);
    friend_ops::send_request(&conn, &jane.id, &bob.id).unwrap();

    conn.execute_batch(
        "CREATE TEMP TRIGGER reject_friendship BEFORE INSERT ON friendships
         BEGIN SELECT RAISE(ABORT, 'friendships locked'); END;",
    )
    .unwrap();
    assert!(friend_ops::accept_request(&conn, &bob.id, &jane.id).is_err());

    let request = request_repo::find_between(&conn, &jane.id, &bob.id).unwrap().unwrap();
    assert!(request.is_pending());

    conn.execute_batch("DROP TRIGGER reject_friendship;").unwrap();
    friend_ops::accept_request(&conn, &bob.id, &jane.id).unwrap();
    let bob = user_repo::find_by_id(&conn, &bob.id).unwrap().unwrap();
    assert!(bob.is_friend(&jane.id));
}

#[test]
fn decline_request_leaves_users_unconnected() {
    let (conn, jane) = setup();
    let bob = ready_student(&conn, "Bob Lee", "bob@school.edu", &["CS142"]);
    friend_ops::send_request(&conn, &jane.id, &bob.id).unwrap();

    let declined = friend_ops::decline_request(&conn, &bob.id, &jane.id).unwrap();
    assert_eq!(declined.status, RequestStatus::Declined);
    let bob = user_repo::find_by_id(&conn, &bob.id).unwrap().unwrap();
    assert!(bob.friends.is_empty());

    // Declined requests can't be accepted later
    assert!(friend_ops::accept_request(&conn, &bob.id, &jane.id).is_err());
}

#[test]
fn send_request_to_self_fails() {
    let (conn, jane) = setup();
    assert!(matches!(
        friend_ops::send_request(&conn, &jane.id, &jane.id),
        Err(HerdError::SelfRequest)
    ));
}

#[test]
fn duplicate_pending_request_fails() {
    let (conn, jane) = setup();
    let bob = ready_student(&conn, "Bob Lee", "bob@school.edu", &["CS142"]);
    friend_ops::send_request(&conn, &jane.id, &bob.id).unwrap();
    assert!(matches!(
        friend_ops::send_request(&conn, &jane.id, &bob.id),
        Err(HerdError::AlreadyExists { .. })
    ));
}

#[test]
fn crossing_request_accepts_the_incoming_one() {
    let (conn, jane) = setup();
    let bob = ready_student(&conn, "Bob Lee", "bob@school.edu", &["CS142"]);
    friend_ops::send_request(&conn, &bob.id, &jane.id).unwrap();

    let result = friend_ops::send_request(&conn, &jane.id, &bob.id).unwrap();
    assert_eq!(result.status, RequestStatus::Accepted);
    assert_eq!(result.from, bob.id);

    let jane = user_repo::find_by_id(&conn, &jane.id).unwrap().unwrap();
    assert!(jane.is_friend(&bob.id));
}

#[test]
fn request_to_friend_fails() {
    let (conn, jane) = setup();
    let bob = ready_student(&conn, "Bob Lee", "bob@school.edu", &["CS142"]);
    friend_ops::send_request(&conn, &jane.id, &bob.id).unwrap();
    friend_ops::accept_request(&conn, &bob.id, &jane.id).unwrap();

    assert!(matches!(
        friend_ops::send_request(&conn, &jane.id, &bob.id),
        Err(HerdError::AlreadyFriends { .. })
    ));
}
