use chrono::NaiveDate;
use herd::avatar::{self, CAMPUS_BLUE, EARTH_TONE};
use herd::classes;
use herd::model::*;
use herd::overlap::{self, CellState};
use herd::ranking;
use herd::session::{self, SessionState};
use proptest::prelude::*;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

fn herd_at(name: &str, start: &str, end: &str) -> Herd {
    let creator = UserProfile::create("Creator".into(), "creator@school.edu".into());
    Herd::create(name.into(), "JFSB".into(), &creator, Schedule::new(monday(), start, end))
}

fn grid_strategy() -> impl Strategy<Value = AvailabilityGrid> {
    prop::collection::vec(any::<bool>(), 98).prop_map(|bits| {
        WeeklyTimeSlot::all()
            .zip(bits)
            .filter(|(_, free)| *free)
            .map(|(slot, _)| slot)
            .collect()
    })
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

// ==========================================================================
// OVERLAP PROPERTIES
// ==========================================================================

proptest! {
    #[test]
    fn overlap_grid_always_covers_every_slot(a in grid_strategy(), b in grid_strategy()) {
        let grid = overlap::classify_overlap(&a, &b);
        prop_assert_eq!(grid.len(), 98);
        prop_assert!(WeeklyTimeSlot::all().all(|s| grid.contains_key(&s)));
    }

    #[test]
    fn overlap_count_is_symmetric(a in grid_strategy(), b in grid_strategy()) {
        prop_assert_eq!(overlap::count_overlap(&a, &b), overlap::count_overlap(&b, &a));
    }

    #[test]
    fn overlap_count_matches_both_cells(a in grid_strategy(), b in grid_strategy()) {
        let both = overlap::classify_overlap(&a, &b)
            .values()
            .filter(|c| **c == CellState::Both)
            .count();
        prop_assert_eq!(overlap::count_overlap(&a, &b), both);
        prop_assert!(both <= a.free_count().min(b.free_count()));
    }

    #[test]
    fn score_never_panics_on_arbitrary_times(start in ".{0,12}", end in ".{0,12}", grid in grid_strategy()) {
        let herd = herd_at("Fuzz", &start, &end);
        let score = ranking::score_herd(&grid, &herd.schedule);
        prop_assert!(score <= 14);
    }
}

#[test]
fn empty_grids_still_classify_every_slot() {
    let grid = overlap::classify_overlap(&AvailabilityGrid::new(), &AvailabilityGrid::new());
    assert_eq!(grid.len(), 98);
    assert!(grid.values().all(|c| *c == CellState::Neither));
}

// ==========================================================================
// RANKING
// ==========================================================================

#[test]
fn ranking_keeps_input_order_for_ties() {
    let mine = AvailabilityGrid::from_keys(["Mon-8AM", "Mon-9AM", "Mon-10AM", "Mon-11AM", "Mon-12PM"]);
    let h1 = herd_at("H1", "8:00 AM", "10:00 AM");
    let h2 = herd_at("H2", "9:00 AM", "11:00 AM");
    let h3 = herd_at("H3", "8:00 AM", "1:00 PM");

    let ranked = ranking::rank_herds(&mine, vec![h1, h2, h3]);
    let names: Vec<&str> = ranked.iter().map(|r| r.herd.name.as_str()).collect();
    let scores: Vec<u32> = ranked.iter().map(|r| r.score).collect();
    assert_eq!(names, vec!["H3", "H1", "H2"]);
    assert_eq!(scores, vec![5, 2, 2]);
}

#[test]
fn ranking_scores_free_hours_inside_the_herd() {
    let mine = AvailabilityGrid::from_keys(["Mon-2PM", "Mon-3PM"]);
    assert_eq!(ranking::score_herd(&mine, &herd_at("A", "2:00 PM", "4:00 PM").schedule), 2);
    assert_eq!(ranking::score_herd(&mine, &herd_at("B", "9:00 AM", "10:00 AM").schedule), 0);
}

#[test]
fn malformed_time_falls_back_to_noon() {
    let mine = AvailabilityGrid::from_keys(["Mon-12PM"]);
    // "garbage" reads as 12, so the herd covers the 12 PM hour only
    let score = ranking::score_herd(&mine, &herd_at("Odd", "garbage", "1:00 PM").schedule);
    assert_eq!(score, 1);
}

#[test]
fn herd_without_schedule_scores_zero() {
    let mine = AvailabilityGrid::from_keys(["Mon-12PM"]);
    assert_eq!(ranking::score_herd(&mine, &Schedule::default()), 0);
}

// ==========================================================================
// CLASSES
// ==========================================================================

#[test]
fn label_formatting_examples() {
    assert_eq!(classes::format_label("CS142"), "CS 142");
    assert_eq!(classes::format_label("REL121"), "REL 121");
    assert_eq!(classes::format_label("already formatted"), "already formatted");
}

#[test]
fn shared_classes_follow_second_list() {
    let shared = classes::shared_classes(&codes(&["CS142", "MATH112"]), &codes(&["MATH112", "CS142", "BIO100"]));
    assert_eq!(shared, codes(&["MATH112", "CS142"]));
}

#[test]
fn shared_classes_collapse_duplicates() {
    let shared = classes::shared_classes(&codes(&["CS142"]), &codes(&["CS142", "CS142"]));
    assert_eq!(shared, codes(&["CS142"]));
}

// ==========================================================================
// AVATARS
// ==========================================================================

#[test]
fn color_is_deterministic() {
    let first = avatar::color_for("uidABC", &CAMPUS_BLUE);
    let second = avatar::color_for("uidABC", &CAMPUS_BLUE);
    assert_eq!(first, second);
    assert!(CAMPUS_BLUE.colors().contains(&first));
    assert!(EARTH_TONE.colors().contains(&avatar::color_for("uidABC", &EARTH_TONE)));
}

#[test]
fn color_for_empty_identifier_is_first_color() {
    assert_eq!(avatar::color_for("", &EARTH_TONE), EARTH_TONE.colors()[0]);
}

#[test]
fn initials_examples() {
    assert_eq!(avatar::initials_for("jane smith"), "JS");
    assert_eq!(avatar::initials_for("Ana Maria Lopez"), "AM");
    assert_eq!(avatar::initials_for("   "), "");
}

// ==========================================================================
// SESSION
// ==========================================================================

#[test]
fn session_moves_through_states() {
    let mut profile = UserProfile::create("Ann".into(), "ann@school.edu".into());
    let auth = profile.auth_user();

    assert_eq!(session::classify(None, Some(&profile)), SessionState::Unauthenticated);
    assert_eq!(session::classify(Some(&auth), None), SessionState::ProfileIncomplete);
    assert_eq!(session::classify(Some(&auth), Some(&profile)), SessionState::ProfileIncomplete);
    profile.profile_setup = true;
    assert_eq!(session::classify(Some(&auth), Some(&profile)), SessionState::Ready);
}
