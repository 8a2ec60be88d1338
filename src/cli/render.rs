use crate::avatar::{self, Palette};
use crate::classes;
use crate::model::*;
use crate::overlap::{CellState, OverlapGrid};

/// `"[JS #4A7C59] Jane Smith"`: initials and avatar colour, then the name.
pub fn avatar_line(user: &UserProfile, palette: &Palette) -> String {
    format!(
        "[{} {}] {}",
        avatar::initials_for(&user.name),
        avatar::color_for(user.id.as_str(), palette),
        user.name
    )
}

pub fn class_labels(codes: &[String]) -> String {
    codes
        .iter()
        .map(|c| classes::format_label(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_header() {
    print!("{:>7}", "");
    for day in DAYS {
        print!(" {:>4}", day);
    }
    println!();
}

/// Draws a grid with one cell per slot, `cell` picking each marker.
fn print_grid(cell: impl Fn(WeeklyTimeSlot) -> &'static str) {
    print_header();
    for (row, label) in TIMES.iter().enumerate() {
        print!("{:>7}", label);
        for day in Day::ALL {
            let marker = WeeklyTimeSlot::new(day, FIRST_HOUR + row as u8).map_or(" ", &cell);
            print!(" {:>4}", marker);
        }
        println!();
    }
}

pub fn print_availability(grid: &AvailabilityGrid) {
    print_grid(|slot| if grid.is_free(slot) { "#" } else { "." });
    println!("  # free   . busy   ({} free slots)", grid.free_count());
}

pub fn print_overlap(grid: &OverlapGrid, their_name: &str) {
    print_grid(|slot| match grid.get(&slot) {
        Some(CellState::Both) => "**",
        Some(CellState::MineOnly) => "me",
        Some(CellState::TheirsOnly) => "th",
        _ => ".",
    });
    println!("  ** both free   me only you   th only {}   . neither", their_name);
}

pub fn herd_summary(herd: &Herd) -> String {
    let class = herd
        .class_code
        .as_deref()
        .map(classes::format_label)
        .unwrap_or_else(|| "Any class".into());
    let date = herd
        .schedule
        .date
        .map(|d| d.format("%a %b %-d").to_string())
        .unwrap_or_else(|| "no date".into());
    let time = match (herd.schedule.start(), herd.schedule.end()) {
        (Some(start), Some(end)) => format!(" {} - {}", start, end),
        (Some(start), None) => format!(" {}", start),
        _ => String::new(),
    };
    let closed = if herd.visibility == Visibility::Closed { " [closed]" } else { "" };
    format!(
        "{} ({}) @ {} | {}{} | {} | {} members{}",
        herd.name,
        class,
        herd.location,
        date,
        time,
        herd.style.display_name(),
        herd.member_count(),
        closed
    )
}
