use crate::avatar::EARTH_TONE;
use crate::classes;
use crate::cli::context::CLIContext;
use crate::cli::render;
use crate::model::*;
use crate::ops::*;
use crate::session::SessionState;

pub fn signup(ctx: &mut CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Name: ") {
            Some(s) if !s.is_empty() => s,
            _ => { println!("Name cannot be empty."); return; }
        }
    };
    let email = ctx.prompt("Email: ").unwrap_or_default();

    match profile_ops::sign_up(&ctx.conn, &name, &email) {
        Ok(user) => {
            println!("Welcome to the herd, {}!", user.name);
            println!("Run 'setup' to pick your classes and availability.");
            ctx.sign_in(user);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn login(ctx: &mut CLIContext, args: &str) {
    let email = if !args.is_empty() {
        args.to_string()
    } else {
        ctx.prompt("Email: ").unwrap_or_default()
    };

    match profile_ops::sign_in(&ctx.conn, &email) {
        Ok(user) => {
            println!("Signed in as {}.", user.name);
            ctx.sign_in(user);
            if ctx.session_state() == SessionState::ProfileIncomplete {
                println!("Your profile isn't finished yet. Run 'setup'.");
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn logout(ctx: &mut CLIContext) {
    if ctx.session_state() == SessionState::Unauthenticated {
        println!("Not signed in.");
        return;
    }
    ctx.sign_out();
    println!("Signed out.");
}

/// The profile setup wizard: contact details, classes, then availability.
pub fn setup(ctx: &mut CLIContext) {
    let Some(user) = ctx.signed_in().cloned() else { return };

    println!("Profile setup");
    println!();

    let name = prompt_with_default(ctx, "Name", &user.name);
    let email = prompt_with_default(ctx, "Email", &user.email);
    let phone = prompt_with_default(ctx, "Phone (optional)", user.phone.as_deref().unwrap_or(""));

    let Some(classes) = pick_classes(ctx, &user.classes) else { return };

    let mut availability = user.availability.clone();
    edit_availability(ctx, &mut availability);

    let phone_opt = if phone.is_empty() { None } else { Some(phone.as_str()) };
    match profile_ops::complete_setup(&ctx.conn, &user.id, &name, &email, phone_opt, &classes, availability) {
        Ok(updated) => {
            println!(
                "Profile saved: {} classes, {} free slots. Type 'pasture' to find a herd.",
                updated.classes.len(),
                updated.availability.free_count()
            );
            ctx.sign_in(updated);
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show_profile(ctx: &CLIContext) {
    let Some(user) = ctx.signed_in() else { return };

    println!();
    println!("{}", render::avatar_line(user, &EARTH_TONE));
    println!("Email: {}", user.email);
    println!("Phone: {}", user.phone.as_deref().unwrap_or("(none)"));
    println!("Photo: {}", user.photo_url.as_deref().unwrap_or("(none)"));
    if user.classes.is_empty() {
        println!("Classes: (none)");
    } else {
        println!("Classes:");
        for code in &user.classes {
            println!("  {}", classes::display_name(code));
        }
    }
    println!("Friends: {}", user.friends.len());
    println!("Profile complete: {}", if user.profile_setup { "yes" } else { "no" });
    println!();
    render::print_availability(&user.availability);
    println!();
}

/// Sets the profile photo URL, or clears it when given nothing.
pub fn photo(ctx: &mut CLIContext, args: &str) {
    let Some(user) = ctx.signed_in().cloned() else { return };
    let url = if args.is_empty() {
        match ctx.prompt("Photo URL (blank to clear): ") {
            Some(u) => u,
            None => return,
        }
    } else {
        args.to_string()
    };

    match profile_ops::set_photo_url(&ctx.conn, &user.id, Some(&url)) {
        Ok(updated) if updated.photo_url.is_some() => {
            println!("Photo updated.");
            ctx.refresh();
        }
        Ok(_) => {
            println!("Photo removed.");
            ctx.refresh();
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit_classes(ctx: &mut CLIContext) {
    let Some(user) = ctx.signed_in().cloned() else { return };
    let Some(classes) = pick_classes(ctx, &user.classes) else { return };

    match profile_ops::update_classes(&ctx.conn, &user.id, &classes) {
        Ok(_) => {
            println!("Classes updated.");
            ctx.refresh();
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit_availability_command(ctx: &mut CLIContext) {
    let Some(user) = ctx.signed_in().cloned() else { return };
    let mut availability = user.availability.clone();
    edit_availability(ctx, &mut availability);

    match profile_ops::update_availability(&ctx.conn, &user.id, availability) {
        Ok(updated) => {
            println!("Availability saved ({} free slots).", updated.availability.free_count());
            ctx.refresh();
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn catalog(args: &str) {
    let matches = classes::search_catalog(args);
    if matches.is_empty() {
        println!("No classes match '{}'.", args.trim());
        return;
    }
    for class in matches {
        println!("  {:<8} {}", class.code, class.name);
    }
}

fn prompt_with_default(ctx: &CLIContext, label: &str, current: &str) -> String {
    match ctx.prompt(&format!("{} [{}]: ", label, current)) {
        Some(s) if !s.is_empty() => s,
        _ => current.to_string(),
    }
}

/// Prompts for class codes. Enter keeps `current`; `?term` searches the
/// catalog first.
fn pick_classes(ctx: &CLIContext, current: &[String]) -> Option<Vec<String>> {
    loop {
        let shown = if current.is_empty() { "none".to_string() } else { render::class_labels(current) };
        let input = ctx.prompt(&format!("Classes, e.g. CS142 MATH112 ('?term' to search) [{}]: ", shown))?;
        if input.is_empty() {
            return Some(current.to_vec());
        }
        if let Some(term) = input.strip_prefix('?') {
            catalog(term);
            continue;
        }
        let codes: Vec<String> = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_uppercase())
            .collect();
        let unknown: Vec<&String> = codes.iter().filter(|c| !classes::is_known(c)).collect();
        if !unknown.is_empty() {
            for code in unknown {
                println!("Unknown class: {}", code);
            }
            continue;
        }
        return Some(codes);
    }
}

/// Toggles slots interactively until an empty line.
fn edit_availability(ctx: &CLIContext, grid: &mut AvailabilityGrid) {
    println!();
    println!("Availability: enter slots to toggle, e.g. 'Mon-2PM Tue-10AM', or 'Wed' for a whole day.");
    println!("Press Enter when done.");
    loop {
        render::print_availability(grid);
        let input = match ctx.prompt("Toggle: ") {
            Some(s) if s.is_empty() => break,
            Some(s) => s,
            None => break,
        };

        for token in input.split_whitespace() {
            if let Some(slot) = WeeklyTimeSlot::parse_key(token) {
                grid.toggle(slot);
            } else if let Some(day) = Day::from_short_name(token) {
                let day_slots: Vec<WeeklyTimeSlot> =
                    WeeklyTimeSlot::all().filter(|s| s.day() == day).collect();
                let all_free = day_slots.iter().all(|s| grid.is_free(*s));
                for slot in day_slots {
                    grid.set_free(slot, !all_free);
                }
            } else {
                println!("Unrecognised slot '{}'", token);
            }
        }
    }
}
