use chrono::NaiveDate;

use crate::avatar::EARTH_TONE;
use crate::cli::context::CLIContext;
use crate::cli::render;
use crate::model::*;
use crate::ops::herd_ops::{self, HerdForm, LOCATION_QUICK_PICKS};
use crate::queries::*;

/// Recommended herds plus everything happening on one day.
pub fn pasture(ctx: &CLIContext, args: &str) {
    let Some(user) = ctx.ready() else { return };
    let date = if args.is_empty() {
        CLIContext::today()
    } else {
        match CLIContext::parse_date(args) {
            Some(d) => d,
            None => return,
        }
    };

    match herd_queries::recommended_herds(&ctx.conn, user) {
        Ok(ranked) if !ranked.is_empty() => {
            println!("Recommended for you:");
            for r in &ranked {
                if r.herd.schedule.is_complete() {
                    println!("  {:>2} free hrs  {}", r.score, render::herd_summary(&r.herd));
                } else {
                    println!("   no time set  {}", render::herd_summary(&r.herd));
                }
            }
            println!();
        }
        Ok(_) => {}
        Err(e) => ctx.print_error(&e),
    }

    println!("Herds on {}:", date.format("%A, %B %-d"));
    match herd_queries::herds_on_date(&ctx.conn, date) {
        Ok(herds) if herds.is_empty() => println!("  No herds grazing today."),
        Ok(herds) => {
            for herd in &herds {
                println!("  {}", render::herd_summary(herd));
            }
        }
        Err(e) => ctx.print_error(&e),
    }

    match herd_queries::nearby_herds(&ctx.conn, date) {
        Ok(nearby) if nearby.is_empty() => {}
        Ok(nearby) => {
            println!();
            println!("Other days:");
            for herd in &nearby {
                println!("  {}", render::herd_summary(herd));
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn my_herds(ctx: &CLIContext) {
    let Some(user) = ctx.ready() else { return };
    let herds = match herd_queries::my_herds(&ctx.conn, user) {
        Ok(h) => h,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };
    if herds.is_empty() {
        println!("You're not in any herds yet. Try 'pasture' or 'create-herd'.");
        return;
    }
    println!("Your herds ({}):", herds.len());
    for herd in &herds {
        let role = if herd.is_creator(&user.id) { " (leader)" } else { "" };
        println!("  {}{}", render::herd_summary(herd), role);
        let members = herd_queries::herd_members(&ctx.conn, herd).unwrap_or_default();
        let stack: Vec<String> = members
            .iter()
            .map(|m| render::avatar_line(m, &EARTH_TONE))
            .collect();
        if !stack.is_empty() {
            println!("      {}", stack.join("  "));
        }
    }
}

/// The map view, optionally filtered by grazing style.
pub fn roam(ctx: &CLIContext, args: &str) {
    let Some(user) = ctx.ready() else { return };
    let style = if args.is_empty() {
        None
    } else {
        match GrazingStyle::from_db_str(&args.to_lowercase()) {
            Some(s) => Some(s),
            None => {
                println!("Unknown style '{}'. Use quiet, casual or stampede.", args);
                return;
            }
        }
    };
    print_roam(ctx, user, style, None);
}

pub fn search(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: search <term>");
        return;
    }
    let Some(user) = ctx.ready() else { return };
    print_roam(ctx, user, None, Some(args));
}

fn print_roam(ctx: &CLIContext, user: &UserProfile, style: Option<GrazingStyle>, term: Option<&str>) {
    match herd_queries::roam_herds(&ctx.conn, user, style, term) {
        Ok(herds) if herds.is_empty() => println!("No herds found."),
        Ok(herds) => {
            println!("{} herds roaming:", herds.len());
            for herd in &herds {
                println!("  {}", render::herd_summary(herd));
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn create(ctx: &CLIContext) {
    let Some(user) = ctx.ready() else { return };

    println!("Your classes: {}", render::class_labels(&user.classes));
    let Some(inputs) = prompt_form(ctx, None) else { return };

    match herd_ops::create_herd(&ctx.conn, &user.id, &inputs.form()) {
        Ok(herd) => println!("Herd created: {}", render::herd_summary(&herd)),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn edit(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: edit-herd <name>");
        return;
    }
    let Some(user) = ctx.ready() else { return };
    let Some(herd) = ctx.find_herd(user, args) else { return };
    if !herd.is_creator(&user.id) {
        println!("Only {} can edit this herd.", herd.creator_name);
        return;
    }

    println!("Editing herd: {}", herd.name);
    let Some(inputs) = prompt_form(ctx, Some(&herd)) else { return };

    match herd_ops::edit_herd(&ctx.conn, &user.id, &herd.id, &inputs.form()) {
        Ok(updated) => println!("Herd updated: {}", render::herd_summary(&updated)),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn join(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: join <herd>");
        return;
    }
    let Some(user) = ctx.ready() else { return };
    let Some(herd) = ctx.find_herd(user, args) else { return };
    if herd.is_member(&user.id) {
        println!("You're already in {}.", herd.name);
        return;
    }

    match herd_ops::join_herd(&ctx.conn, &user.id, &herd.id) {
        Ok(joined) => println!("Joined {} ({} members).", joined.name, joined.member_count()),
        Err(e) => ctx.print_error(&e),
    }
}

/// Raw answers to the herd form, owned so the borrowed [`HerdForm`] can be
/// built from them.
struct FormInputs {
    name: String,
    class_code: String,
    location: String,
    style: GrazingStyle,
    visibility: Visibility,
    date: Option<NaiveDate>,
    start_time: String,
    end_time: String,
}

impl FormInputs {
    fn form(&self) -> HerdForm<'_> {
        HerdForm {
            name: &self.name,
            class_code: &self.class_code,
            location: &self.location,
            style: self.style,
            visibility: self.visibility,
            date: self.date,
            start_time: non_empty(&self.start_time),
            end_time: non_empty(&self.end_time),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() { None } else { Some(s) }
}

fn prompt_form(ctx: &CLIContext, current: Option<&Herd>) -> Option<FormInputs> {
    let ask = |label: &str, default: &str| -> Option<String> {
        let input = ctx.prompt(&format!("{} [{}]: ", label, default))?;
        Some(if input.is_empty() { default.to_string() } else { input })
    };

    let class_code = ask("Class", current.and_then(|h| h.class_code.as_deref()).unwrap_or(""))?;
    let name = ask("Herd name", current.map_or("", |h| h.name.as_str()))?;

    println!("Quick picks: {}", LOCATION_QUICK_PICKS.join(", "));
    let location = ask("Location", current.map_or("", |h| h.location.as_str()))?;

    let date_default = current
        .and_then(|h| h.schedule.date)
        .unwrap_or_else(CLIContext::today)
        .to_string();
    let date = CLIContext::parse_date(&ask("Date (YYYY-MM-DD)", &date_default)?);

    let start_time = ask(
        "Start time (e.g. 14:00)",
        current.and_then(|h| h.schedule.start_time.as_deref()).unwrap_or(""),
    )?;
    let end_time = ask(
        "End time",
        current.and_then(|h| h.schedule.end_time.as_deref()).unwrap_or(""),
    )?;

    for style in GrazingStyle::ALL {
        println!("  {:<8} {}", style.to_db_str(), style.description());
    }
    let current_style = current.map(|h| h.style).unwrap_or_default();
    let style_input = ask("Grazing style", current_style.to_db_str())?;
    let style = GrazingStyle::from_db_str(&style_input.to_lowercase()).unwrap_or(current_style);

    let current_visibility = current.map(|h| h.visibility).unwrap_or_default();
    let visibility_input = ask("Visibility (open/closed)", current_visibility.to_db_str())?;
    let visibility = Visibility::from_db_str(&visibility_input.to_lowercase()).unwrap_or(current_visibility);

    Some(FormInputs {
        name,
        class_code,
        location,
        style,
        visibility,
        date,
        start_time,
        end_time,
    })
}
