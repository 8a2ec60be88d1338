use crate::avatar::{CAMPUS_BLUE, EARTH_TONE};
use crate::cli::context::CLIContext;
use crate::cli::render;
use crate::ops::*;
use crate::queries::friend_queries::Relation;
use crate::queries::*;

/// Classmates sharing at least one class, most shared first.
pub fn discover(ctx: &CLIContext, args: &str) {
    let Some(user) = ctx.ready() else { return };
    let filter = if args.is_empty() { None } else { Some(args) };

    let classmates = match classmate_queries::classmates(&ctx.conn, user, filter) {
        Ok(c) => c,
        Err(e) => { ctx.print_error(&e); return; }
    };
    if classmates.is_empty() {
        println!("No classmates found yet.");
        return;
    }

    println!("Classmates ({}):", classmates.len());
    for classmate in &classmates {
        let relation = friend_queries::relation(&ctx.conn, user, &classmate.profile.id)
            .unwrap_or(Relation::NotConnected);
        let action = match relation {
            Relation::Friends => "friends",
            Relation::PendingSent => "request sent",
            Relation::PendingReceived => "wants to be friends ('accept')",
            Relation::NotConnected => "'add-friend' to connect",
        };
        println!("  {}", render::avatar_line(&classmate.profile, &CAMPUS_BLUE));
        println!(
            "      {} shared: {} | {}",
            classmate.shared_classes.len(),
            render::class_labels(&classmate.shared_classes),
            action
        );
    }
}

/// Side-by-side availability with another student.
pub fn compare(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: compare <name>");
        return;
    }
    let Some(user) = ctx.ready() else { return };
    let Some(other) = ctx.find_user(user, args) else { return };

    let comparison = classmate_queries::compare_availability(user, &other);
    println!();
    println!("You and {}:", other.name);
    render::print_overlap(&comparison.grid, &other.name);
    println!("{} hours free together each week.", comparison.overlap_count);
}

pub fn list(ctx: &CLIContext) {
    let Some(user) = ctx.ready() else { return };

    let friends = match friend_queries::friends(&ctx.conn, user) {
        Ok(f) => f,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };
    if friends.is_empty() {
        println!("No friends yet.");
    } else {
        println!("Friends ({}):", friends.len());
        for friend in &friends {
            println!("  {}", render::avatar_line(friend, &EARTH_TONE));
        }
    }

    let suggestions = classmate_queries::suggested_friends(&ctx.conn, user).unwrap_or_default();
    if !suggestions.is_empty() {
        println!();
        println!("Classmates you might know:");
        for classmate in &suggestions {
            println!(
                "  {} ({})",
                render::avatar_line(&classmate.profile, &EARTH_TONE),
                render::class_labels(&classmate.shared_classes)
            );
        }
    }
}

pub fn requests(ctx: &CLIContext) {
    let Some(user) = ctx.ready() else { return };

    let incoming = match friend_queries::incoming_requests(&ctx.conn, &user.id) {
        Ok(r) => r,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };
    if incoming.is_empty() {
        println!("No pending requests.");
    } else {
        println!("Friend requests ({}):", incoming.len());
        for request in &incoming {
            println!("  {} ({})", request.from_name, request.created_at.format("%b %-d"));
        }
    }

    let outgoing = friend_queries::outgoing_requests(&ctx.conn, &user.id).unwrap_or_default();
    if !outgoing.is_empty() {
        println!("Waiting on {} sent request(s).", outgoing.len());
    }
}

pub fn add(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: add-friend <name>");
        return;
    }
    let Some(user) = ctx.ready().cloned() else { return };
    let Some(other) = ctx.find_user(&user, args) else { return };

    match friend_ops::send_request(&ctx.conn, &user.id, &other.id) {
        Ok(request) if request.is_pending() => println!("Friend request sent to {}.", other.name),
        Ok(_) => {
            println!("You and {} are now friends!", other.name);
            ctx.refresh();
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn accept(ctx: &mut CLIContext, args: &str) {
    respond(ctx, args, true);
}

pub fn decline(ctx: &mut CLIContext, args: &str) {
    respond(ctx, args, false);
}

fn respond(ctx: &mut CLIContext, args: &str, accept: bool) {
    if args.is_empty() {
        println!("Usage: {} <name>", if accept { "accept" } else { "decline" });
        return;
    }
    let Some(user) = ctx.ready().cloned() else { return };
    let Some(other) = ctx.find_user(&user, args) else { return };

    let result = if accept {
        friend_ops::accept_request(&ctx.conn, &user.id, &other.id)
    } else {
        friend_ops::decline_request(&ctx.conn, &user.id, &other.id)
    };
    match result {
        Ok(_) if accept => {
            println!("You and {} are now friends!", other.name);
            ctx.refresh();
        }
        Ok(_) => println!("Declined request from {}.", other.name),
        Err(e) => ctx.print_error(&e),
    }
}
