pub mod context;
pub mod render;
pub mod profile_commands;
pub mod herd_commands;
pub mod friend_commands;

use std::path::Path;
use rusqlite::Connection;

use crate::db::schema;
use crate::session::SessionState;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(db_path: &Path) {
    println!("Herd - find your study group");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let conn = match Connection::open(db_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        eprintln!("Error initializing database: {}", e);
        return;
    }

    let mut ctx = CLIContext::new(conn);
    println!("Please 'login <email>' or 'signup'.");

    repl_loop(&mut ctx);
}

fn repl_loop(ctx: &mut CLIContext) {
    loop {
        let prompt = match ctx.session_state() {
            SessionState::Unauthenticated => "> ",
            SessionState::ProfileIncomplete => "(setup) > ",
            SessionState::Ready => "herd> ",
        };
        let input = match ctx.read_line(prompt) {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Account and profile
            "signup" => profile_commands::signup(ctx, args),
            "login" => profile_commands::login(ctx, args),
            "logout" => profile_commands::logout(ctx),
            "setup" => profile_commands::setup(ctx),
            "profile" | "me" => profile_commands::show_profile(ctx),
            "classes" => profile_commands::edit_classes(ctx),
            "photo" => profile_commands::photo(ctx, args),
            "availability" => profile_commands::edit_availability_command(ctx),
            "catalog" => profile_commands::catalog(args),

            // Classmates and friends
            "discover" => friend_commands::discover(ctx, args),
            "compare" => friend_commands::compare(ctx, args),
            "friends" => friend_commands::list(ctx),
            "requests" => friend_commands::requests(ctx),
            "add-friend" => friend_commands::add(ctx, args),
            "accept" => friend_commands::accept(ctx, args),
            "decline" => friend_commands::decline(ctx, args),

            // Herds
            "pasture" => herd_commands::pasture(ctx, args),
            "herds" => herd_commands::my_herds(ctx),
            "roam" => herd_commands::roam(ctx, args),
            "search" => herd_commands::search(ctx, args),
            "create-herd" => herd_commands::create(ctx),
            "edit-herd" => herd_commands::edit(ctx, args),
            "join" => herd_commands::join(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

/// Split input into command and args.
fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Account:
    signup [name]           Create an account
    login [email]           Sign in
    logout                  Sign out
    setup                   Set name, classes and availability
    profile                 Show your profile and weekly grid
    classes                 Change your classes
    photo [url]             Set or clear your photo URL
    availability            Toggle free hours on your weekly grid
    catalog [query]         Search the class catalog

  Classmates:
    discover [class]        Classmates sharing your classes
    compare <name>          Compare weekly availability
    friends                 Your friends and suggested classmates
    requests                Pending friend requests
    add-friend <name>       Send a friend request
    accept <name>           Accept a friend request
    decline <name>          Decline a friend request

  Herds:
    pasture [YYYY-MM-DD]    Recommended herds and herds on a day
    herds                   Herds you belong to
    roam [style]            Browse all herds (quiet, casual, stampede)
    search <term>           Search herds by name or location
    create-herd             Start a new herd
    edit-herd <name>        Edit a herd you lead
    join <herd>             Join a herd

  Other:
    help                    Show this help
    exit / quit / q         Exit

TIPS:
  - Names are case-insensitive and partial matches work
  - Availability slots are written like Mon-2PM or Thu-10AM"#);
}
