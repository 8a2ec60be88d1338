use std::path::PathBuf;

use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut args = std::env::args().skip(1);
    let mut db_path: Option<PathBuf> = None;
    let mut import_path: Option<PathBuf> = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--file" | "-f" => {
                db_path = args.next().map(PathBuf::from);
                if db_path.is_none() {
                    eprintln!("Error: --file requires a path argument");
                    std::process::exit(1);
                }
            }
            "--import" => {
                import_path = args.next().map(PathBuf::from);
                if import_path.is_none() {
                    eprintln!("Error: --import requires a JSON file path");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("Herd - study group coordination");
                println!();
                println!("Usage: herd [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --file <PATH>      Database file path (default: .data/herd.db)");
                println!("  --import <JSON_PATH>   Import a JSON export of users, herds and friend requests");
                println!("  -h, --help             Show this help");
                println!();
                println!("Set RUST_LOG (e.g. RUST_LOG=herd=debug) for diagnostic output.");
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                eprintln!("Use --help for usage information.");
                std::process::exit(1);
            }
        }
    }

    let db_path = db_path.unwrap_or_else(|| {
        let dir = PathBuf::from(".data");
        if let Err(e) = std::fs::create_dir_all(&dir) {
            eprintln!("Error: failed to create {}: {}", dir.display(), e);
            std::process::exit(1);
        }
        dir.join("herd.db")
    });
    tracing::debug!("using database {}", db_path.display());

    if let Some(json_path) = import_path {
        println!("Importing from {}...", json_path.display());
        if db_path.exists() {
            eprintln!("Error: Database file {} already exists.", db_path.display());
            eprintln!("Remove it first or use --file to specify a different path.");
            std::process::exit(1);
        }
        match herd::migrate::import_json(&json_path, &db_path) {
            Ok(stats) => {
                println!("Import complete!");
                println!("  Users: {}", stats.users);
                println!("  Friendships: {}", stats.friendships);
                println!("  Herds: {}", stats.herds);
                println!("  Memberships: {}", stats.memberships);
                println!("  Friend requests: {}", stats.friend_requests);
                if stats.skipped > 0 {
                    println!("  Skipped: {} (see warnings)", stats.skipped);
                }
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    herd::cli::run(&db_path);
}
