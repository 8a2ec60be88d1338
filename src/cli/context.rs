use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use std::io::{self, Write};

use crate::error::HerdError;
use crate::model::*;
use crate::queries::*;
use crate::session::{self, SessionState};

/// Everything the REPL knows: the database and who is signed in. Session
/// state is only changed through [`CLIContext::sign_in`],
/// [`CLIContext::sign_out`] and [`CLIContext::refresh`].
pub struct CLIContext {
    pub conn: Connection,
    auth: Option<AuthUser>,
    profile: Option<UserProfile>,
}

impl CLIContext {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            auth: None,
            profile: None,
        }
    }

    pub fn sign_in(&mut self, profile: UserProfile) {
        self.auth = Some(profile.auth_user());
        self.profile = Some(profile);
    }

    pub fn sign_out(&mut self) {
        self.auth = None;
        self.profile = None;
    }

    /// Reloads the signed-in profile from the database.
    pub fn refresh(&mut self) {
        let Some(auth) = &self.auth else { return };
        match classmate_queries::get_user(&self.conn, &auth.id) {
            Ok(profile) => self.profile = profile,
            Err(e) => self.print_error(&e),
        }
    }

    pub fn session_state(&self) -> SessionState {
        session::classify(self.auth.as_ref(), self.profile.as_ref())
    }

    /// The signed-in profile, set up or not. Prints a hint when signed out.
    pub fn signed_in(&self) -> Option<&UserProfile> {
        match (&self.auth, &self.profile) {
            (Some(_), Some(profile)) => Some(profile),
            _ => {
                println!("Please 'login' or 'signup' first.");
                None
            }
        }
    }

    /// The signed-in profile, only once setup is complete.
    pub fn ready(&self) -> Option<&UserProfile> {
        match self.session_state() {
            SessionState::Ready => self.profile.as_ref(),
            SessionState::ProfileIncomplete => {
                println!("Finish your profile first with 'setup'.");
                None
            }
            SessionState::Unauthenticated => {
                println!("Please 'login' or 'signup' first.");
                None
            }
        }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Find another student by name query. Prints error if not found or ambiguous.
    pub fn find_user(&self, viewer: &UserProfile, args: &str) -> Option<UserProfile> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let matches = match classmate_queries::find_user_by_name(&self.conn, viewer, query) {
            Ok(m) => m,
            Err(e) => {
                self.print_error(&e);
                return None;
            }
        };

        match matches.len() {
            0 => {
                println!("No student found matching '{}'", query);
                None
            }
            1 => matches.into_iter().next(),
            _ => {
                if let Some(exact) = matches.iter().find(|u| u.name.eq_ignore_ascii_case(query)) {
                    return Some(exact.clone());
                }
                println!("Multiple matches found:");
                for u in &matches {
                    println!("  {} <{}>", u.name, u.email);
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    /// Find a herd visible to the viewer by name query.
    pub fn find_herd(&self, viewer: &UserProfile, args: &str) -> Option<Herd> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let matches = match herd_queries::find_herd_by_name(&self.conn, viewer, query) {
            Ok(m) => m,
            Err(e) => {
                self.print_error(&e);
                return None;
            }
        };

        match matches.len() {
            0 => {
                println!("No herd found matching '{}'", query);
                None
            }
            1 => matches.into_iter().next(),
            _ => {
                if let Some(exact) = matches.iter().find(|h| h.name.eq_ignore_ascii_case(query)) {
                    return Some(exact.clone());
                }
                println!("Multiple matches found:");
                for h in &matches {
                    let date = h.schedule.date.map(|d| d.to_string()).unwrap_or_default();
                    println!("  {} ({})", h.name, date);
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

    /// Parses `YYYY-MM-DD`, printing a hint on failure.
    pub fn parse_date(input: &str) -> Option<NaiveDate> {
        match NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
            Ok(d) => Some(d),
            Err(_) => {
                println!("Invalid date '{}'. Use YYYY-MM-DD.", input.trim());
                None
            }
        }
    }

    /// Print an error.
    pub fn print_error(&self, e: &HerdError) {
        println!("Error: {}", e);
    }
}
