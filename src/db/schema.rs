use rusqlite::Connection;

use crate::error::HerdResult;

/// Initialize the database schema. Creates all tables if they don't exist.
pub fn initialize(conn: &Connection) -> HerdResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT,
            photo_url TEXT,
            profile_setup INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            UNIQUE(email COLLATE NOCASE)
        );

        CREATE TABLE IF NOT EXISTS user_classes (
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            class_code TEXT NOT NULL,
            position INTEGER NOT NULL,
            PRIMARY KEY (user_id, class_code)
        );

        CREATE TABLE IF NOT EXISTS user_availability (
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            slot_key TEXT NOT NULL,
            PRIMARY KEY (user_id, slot_key)
        );

        CREATE TABLE IF NOT EXISTS friendships (
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            friend_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            PRIMARY KEY (user_id, friend_id)
        );

        CREATE TABLE IF NOT EXISTS herds (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            class_code TEXT,
            location TEXT NOT NULL,
            style TEXT NOT NULL,
            visibility TEXT NOT NULL,
            creator_id TEXT NOT NULL REFERENCES users(id),
            creator_name TEXT NOT NULL,
            schedule_date TEXT,
            start_time TEXT,
            end_time TEXT,
            active INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS herd_members (
            herd_id TEXT NOT NULL REFERENCES herds(id) ON DELETE CASCADE,
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            joined_seq INTEGER NOT NULL,
            PRIMARY KEY (herd_id, user_id)
        );

        CREATE TABLE IF NOT EXISTS friend_requests (
            id TEXT PRIMARY KEY NOT NULL,
            from_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            from_name TEXT NOT NULL,
            to_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            status TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_herds_date ON herds(schedule_date);
        CREATE INDEX IF NOT EXISTS idx_requests_to ON friend_requests(to_id, status);
        CREATE INDEX IF NOT EXISTS idx_requests_from ON friend_requests(from_id, status);
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
