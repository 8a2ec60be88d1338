use thiserror::Error;

#[derive(Debug, Error)]
pub enum HerdError {
    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} cannot be empty")]
    EmptySet { field: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Unknown class: {code}")]
    UnknownClass { code: String },

    #[error("Invalid time '{value}' (expected HH:MM or H:MM AM/PM)")]
    InvalidTime { value: String },

    #[error("End time must be after start time")]
    EndBeforeStart,

    #[error("You can only edit herds you created")]
    NotHerdCreator,

    #[error("Cannot send a friend request to yourself")]
    SelfRequest,

    #[error("Already friends with {name}")]
    AlreadyFriends { name: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type HerdResult<T> = Result<T, HerdError>;
