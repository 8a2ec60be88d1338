pub mod classmate_queries;
pub mod friend_queries;
pub mod herd_queries;
