pub mod schema;
pub mod user_repo;
pub mod herd_repo;
pub mod request_repo;
