pub mod friend_ops;
pub mod herd_ops;
pub mod profile_ops;
