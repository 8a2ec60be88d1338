mod ids;
mod slot;
mod availability;
mod user;
mod herd;
mod friend_request;

// Re-exports for convenience
pub use ids::Id;
pub use slot::{Day, WeeklyTimeSlot, DAYS, FIRST_HOUR, LAST_HOUR, TIMES};
pub use availability::AvailabilityGrid;
pub use user::{AuthUser, UserProfile};
pub use herd::{GrazingStyle, Herd, Schedule, Visibility};
pub use friend_request::{FriendRequest, RequestStatus};
