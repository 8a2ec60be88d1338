use crate::model::{AuthUser, UserProfile};

/// Where a visitor belongs in the app, given who is signed in and whether
/// they have finished setting up their profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    ProfileIncomplete,
    Ready,
}

pub fn classify(user: Option<&AuthUser>, profile: Option<&UserProfile>) -> SessionState {
    match (user, profile) {
        (None, _) => SessionState::Unauthenticated,
        (Some(user), Some(profile)) if profile.id == user.id && profile.profile_setup => {
            SessionState::Ready
        }
        (Some(_), _) => SessionState::ProfileIncomplete,
    }
}
