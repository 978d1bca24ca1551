//! Access-control predicates.
//!
//! Admin gating lives in the API middleware; the playback predicate lives
//! here so it can be shared and tested without HTTP machinery.

use crate::models::{User, Video};

/// Whether `user` may play `video`.
///
/// Non-premium videos are viewable by anyone, including anonymous callers.
/// Premium videos require a signed-in user whose unlocked set contains the
/// video id.
pub fn can_view(video: &Video, user: Option<&User>) -> bool {
    if !video.is_premium {
        return true;
    }
    match user {
        Some(user) => user.has_unlocked(video.id),
        None => false,
    }
}
