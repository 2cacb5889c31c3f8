//! Presentational collaborators the session controller drives. All of them
//! live outside the core; the controller only holds the seams.
//!
//! The countdown display is also external but needs no trait here: it calls
//! back exactly once through [`crate::SessionController::countdown_complete`]
//! when its own count reaches zero.

use std::error::Error;

pub type CollabError = Box<dyn Error + Send + Sync>;

/// Switches to the leaderboard view on request after a result.
pub trait Navigator {
    fn go_to_leaderboard(&mut self, rendered: &str);
}

/// Plays a visual burst at window-relative coordinates. A failing
/// implementation must never block game progression; the controller logs and
/// moves on.
pub trait Celebration {
    fn burst_at(&mut self, x: f32, y: f32) -> Result<(), CollabError>;
}

/// Supplies the participant's current submission text on demand. Content is
/// not validated until submit.
pub trait CodeEntry {
    fn current_code(&self) -> String;

    /// On-screen position of the submission control, if the surface has one.
    fn origin(&self) -> Option<(f32, f32)> {
        None
    }
}
