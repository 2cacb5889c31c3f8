pub mod collab;
pub mod controller;
pub mod leaderboard;
pub mod normalize;
pub mod participant;
pub mod phase;
pub mod questions;
pub mod session;

pub use controller::SessionController;
pub use participant::{Participant, ValidationError};
pub use phase::Phase;
pub use session::{Outcome, Session, SessionEffect, SessionEvent, SpeedChallenge};
