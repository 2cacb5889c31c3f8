use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use engine::{Clock, Runner, Ticker};
use tracing::{debug, warn};

use crate::collab::{Celebration, CodeEntry, Navigator};
use crate::leaderboard::{self, LeaderboardStore};
use crate::participant::{Participant, ValidationError};
use crate::phase::Phase;
use crate::session::{Outcome, Session, SessionEffect, SessionEvent, SpeedChallenge};

pub const DISPLAY_TICK_PERIOD: Duration = Duration::from_millis(100);
pub const LEADERBOARD_VIEW_LIMIT: usize = 10;

/// Effectful shell around the pure [`SpeedChallenge`] machine: owns the
/// clock, the leaderboard store, the collaborators, and the display-tick
/// lifecycle. One controller per mounted session.
pub struct SessionController {
    runner: Runner<SpeedChallenge>,
    clock: Arc<dyn Clock>,
    store: LeaderboardStore,
    code_entry: Box<dyn CodeEntry>,
    celebration: Box<dyn Celebration>,
    navigator: Box<dyn Navigator>,
    // Dropping the handle joins the tick thread, so an abrupt teardown of the
    // controller also ends the tick.
    ticker: Option<Ticker>,
    elapsed_bits: Arc<AtomicU64>,
}

impl SessionController {
    pub fn new(
        machine: SpeedChallenge,
        clock: Arc<dyn Clock>,
        store: LeaderboardStore,
        code_entry: Box<dyn CodeEntry>,
        celebration: Box<dyn Celebration>,
        navigator: Box<dyn Navigator>,
    ) -> Self {
        Self {
            runner: Runner::new(machine),
            clock,
            store,
            code_entry,
            celebration,
            navigator,
            ticker: None,
            elapsed_bits: Arc::new(AtomicU64::new(0f64.to_bits())),
        }
    }

    pub fn session(&self) -> &Session {
        self.runner.state()
    }

    pub fn phase(&self) -> Phase {
        self.session().phase
    }

    pub fn question_number(&self) -> u8 {
        self.session().question_number
    }

    pub fn current_question(&self) -> Option<&str> {
        self.runner.machine().bank().get(self.question_number())
    }

    /// Display-only elapsed seconds, recomputed by the 100 ms tick while
    /// Playing. Not the scoring source of truth.
    pub fn elapsed_secs(&self) -> f64 {
        f64::from_bits(self.elapsed_bits.load(Ordering::SeqCst))
    }

    /// Register -> Countdown, gated on complete registration details. On a
    /// validation failure the phase is unchanged and the combined message is
    /// returned for the caller to surface.
    pub fn start(&mut self, participant: Participant) -> Result<(), ValidationError> {
        let from = self.phase();
        let effects = self.runner.apply(SessionEvent::Start { participant });
        let rejection = self.execute(effects);
        debug!(?from, to = ?self.phase(), "start");
        match rejection {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Called exactly once by the external countdown display when its count
    /// reaches zero.
    pub fn countdown_complete(&mut self) {
        let now_ms = self.clock.now_ms();
        let effects = self.runner.apply(SessionEvent::CountdownComplete { now_ms });
        self.execute(effects);
        debug!(to = ?self.phase(), "countdown complete");
    }

    /// Pulls the current submission from the code-entry collaborator and
    /// scores it. Returns the outcome, or `None` when no challenge is
    /// running.
    pub fn submit(&mut self) -> Option<Outcome> {
        if self.phase() != Phase::Playing {
            return None;
        }
        let user_code = self.code_entry.current_code();
        let origin = self.code_entry.origin();
        let now_ms = self.clock.now_ms();
        let effects = self.runner.apply(SessionEvent::Submit {
            user_code,
            now_ms,
            origin,
        });
        self.execute(effects);
        let outcome = self.session().outcome;
        debug!(?outcome, "submit");
        outcome
    }

    /// Result -> Countdown with the next question, or back to Register after
    /// the last one.
    pub fn advance(&mut self) {
        let effects = self.runner.apply(SessionEvent::Advance);
        self.execute(effects);
        debug!(to = ?self.phase(), question = self.question_number(), "advance");
    }

    pub fn view_leaderboard(&mut self) {
        let entries = self.store.read();
        let rendered = leaderboard::render_top(&entries, LEADERBOARD_VIEW_LIMIT);
        self.navigator.go_to_leaderboard(&rendered);
    }

    fn execute(&mut self, effects: Vec<SessionEffect>) -> Option<ValidationError> {
        let mut rejection = None;
        for effect in effects {
            match effect {
                SessionEffect::ValidationFailed(err) => rejection = Some(err),
                SessionEffect::StartDisplayTick => self.start_display_tick(),
                SessionEffect::StopDisplayTick => self.ticker = None,
                SessionEffect::CelebrateAt { x, y } => {
                    if let Err(err) = self.celebration.burst_at(x, y) {
                        // Cosmetic only; a broken effect never blocks the game.
                        warn!(error = %err, "celebration effect failed");
                    }
                }
                SessionEffect::RecordScore { entry } => self.record_score(entry),
            }
        }
        rejection
    }

    fn start_display_tick(&mut self) {
        let start_ms = self
            .session()
            .start_ms
            .unwrap_or_else(|| self.clock.now_ms());
        let clock = Arc::clone(&self.clock);
        let elapsed_bits = Arc::clone(&self.elapsed_bits);
        elapsed_bits.store(0f64.to_bits(), Ordering::SeqCst);
        self.ticker = Some(Ticker::spawn(DISPLAY_TICK_PERIOD, move || {
            let secs = (clock.now_ms() - start_ms) as f64 / 1000.0;
            elapsed_bits.store(secs.to_bits(), Ordering::SeqCst);
        }));
    }

    fn record_score(&mut self, entry: crate::leaderboard::Entry) {
        let mut board = self.store.read();
        board.push(entry);
        leaderboard::sort_ascending(&mut board);
        if let Err(err) = self.store.write(&board) {
            warn!(error = %err, path = %self.store.path().display(), "failed to persist leaderboard");
        }
    }
}
