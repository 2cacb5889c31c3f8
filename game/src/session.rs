use engine::{Machine, Transition};
use serde::{Deserialize, Serialize};

use crate::leaderboard::Entry;
use crate::normalize::{normalize_code, normalize_code_opt};
use crate::participant::{Participant, ValidationError};
use crate::phase::Phase;
use crate::questions::QuestionBank;

pub const FIRST_QUESTION: u8 = 1;

/// Correctness verdict and elapsed seconds for one submission. `time_taken`
/// is computed from the captured start/end timestamps, not from the display
/// timer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub correct: bool,
    pub time_taken: f64,
}

/// In-memory state for one playthrough. Lives only while the session is
/// mounted; nothing here is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phase: Phase,
    pub participant: Option<Participant>,
    pub question_number: u8,
    pub start_ms: Option<i64>,
    pub end_ms: Option<i64>,
    pub outcome: Option<Outcome>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Register,
            participant: None,
            question_number: FIRST_QUESTION,
            start_ms: None,
            end_ms: None,
            outcome: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Start {
        participant: Participant,
    },
    CountdownComplete {
        now_ms: i64,
    },
    Submit {
        user_code: String,
        now_ms: i64,
        /// On-screen position of the submission control, when one exists,
        /// in window-relative coordinates.
        origin: Option<(f32, f32)>,
    },
    Advance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    ValidationFailed(ValidationError),
    StartDisplayTick,
    StopDisplayTick,
    CelebrateAt { x: f32, y: f32 },
    RecordScore { entry: Entry },
}

/// The phase machine itself. Pure: timestamps arrive on the events and all
/// side effects (persistence, celebration, the display tick) are emitted as
/// [`SessionEffect`] commands for the controller to execute.
#[derive(Debug, Clone, Default)]
pub struct SpeedChallenge {
    bank: QuestionBank,
}

impl SpeedChallenge {
    pub fn new(bank: QuestionBank) -> Self {
        Self { bank }
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }
}

impl Machine for SpeedChallenge {
    type State = Session;
    type Event = SessionEvent;
    type Effect = SessionEffect;

    fn initial_state(&self) -> Self::State {
        Session::new()
    }

    fn apply(&self, state: &Self::State, event: Self::Event) -> Transition<Self::State, Self::Effect> {
        match (state.phase, event) {
            (Phase::Register, SessionEvent::Start { participant }) => {
                match participant.validate() {
                    Ok(()) => {
                        let mut next = state.clone();
                        next.participant = Some(participant);
                        next.phase = Phase::Countdown;
                        Transition::to(next)
                    }
                    Err(err) => {
                        Transition::to(state.clone()).effect(SessionEffect::ValidationFailed(err))
                    }
                }
            }
            (Phase::Countdown, SessionEvent::CountdownComplete { now_ms }) => {
                let mut next = state.clone();
                next.phase = Phase::Playing;
                next.start_ms = Some(now_ms);
                next.end_ms = None;
                next.outcome = None;
                Transition::to(next).effect(SessionEffect::StartDisplayTick)
            }
            (Phase::Playing, SessionEvent::Submit { user_code, now_ms, origin }) => {
                let start_ms = state.start_ms.unwrap_or(now_ms);
                let time_taken = (now_ms - start_ms) as f64 / 1000.0;
                let reference = self.bank.get(state.question_number);
                let correct = normalize_code_opt(reference) == normalize_code(&user_code);

                let mut next = state.clone();
                next.phase = Phase::Result;
                next.end_ms = Some(now_ms);
                next.outcome = Some(Outcome { correct, time_taken });

                let mut transition = Transition::to(next).effect(SessionEffect::StopDisplayTick);
                if correct {
                    if let Some((x, y)) = origin {
                        transition = transition.effect(SessionEffect::CelebrateAt { x, y });
                    }
                    if let Some(p) = &state.participant {
                        transition = transition.effect(SessionEffect::RecordScore {
                            entry: Entry {
                                name: p.name.clone(),
                                department: p.department.clone(),
                                student_id: p.student_id.clone(),
                                time: time_taken,
                                timestamp: now_ms,
                            },
                        });
                    }
                }
                transition
            }
            (Phase::Result, SessionEvent::Advance) => {
                let mut next = state.clone();
                next.start_ms = None;
                next.end_ms = None;
                next.outcome = None;
                if state.question_number < self.bank.last_number() {
                    next.question_number += 1;
                    next.phase = Phase::Countdown;
                } else {
                    next.question_number = FIRST_QUESTION;
                    next.phase = Phase::Register;
                }
                Transition::to(next)
            }
            // An event whose control is not on screen in this phase is a
            // no-op: state unchanged, nothing emitted.
            _ => Transition::to(state.clone()),
        }
    }
}
