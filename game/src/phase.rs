use serde::{Deserialize, Serialize};

/// One discrete stage of a challenge session. Exactly one is active at a
/// time; `Result` cycles back to `Countdown` or `Register`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Register,
    Countdown,
    Playing,
    Result,
}

impl Phase {
    /// Short status line shown above the active screen.
    pub fn prompt(self) -> &'static str {
        match self {
            Phase::Register => "Enter your details and start the challenge",
            Phase::Countdown => "Get ready!",
            Phase::Playing => "Type the code as fast as you can!",
            Phase::Result => "Results",
        }
    }
}
