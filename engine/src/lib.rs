pub mod clock;
pub mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use ticker::Ticker;

/// Result of applying one event: the next state plus any effect commands the
/// caller must execute. Keeping effects as data keeps machines pure and
/// replayable.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, F> {
    pub state: S,
    pub effects: Vec<F>,
}

impl<S, F> Transition<S, F> {
    pub fn to(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn effect(mut self, effect: F) -> Self {
        self.effects.push(effect);
        self
    }
}

pub trait Machine {
    type State;
    type Event;
    type Effect;

    fn initial_state(&self) -> Self::State;
    fn apply(&self, state: &Self::State, event: Self::Event) -> Transition<Self::State, Self::Effect>;
}

/// Drives a [`Machine`] event by event. Each `apply` hands the emitted
/// effects back to the caller; the runner itself never executes them.
#[derive(Debug)]
pub struct Runner<M: Machine> {
    machine: M,
    state: M::State,
    steps: usize,
}

impl<M: Machine> Runner<M> {
    pub fn new(machine: M) -> Self {
        let state = machine.initial_state();
        Self {
            machine,
            state,
            steps: 0,
        }
    }

    pub fn machine(&self) -> &M {
        &self.machine
    }

    pub fn state(&self) -> &M::State {
        &self.state
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn apply(&mut self, event: M::Event) -> Vec<M::Effect> {
        let Transition { state, effects } = self.machine.apply(&self.state, event);
        self.state = state;
        self.steps += 1;
        effects
    }

    /// Applies a whole event sequence, returning every emitted effect in
    /// order. Useful for scripted sessions in tests and demos.
    pub fn run<I>(&mut self, events: I) -> Vec<M::Effect>
    where
        I: IntoIterator<Item = M::Event>,
    {
        let mut all = Vec::new();
        for event in events {
            all.extend(self.apply(event));
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Turnstile {
        Locked,
        Unlocked,
    }

    #[derive(Debug, Clone, Copy)]
    enum Action {
        Coin,
        Push,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Signal {
        Unlock,
        Lock,
        Refuse,
    }

    struct Gate;

    impl Machine for Gate {
        type State = Turnstile;
        type Event = Action;
        type Effect = Signal;

        fn initial_state(&self) -> Self::State {
            Turnstile::Locked
        }

        fn apply(&self, state: &Self::State, event: Self::Event) -> Transition<Self::State, Self::Effect> {
            match (state, event) {
                (Turnstile::Locked, Action::Coin) => {
                    Transition::to(Turnstile::Unlocked).effect(Signal::Unlock)
                }
                (Turnstile::Locked, Action::Push) => {
                    Transition::to(Turnstile::Locked).effect(Signal::Refuse)
                }
                (Turnstile::Unlocked, Action::Push) => {
                    Transition::to(Turnstile::Locked).effect(Signal::Lock)
                }
                (Turnstile::Unlocked, Action::Coin) => Transition::to(Turnstile::Unlocked),
            }
        }
    }

    #[test]
    fn runner_applies_events_and_returns_effects() {
        let mut runner = Runner::new(Gate);
        assert_eq!(runner.state(), &Turnstile::Locked);

        let effects = runner.apply(Action::Coin);
        assert_eq!(effects, vec![Signal::Unlock]);
        assert_eq!(runner.state(), &Turnstile::Unlocked);
        assert_eq!(runner.steps(), 1);
    }

    #[test]
    fn run_collects_effects_in_order() {
        let mut runner = Runner::new(Gate);
        let effects = runner.run([Action::Push, Action::Coin, Action::Coin, Action::Push]);
        assert_eq!(effects, vec![Signal::Refuse, Signal::Unlock, Signal::Lock]);
        assert_eq!(runner.state(), &Turnstile::Locked);
        assert_eq!(runner.steps(), 4);
    }
}
