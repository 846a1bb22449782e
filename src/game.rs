//! Session driver: owns the state, the score store and the randomness
//! source, and sequences input → tick → persistence.

use rand::Rng;
use tracing::info;

use crate::compute;
use crate::entities::{GameEvent, GameState, InputAction};
use crate::persistence::ScoreStore;

/// What the frame loop should do after handling an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct Game<S, R> {
    state: GameState,
    store: S,
    rng: R,
}

impl<S: ScoreStore, R: Rng> Game<S, R> {
    /// Read the stored best score once and open the first session.
    pub fn new(store: S, mut rng: R) -> Self {
        let high_score = store.load();
        info!(high_score, "starting game");
        let state = compute::init_state(high_score, &mut rng);
        Self { state, store, rng }
    }

    /// Read-only view for rendering.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the live state. Lets callers stage a scenario.
    pub fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    pub fn handle(&mut self, action: InputAction) -> Control {
        if action == InputAction::Quit {
            return Control::Quit;
        }
        self.state = compute::apply_input(&self.state, action, &mut self.rng);
        Control::Continue
    }

    /// Run one fixed tick, saving the best score the moment it is beaten.
    pub fn step(&mut self) {
        self.state = compute::tick(&self.state, &mut self.rng);

        let record = self.state.events.iter().find_map(|event| match event {
            GameEvent::NewRecord { score } => Some(*score),
            _ => None,
        });
        if let Some(score) = record {
            self.store.save(score);
        }
    }
}
