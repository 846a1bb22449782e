//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`. Side effects are limited to the injected RNG.

use rand::Rng;
use tracing::debug;

use crate::collision;
use crate::constants::{INITIAL_PIPES, PIPE_MAX_TOP, PIPE_SPAWN_SPACING, SCREEN_WIDTH};
use crate::effects::Effects;
use crate::entities::{Bird, GameState, GameStatus, InputAction, Pipe};
use crate::spawner;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state of a session: a fresh bird, three staggered
/// pipes just off the right edge, no power-ups.
pub fn init_state(high_score: u32, rng: &mut impl Rng) -> GameState {
    let pipes = (0..INITIAL_PIPES)
        .map(|i| {
            let x = SCREEN_WIDTH + i as f32 * PIPE_SPAWN_SPACING;
            Pipe::new(x, PIPE_MAX_TOP, rng)
        })
        .collect();

    GameState {
        bird: Bird::default(),
        pipes,
        power_ups: Vec::new(),
        power_up_timer: 0,
        score: 0,
        high_score,
        new_record: false,
        status: GameStatus::Playing,
        frame: 0,
        events: Vec::new(),
        effects: Effects::new(rng),
    }
}

// ── Input-driven state transitions ───────────────────────────────────────────

/// GameOver → Playing with everything reset except the stored best score.
/// A no-op while still playing.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::Playing {
        return state.clone();
    }
    debug!(high_score = state.high_score, "restarting session");
    init_state(state.high_score, rng)
}

/// Jump while playing; restart once the game is over.
pub fn jump(state: &GameState, rng: &mut impl Rng) -> GameState {
    match state.status {
        GameStatus::GameOver => restart(state, rng),
        GameStatus::Playing => {
            let mut next = state.clone();
            next.bird.jump();
            next
        }
    }
}

/// Route a device-independent action. `Quit` ends the process, not the
/// session, so it leaves the state alone.
pub fn apply_input(state: &GameState, action: InputAction, rng: &mut impl Rng) -> GameState {
    match action {
        InputAction::Jump | InputAction::PointerActivate => jump(state, rng),
        InputAction::Quit => state.clone(),
    }
}

// ── Per-frame tick (nearly pure, RNG is injected) ──────────────────────────

/// Advance the simulation by one frame. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Once the game is over only the decorative effects keep moving.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.events.clear();
    next.frame += 1;

    next.effects.update(next.is_over(), rng);
    if next.is_over() {
        return next;
    }

    // ── 1. Physics ───────────────────────────────────────────────────────────
    let was_out = collision::hits_boundary(&next.bird);
    next.bird.update();
    for pipe in &mut next.pipes {
        pipe.update();
    }
    for pu in &mut next.power_ups {
        pu.update();
    }

    // ── 2. Collision & scoring ───────────────────────────────────────────────
    let crashed = was_out || collision::crashed(&next.bird, &next.pipes);
    collision::score_pipes(&mut next);
    if crashed {
        collision::end_session(&mut next);
    } else {
        collision::collect_power_ups(&mut next);
    }

    // ── 3. Spawn & prune ─────────────────────────────────────────────────────
    spawner::prune_pipes(&mut next.pipes);
    spawner::spawn_pipes(&mut next.pipes, rng);
    spawner::prune_power_ups(&mut next.power_ups);
    if !next.is_over() {
        spawner::spawn_power_up(&mut next, rng);
    }

    // ── 4. Feed this tick's events to the decorations ───────────────────────
    for event in &next.events {
        next.effects.on_event(event, rng);
    }

    next
}
