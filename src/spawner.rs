//! Decides when and where new pipes and power-ups appear, and drops the
//! ones that have scrolled away.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::constants::{
    PIPE_FAR_CUTOFF, PIPE_MAX_TOP, PIPE_SPAWN_SPACING, POWER_UP_COOLDOWN, POWER_UP_DESPAWN_X,
    POWER_UP_MAX_ATTEMPTS, POWER_UP_MAX_Y, POWER_UP_MIN_Y, POWER_UP_PIPE_PROXIMITY,
    POWER_UP_SPAWN_CHANCE, POWER_UP_SPAWN_X, SCREEN_WIDTH,
};
use crate::entities::{GameState, Pipe, PowerUp, PowerUpKind};

// ── Pipes ─────────────────────────────────────────────────────────────────────

/// Drop pipes that are entirely off the left edge.
pub fn prune_pipes(pipes: &mut Vec<Pipe>) {
    pipes.retain(|p| p.right_edge() > 0.0);
}

/// Append a pipe at the right edge once the newest one has moved far
/// enough in.
pub fn spawn_pipes(pipes: &mut Vec<Pipe>, rng: &mut impl Rng) {
    let due = pipes
        .last()
        .map_or(true, |last| last.x < SCREEN_WIDTH - PIPE_SPAWN_SPACING);
    if !due {
        return;
    }
    pipes.push(Pipe::new(SCREEN_WIDTH, PIPE_MAX_TOP, rng));
    pipes.retain(|p| p.x > PIPE_FAR_CUTOFF);
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub fn prune_power_ups(power_ups: &mut Vec<PowerUp>) {
    power_ups.retain(|pu| pu.x > POWER_UP_DESPAWN_X);
}

/// Rejection-sample a spawn height. A candidate is refused when any pipe
/// near the spawn column has it outside its gap, so accepted heights always
/// line up with the gaps of nearby pipes.
pub fn find_power_up_y(pipes: &[Pipe], rng: &mut impl Rng) -> Option<f32> {
    let nearby: Vec<&Pipe> = pipes
        .iter()
        .filter(|p| (p.x - POWER_UP_SPAWN_X).abs() < POWER_UP_PIPE_PROXIMITY)
        .collect();

    for _ in 0..POWER_UP_MAX_ATTEMPTS {
        let y = rng.gen_range(POWER_UP_MIN_Y..=POWER_UP_MAX_Y) as f32;
        if nearby.iter().all(|p| p.gap_contains(y)) {
            return Some(y);
        }
    }
    None
}

/// Advance the spawn timer and, once the cooldown has passed, roll for a
/// new power-up. The timer only resets when one is actually placed, so a
/// failed roll or search is retried on the next tick.
pub fn spawn_power_up(state: &mut GameState, rng: &mut impl Rng) {
    state.power_up_timer += 1;
    if state.power_up_timer <= POWER_UP_COOLDOWN || !rng.gen_bool(POWER_UP_SPAWN_CHANCE) {
        return;
    }

    let Some(y) = find_power_up_y(&state.pipes, rng) else {
        debug!(timer = state.power_up_timer, "no gap-aligned spot for power-up");
        return;
    };
    let Some(&kind) = PowerUpKind::SPAWNABLE.choose(rng) else {
        return;
    };

    debug!(?kind, y, "power-up spawned");
    state.power_ups.push(PowerUp::new(POWER_UP_SPAWN_X, y, kind));
    state.power_up_timer = 0;
}
