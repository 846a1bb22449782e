//! Collision detection and scoring. Runs once per tick, after physics and
//! before any spawning.

use tracing::{debug, info};

use crate::constants::{BIRD_HEIGHT, GROUND_Y, PIPE_WIDTH};
use crate::entities::{Bird, GameEvent, GameState, GameStatus, Pipe};

/// Bird above the top of the screen or with its feet in the ground.
pub fn hits_boundary(bird: &Bird) -> bool {
    bird.y < 0.0 || bird.y + BIRD_HEIGHT > GROUND_Y
}

/// Bird overlapping any solid part of any pipe. Ignores the shield; the
/// caller decides whether a hit counts.
pub fn hits_pipe(bird: &Bird, pipes: &[Pipe]) -> bool {
    let hitbox = bird.hitbox();
    pipes
        .iter()
        .any(|pipe| pipe.collision_rects().iter().any(|r| hitbox.intersects(r)))
}

/// Whether this tick's position ends the session.
pub fn crashed(bird: &Bird, pipes: &[Pipe]) -> bool {
    hits_boundary(bird) || (!bird.shield.active && hits_pipe(bird, pipes))
}

/// Credit every pipe the bird has fully passed and not yet been paid for.
/// Returns the points awarded this call.
pub fn score_pipes(state: &mut GameState) -> u32 {
    let points = if state.bird.double_points.active { 2 } else { 1 };
    let bird_x = state.bird.x;
    let mut gained = 0;

    for pipe in state.pipes.iter_mut() {
        if pipe.scored || pipe.right_edge() >= bird_x {
            continue;
        }
        pipe.scored = true;
        gained += points;
        state.events.push(GameEvent::Scored {
            x: pipe.x + PIPE_WIDTH / 2.0,
            y: pipe.gap_center(),
            points,
        });
    }

    state.score += gained;
    gained
}

/// Apply and remove every power-up the bird is touching. Does nothing once
/// the game is over.
pub fn collect_power_ups(state: &mut GameState) {
    if state.status == GameStatus::GameOver {
        return;
    }
    let hitbox = state.bird.hitbox();
    let (touched, kept): (Vec<_>, Vec<_>) = state
        .power_ups
        .drain(..)
        .partition(|pu| hitbox.intersects(&pu.hitbox()));
    state.power_ups = kept;

    for pu in touched {
        debug!(kind = ?pu.kind, "power-up collected");
        state.bird.apply_power_up(pu.kind);
        state.events.push(GameEvent::PowerUpCollected {
            kind: pu.kind,
            x: pu.x,
            y: pu.y,
        });
    }
}

/// Playing → GameOver. Records a new best score if this session beat it.
pub fn end_session(state: &mut GameState) {
    if state.status == GameStatus::GameOver {
        return;
    }
    state.status = GameStatus::GameOver;

    if state.score > state.high_score {
        state.high_score = state.score;
        state.new_record = true;
        state.events.push(GameEvent::NewRecord { score: state.score });
        info!(score = state.score, "new high score");
    }

    let (x, y) = state.bird.center();
    state.events.push(GameEvent::Crashed { x, y });
    info!(score = state.score, frame = state.frame, "game over");
}
