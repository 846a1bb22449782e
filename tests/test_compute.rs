use flappy_game::compute::*;
use flappy_game::constants::*;
use flappy_game::effects::{Effects, Particle, ParticleKind};
use flappy_game::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    GameState {
        bird: Bird::default(),
        pipes: Vec::new(),
        power_ups: Vec::new(),
        power_up_timer: 0,
        score: 0,
        high_score: 0,
        new_record: false,
        status: GameStatus::Playing,
        frame: 0,
        events: Vec::new(),
        effects: Effects::default(),
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_bird_at_rest() {
    let s = init_state(0, &mut seeded_rng());
    assert_eq!(s.bird.x, BIRD_X);
    assert_eq!(s.bird.y, BIRD_START_Y);
    assert_eq!(s.bird.velocity, 0.0);
}

#[test]
fn init_state_three_staggered_pipes() {
    let s = init_state(0, &mut seeded_rng());
    let xs: Vec<f32> = s.pipes.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![800.0, 1200.0, 1600.0]);
    for p in &s.pipes {
        assert_eq!(p.bottom_y - p.top_height, PIPE_GAP);
        assert!(!p.scored);
    }
}

#[test]
fn init_state_empty_session() {
    let s = init_state(12, &mut seeded_rng());
    assert!(s.power_ups.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.high_score, 12);
    assert!(!s.new_record);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.frame, 0);
    assert_eq!(s.effects.clouds.len(), 5);
}

#[test]
fn same_seed_same_layout() {
    let a = init_state(0, &mut StdRng::seed_from_u64(7));
    let b = init_state(0, &mut StdRng::seed_from_u64(7));
    assert_eq!(a.pipes, b.pipes);
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn jump_sets_fixed_velocity() {
    let mut s = make_state();
    s.bird.velocity = 9.0;
    let s2 = jump(&s, &mut seeded_rng());
    assert_eq!(s2.bird.velocity, JUMP_STRENGTH);
}

#[test]
fn jump_does_not_mutate_original() {
    let s = make_state();
    let _ = jump(&s, &mut seeded_rng());
    assert_eq!(s.bird.velocity, 0.0);
}

#[test]
fn pointer_behaves_like_jump() {
    let s = make_state();
    let a = apply_input(&s, InputAction::Jump, &mut seeded_rng());
    let b = apply_input(&s, InputAction::PointerActivate, &mut seeded_rng());
    assert_eq!(a.bird, b.bird);
}

#[test]
fn quit_leaves_state_alone() {
    let mut s = make_state();
    s.score = 3;
    let s2 = apply_input(&s, InputAction::Quit, &mut seeded_rng());
    assert_eq!(s2.score, 3);
    assert_eq!(s2.bird, s.bird);
}

#[test]
fn restart_while_playing_is_a_no_op() {
    let mut s = make_state();
    s.score = 4;
    s.bird.y = 123.0;
    let s2 = restart(&s, &mut seeded_rng());
    assert_eq!(s2.score, 4);
    assert_eq!(s2.bird.y, 123.0);
    assert!(s2.pipes.is_empty());
}

#[test]
fn restart_resets_everything_but_high_score() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.score = 9;
    s.high_score = 15;
    s.new_record = true;
    s.bird.y = 540.0;
    s.bird.velocity = 8.0;
    s.power_ups.push(PowerUp::new(300.0, 200.0, PowerUpKind::Shield));

    let s2 = restart(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.high_score, 15);
    assert!(!s2.new_record);
    assert_eq!(s2.bird, Bird::default());
    assert!(s2.power_ups.is_empty());
    let xs: Vec<f32> = s2.pipes.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![800.0, 1200.0, 1600.0]);
}

#[test]
fn jump_on_game_over_restarts() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.score = 6;
    s.high_score = 6;
    let s2 = jump(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.score, 0);
    assert_eq!(s2.high_score, 6);
    // a restart does not also jump
    assert_eq!(s2.bird.velocity, 0.0);
}

// ── tick: physics & bookkeeping ─────────────────────────────────────────────

#[test]
fn tick_increments_frame_and_clears_events() {
    let mut s = make_state();
    s.frame = 5;
    s.events.push(GameEvent::NewRecord { score: 1 });
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.frame, 6);
    assert!(s2.events.is_empty());
}

#[test]
fn tick_applies_gravity() {
    let s = make_state();
    let s2 = tick(&s, &mut seeded_rng());
    assert!(approx(s2.bird.velocity, GRAVITY));
    assert!(approx(s2.bird.y, BIRD_START_Y + GRAVITY));
}

#[test]
fn tick_scrolls_pipes_and_power_ups() {
    let mut s = make_state();
    s.pipes.push(Pipe::with_top(700.0, 200.0));
    s.power_ups.push(PowerUp::new(600.0, 100.0, PowerUpKind::Magnet));
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.pipes[0].x, 697.0);
    assert_eq!(s2.power_ups[0].x, 597.0);
}

// ── tick: collisions ─────────────────────────────────────────────────────────

#[test]
fn above_screen_ends_game() {
    let mut s = make_state();
    s.bird.y = -1.0;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
}

#[test]
fn above_screen_ends_game_even_when_climbing() {
    let mut s = make_state();
    s.bird.y = -1.0;
    s.bird.velocity = JUMP_STRENGTH;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
}

#[test]
fn above_screen_ends_game_even_when_falling_back_in() {
    let mut s = make_state();
    s.bird.y = -1.0;
    s.bird.velocity = 2.0; // physics alone would bring it back to y = 1.6
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert!(s2
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Crashed { .. })));
}

#[test]
fn hitting_ground_ends_game() {
    let mut s = make_state();
    s.bird.y = GROUND_Y - BIRD_HEIGHT;
    s.bird.velocity = 2.0;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
}

#[test]
fn shield_lets_bird_pass_through_pipes() {
    let mut s = make_state();
    s.bird.y = 50.0;
    s.pipes.push(Pipe::with_top(103.0, 100.0)); // scrolls onto the bird

    let mut shielded = s.clone();
    shielded.bird.apply_power_up(PowerUpKind::Shield);
    let s2 = tick(&shielded, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::Playing);
    // shield is not consumed by the hit
    assert!(s2.bird.shield.active);
    assert_eq!(s2.bird.shield.remaining, SHIELD_DURATION - 1);

    let s3 = tick(&s, &mut seeded_rng());
    assert_eq!(s3.status, GameStatus::GameOver);
}

#[test]
fn game_over_emits_crash_and_debris() {
    let mut s = make_state();
    s.bird.y = -1.0;
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::Crashed { .. })));
    assert_eq!(s2.effects.particles.len(), 30);
    assert!(s2
        .effects
        .particles
        .iter()
        .all(|p| p.kind == ParticleKind::Debris));
    assert_eq!(s2.effects.shake_intensity, 20.0);
}

// ── tick: scoring ────────────────────────────────────────────────────────────

#[test]
fn double_points_scenario_scores_four() {
    let mut rng = seeded_rng();
    let mut s = make_state();

    // Pipe #1, normal points
    s.pipes.push(Pipe::with_top(18.0, 200.0)); // scrolls to 15, right edge 95
    s = tick(&s, &mut rng);
    assert_eq!(s.score, 1);

    // Pipe #2, double points
    s.bird.apply_power_up(PowerUpKind::DoublePoints);
    s.pipes.push(Pipe::with_top(18.0, 200.0));
    s = tick(&s, &mut rng);
    assert_eq!(s.score, 3);

    // Pipe #3, back to normal
    s.bird.double_points = EffectTimer::default();
    s.pipes.push(Pipe::with_top(18.0, 200.0));
    s = tick(&s, &mut rng);
    assert_eq!(s.score, 4);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn pipe_scores_only_once_across_ticks() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.pipes.push(Pipe::with_top(18.0, 200.0));
    for _ in 0..5 {
        s = tick(&s, &mut rng);
    }
    assert_eq!(s.score, 1);
}

#[test]
fn scoring_spawns_star_burst() {
    let mut s = make_state();
    s.pipes.push(Pipe::with_top(18.0, 200.0));
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.effects.particles.len(), 15);
    assert_eq!(s2.effects.glows.len(), 1);
    assert_eq!(s2.effects.shake_intensity, 3.0);
}

#[test]
fn crash_tick_checks_high_score() {
    let mut s = make_state();
    s.score = 10;
    s.high_score = 7;
    s.bird.y = -1.0;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.high_score, 10);
    assert!(s2.new_record);
    assert!(s2.events.contains(&GameEvent::NewRecord { score: 10 }));

    s.score = 5;
    let s3 = tick(&s, &mut seeded_rng());
    assert_eq!(s3.high_score, 7);
    assert!(!s3.new_record);
}

// ── tick: power-ups ──────────────────────────────────────────────────────────

#[test]
fn pickup_applies_full_duration() {
    let mut s = make_state();
    s.power_ups
        .push(PowerUp::new(103.0, 300.0, PowerUpKind::DoublePoints));
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2.power_ups.is_empty());
    assert!(s2.bird.double_points.active);
    assert_eq!(s2.bird.double_points.remaining, DOUBLE_POINTS_DURATION);
    assert!(s2
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::PowerUpCollected { .. })));
}

#[test]
fn pickup_is_idempotent() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.power_ups
        .push(PowerUp::new(103.0, 300.0, PowerUpKind::DoublePoints));
    s = tick(&s, &mut rng);
    s = tick(&s, &mut rng);
    assert!(s.events.is_empty());
    assert_eq!(s.bird.double_points.remaining, DOUBLE_POINTS_DURATION - 1);
}

#[test]
fn no_pickup_on_crash_tick() {
    let mut s = make_state();
    s.bird.y = -1.0;
    s.power_ups.push(PowerUp::new(103.0, 0.0, PowerUpKind::Shield));
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.power_ups.len(), 1);
    assert!(!s2.bird.shield.active);
}

// ── tick: spawning & pruning ────────────────────────────────────────────────

#[test]
fn tick_spawns_pipe_at_threshold() {
    let mut s = make_state();
    s.pipes.push(Pipe::with_top(402.0, 200.0)); // scrolls to 399
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.pipes.len(), 2);
    assert_eq!(s2.pipes[1].x, SCREEN_WIDTH);
}

#[test]
fn tick_prunes_off_screen_pipe() {
    let mut s = make_state();
    s.pipes.push(Pipe::with_top(-77.0, 200.0)); // scrolls to -80
    s.pipes.push(Pipe::with_top(500.0, 200.0));
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.pipes.len(), 1);
    assert_eq!(s2.pipes[0].x, 497.0);
}

#[test]
fn tick_prunes_off_screen_power_up() {
    let mut s = make_state();
    s.power_ups.push(PowerUp::new(-47.0, 100.0, PowerUpKind::Magnet)); // to -50
    let s2 = tick(&s, &mut seeded_rng());
    assert!(s2.power_ups.is_empty());
}

#[test]
fn power_up_timer_advances_each_tick() {
    let mut s = make_state();
    s.power_up_timer = 10;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.power_up_timer, 11);
}

// ── tick: game over freeze ──────────────────────────────────────────────────

#[test]
fn game_over_freezes_gameplay() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.bird.velocity = 4.0;
    s.pipes.push(Pipe::with_top(500.0, 200.0));
    s.power_up_timer = 50;
    let s2 = tick(&s, &mut seeded_rng());
    assert_eq!(s2.bird, s.bird);
    assert_eq!(s2.pipes, s.pipes);
    assert_eq!(s2.power_up_timer, 50);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.frame, 1);
}

#[test]
fn effects_keep_decaying_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.effects.shake_intensity = 10.0;
    s.effects.particles.push(Particle {
        x: 100.0,
        y: 100.0,
        vx: 1.0,
        vy: 0.0,
        lifetime: 5,
        max_lifetime: 5,
        size: 3.0,
        kind: ParticleKind::Debris,
    });
    let s2 = tick(&s, &mut seeded_rng());
    assert!(approx(s2.effects.shake_intensity, 9.0));
    assert_eq!(s2.effects.particles[0].lifetime, 4);
    let (dx, dy) = s2.effects.shake_offset();
    assert!(dx.abs() <= 9 && dy.abs() <= 9);
}
