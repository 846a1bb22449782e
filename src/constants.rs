//! Fixed gameplay tunables, in world units (one unit = one pixel of the
//! 800×600 playfield) and ticks (60 per second).

// ── Playfield ─────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const GROUND_HEIGHT: f32 = 50.0;
/// Top of the ground strip; the bird dies once its bottom edge passes it.
pub const GROUND_Y: f32 = SCREEN_HEIGHT - GROUND_HEIGHT;

pub const FPS: u32 = 60;

// ── Bird ──────────────────────────────────────────────────────────────────────

pub const BIRD_X: f32 = 100.0;
pub const BIRD_START_Y: f32 = SCREEN_HEIGHT / 2.0;
pub const BIRD_WIDTH: f32 = 45.0;
pub const BIRD_HEIGHT: f32 = 32.0;

pub const GRAVITY: f32 = 0.6;
pub const JUMP_STRENGTH: f32 = -11.0;
pub const SLOW_MOTION_FACTOR: f32 = 0.5;
pub const MAGNET_FACTOR: f32 = 1.1;
pub const ANGLE_FACTOR: f32 = 3.0;
pub const MAX_ANGLE: f32 = 45.0;

// ── Pipes ─────────────────────────────────────────────────────────────────────

pub const PIPE_WIDTH: f32 = 80.0;
pub const PIPE_GAP: f32 = 200.0;
pub const PIPE_SPEED: f32 = 3.0;
pub const PIPE_CAP_HEIGHT: f32 = 20.0;
/// How far a cap sticks out past the pipe body on each side.
pub const PIPE_CAP_OVERHANG: f32 = 5.0;
pub const PIPE_MIN_TOP: i32 = 100;
pub const PIPE_MAX_TOP: i32 = 450; // SCREEN_HEIGHT - 150
/// A new pipe enters once the last one is this far from the right edge.
pub const PIPE_SPAWN_SPACING: f32 = 400.0;
pub const PIPE_FAR_CUTOFF: f32 = -200.0;
pub const INITIAL_PIPES: usize = 3;

// ── Power-ups ─────────────────────────────────────────────────────────────────

pub const POWER_UP_SIZE: f32 = 30.0;
pub const POWER_UP_SPEED: f32 = 3.0;
pub const POWER_UP_COOLDOWN: u32 = 180;
pub const POWER_UP_SPAWN_CHANCE: f64 = 0.01;
pub const POWER_UP_MAX_ATTEMPTS: u32 = 50;
pub const POWER_UP_MIN_Y: i32 = 150;
pub const POWER_UP_MAX_Y: i32 = 350; // SCREEN_HEIGHT - 250
pub const POWER_UP_PIPE_PROXIMITY: f32 = 200.0;
pub const POWER_UP_SPAWN_X: f32 = SCREEN_WIDTH + 50.0;
pub const POWER_UP_DESPAWN_X: f32 = -50.0;

// Effect durations in ticks.
pub const SHIELD_DURATION: u32 = 600;
pub const MAGNET_DURATION: u32 = 1200;
pub const DOUBLE_POINTS_DURATION: u32 = 1800;
pub const SLOW_MOTION_DURATION: u32 = 300;
