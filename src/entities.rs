//! Game entity types: plain data plus the small per-tick update each entity
//! owns. Anything that involves more than one entity lives in `compute`,
//! `collision` or `spawner`.

use rand::Rng;

use crate::constants::{
    ANGLE_FACTOR, BIRD_HEIGHT, BIRD_START_Y, BIRD_WIDTH, BIRD_X, DOUBLE_POINTS_DURATION, GRAVITY,
    JUMP_STRENGTH, MAGNET_DURATION, MAGNET_FACTOR, MAX_ANGLE, PIPE_CAP_HEIGHT, PIPE_CAP_OVERHANG,
    PIPE_GAP, PIPE_MIN_TOP, PIPE_SPEED, PIPE_WIDTH, POWER_UP_SIZE, POWER_UP_SPEED, SCREEN_HEIGHT,
    SHIELD_DURATION, SLOW_MOTION_DURATION, SLOW_MOTION_FACTOR,
};
use crate::effects::Effects;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units, `(x, y)` being the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap test. Boxes that only share an edge do not collide,
    /// and empty boxes never collide with anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

// ── Timed effects ─────────────────────────────────────────────────────────────

/// One temporary modifier: an on/off flag plus the ticks it has left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EffectTimer {
    pub active: bool,
    pub remaining: u32,
}

impl EffectTimer {
    /// Switch the effect on for `duration` ticks. Picking the same effect up
    /// again restarts the countdown rather than adding to it.
    pub fn activate(&mut self, duration: u32) {
        self.active = true;
        self.remaining = duration;
    }

    pub fn tick(&mut self) {
        if !self.active {
            return;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.active = false;
        }
    }

    /// Whole seconds left, for the HUD.
    pub fn seconds_left(&self, fps: u32) -> u32 {
        self.remaining / fps.max(1)
    }
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    /// Pipes stop being solid. Ground and ceiling still kill.
    Shield,
    /// Multiplies vertical velocity by 1.1 every tick.
    Magnet,
    /// Each pipe passed is worth 2 points.
    DoublePoints,
    /// Halves gravity. Never produced by the spawner.
    SlowMotion,
}

impl PowerUpKind {
    /// The kinds the spawner draws from, uniformly.
    pub const SPAWNABLE: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::Magnet,
        PowerUpKind::DoublePoints,
    ];

    /// Ticks the effect lasts once collected.
    pub fn duration(self) -> u32 {
        match self {
            PowerUpKind::Shield => SHIELD_DURATION,
            PowerUpKind::Magnet => MAGNET_DURATION,
            PowerUpKind::DoublePoints => DOUBLE_POINTS_DURATION,
            PowerUpKind::SlowMotion => SLOW_MOTION_DURATION,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
    /// Phase of the pulsing animation; purely visual.
    pub animation: f32,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind) -> Self {
        Self {
            x,
            y,
            kind,
            animation: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.x -= POWER_UP_SPEED;
        self.animation += 0.2;
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, POWER_UP_SIZE, POWER_UP_SIZE)
    }
}

// ── Bird ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    /// Vertical velocity, positive = falling.
    pub velocity: f32,
    /// Tilt in degrees, derived from velocity and clamped to ±45.
    pub angle: f32,
    pub shield: EffectTimer,
    pub slow_motion: EffectTimer,
    pub magnet: EffectTimer,
    pub double_points: EffectTimer,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new(BIRD_X, BIRD_START_Y)
    }
}

impl Bird {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            velocity: 0.0,
            angle: 0.0,
            shield: EffectTimer::default(),
            slow_motion: EffectTimer::default(),
            magnet: EffectTimer::default(),
            double_points: EffectTimer::default(),
        }
    }

    /// Gravity for this tick, halved while slow motion is on.
    pub fn effective_gravity(&self) -> f32 {
        if self.slow_motion.active {
            GRAVITY * SLOW_MOTION_FACTOR
        } else {
            GRAVITY
        }
    }

    /// Advance one tick: effect timers first, then Euler integration.
    pub fn update(&mut self) {
        self.shield.tick();
        self.slow_motion.tick();
        self.magnet.tick();
        self.double_points.tick();

        self.velocity += self.effective_gravity();
        self.y += self.velocity;

        if self.magnet.active {
            self.velocity *= MAGNET_FACTOR;
        }

        self.angle = (-self.velocity * ANGLE_FACTOR).clamp(-MAX_ANGLE, MAX_ANGLE);
    }

    /// Replace the current velocity with the jump impulse.
    pub fn jump(&mut self) {
        self.velocity = JUMP_STRENGTH;
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        let timer = match kind {
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::Magnet => &mut self.magnet,
            PowerUpKind::DoublePoints => &mut self.double_points,
            PowerUpKind::SlowMotion => &mut self.slow_motion,
        };
        timer.activate(kind.duration());
    }

    pub fn hitbox(&self) -> Rect {
        Rect::new(self.x, self.y, BIRD_WIDTH, BIRD_HEIGHT)
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + BIRD_WIDTH / 2.0, self.y + BIRD_HEIGHT / 2.0)
    }
}

// ── Pipes ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Pipe {
    pub x: f32,
    /// Height of the upper segment; the gap starts here.
    pub top_height: f32,
    /// Where the lower segment starts. Always `top_height + PIPE_GAP`.
    pub bottom_y: f32,
    /// Set once the bird has been credited for passing this pipe.
    pub scored: bool,
}

impl Pipe {
    /// A pipe at `x` whose gap top is drawn uniformly from
    /// `PIPE_MIN_TOP..=max_top`.
    pub fn new(x: f32, max_top: i32, rng: &mut impl Rng) -> Self {
        let top_height = rng.gen_range(PIPE_MIN_TOP..=max_top.max(PIPE_MIN_TOP)) as f32;
        Self::with_top(x, top_height)
    }

    pub fn with_top(x: f32, top_height: f32) -> Self {
        Self {
            x,
            top_height,
            bottom_y: top_height + PIPE_GAP,
            scored: false,
        }
    }

    pub fn update(&mut self) {
        self.x -= PIPE_SPEED;
    }

    pub fn right_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    pub fn gap_center(&self) -> f32 {
        self.top_height + (self.bottom_y - self.top_height) / 2.0
    }

    /// True when `y` lies within the open gap (edges included).
    pub fn gap_contains(&self, y: f32) -> bool {
        y >= self.top_height && y <= self.bottom_y
    }

    /// The four solid boxes: top body, bottom body, top cap, bottom cap.
    /// Caps overhang the body on both sides.
    pub fn collision_rects(&self) -> [Rect; 4] {
        let cap_x = self.x - PIPE_CAP_OVERHANG;
        let cap_w = PIPE_WIDTH + PIPE_CAP_OVERHANG * 2.0;
        [
            Rect::new(self.x, 0.0, PIPE_WIDTH, self.top_height),
            Rect::new(
                self.x,
                self.bottom_y,
                PIPE_WIDTH,
                (SCREEN_HEIGHT - self.bottom_y).max(0.0),
            ),
            Rect::new(
                cap_x,
                self.top_height - PIPE_CAP_HEIGHT,
                cap_w,
                PIPE_CAP_HEIGHT,
            ),
            Rect::new(cap_x, self.bottom_y, cap_w, PIPE_CAP_HEIGHT),
        ]
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Device-independent player actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    /// Jump, or restart when the game is over.
    Jump,
    /// Mouse click; behaves exactly like `Jump`.
    PointerActivate,
    Quit,
}

/// Something that happened during a tick. Drives the decorative effects
/// and tells the orchestrator when to persist a record.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Scored { x: f32, y: f32, points: u32 },
    PowerUpCollected { kind: PowerUpKind, x: f32, y: f32 },
    Crashed { x: f32, y: f32 },
    NewRecord { score: u32 },
}

/// The entire game state. Cloneable so the update functions in `compute`
/// can return a new copy without touching the original; every field is
/// readable by the renderer.
#[derive(Clone, Debug)]
pub struct GameState {
    pub bird: Bird,
    /// Active pipes, oldest first.
    pub pipes: Vec<Pipe>,
    pub power_ups: Vec<PowerUp>,
    /// Ticks since the last successful power-up spawn.
    pub power_up_timer: u32,
    pub score: u32,
    /// Best score across sessions, as loaded from storage.
    pub high_score: u32,
    /// Set when this session beat the stored best.
    pub new_record: bool,
    pub status: GameStatus,
    pub frame: u64,
    /// Events produced by the most recent tick.
    pub events: Vec<GameEvent>,
    /// Particles, glows, clouds and screen shake. Never read by gameplay.
    pub effects: Effects,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }
}
