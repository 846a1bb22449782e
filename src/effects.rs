//! Decorative effects: particles, glows, drifting clouds and screen shake.
//!
//! Nothing here feeds back into gameplay. Effects are spawned from the
//! `GameEvent`s a tick produces and keep decaying while the game is over.

use rand::Rng;

use crate::constants::SCREEN_WIDTH;
use crate::entities::GameEvent;

const PARTICLE_GRAVITY: f32 = 0.2;
const PARTICLE_DRAG: f32 = 0.95;
const STAR_PARTICLES: usize = 15;
const CRASH_PARTICLES: usize = 30;
const MAX_SHAKE: f32 = 30.0;
const SHAKE_DECAY: f32 = 0.9;
const SHAKE_STAR: f32 = 3.0;
const SHAKE_CRASH: f32 = 20.0;
const CLOUD_COUNT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    /// Yellow sparkle from scoring or a pickup.
    Star,
    /// Red debris from a crash.
    Debris,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub size: f32,
    pub kind: ParticleKind,
}

impl Particle {
    /// Returns false once the particle has burnt out.
    pub fn update(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += PARTICLE_GRAVITY;
        self.vx *= PARTICLE_DRAG;
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }

    /// Remaining life in `0.0..=1.0`, used for fading.
    pub fn fade(&self) -> f32 {
        self.lifetime as f32 / self.max_lifetime.max(1) as f32
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Glow {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub lifetime: f32,
    pub intensity: f32,
}

impl Glow {
    pub fn update(&mut self) -> bool {
        self.lifetime -= 0.5;
        self.lifetime > 0.0
    }

    pub fn current_radius(&self) -> f32 {
        self.radius * (self.lifetime / self.intensity).max(0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// Depth factor; nearer clouds move faster.
    pub z: f32,
}

impl Cloud {
    fn random(x: f32, rng: &mut impl Rng) -> Self {
        Self {
            x,
            y: rng.gen_range(50..=250) as f32,
            speed: rng.gen_range(0.5..1.5),
            z: rng.gen_range(0.5..2.0),
        }
    }

    fn update(&mut self, rng: &mut impl Rng) {
        self.x -= self.speed * self.z;
        if self.x < -300.0 {
            self.x = SCREEN_WIDTH + 150.0;
            self.y = rng.gen_range(50..=250) as f32;
            self.z = rng.gen_range(0.5..2.0);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub glows: Vec<Glow>,
    pub clouds: Vec<Cloud>,
    pub shake_intensity: f32,
    pub shake_x: i32,
    pub shake_y: i32,
}

impl Effects {
    /// A fresh set of effects with the sky's clouds scattered across two
    /// screen widths.
    pub fn new(rng: &mut impl Rng) -> Self {
        let clouds = (0..CLOUD_COUNT)
            .map(|_| {
                let x = rng.gen_range(0..=(SCREEN_WIDTH as i32 * 2)) as f32;
                Cloud::random(x, rng)
            })
            .collect();
        Self {
            clouds,
            ..Self::default()
        }
    }

    /// Presentation jitter to add to on-screen text, in world units.
    pub fn shake_offset(&self) -> (i32, i32) {
        (self.shake_x, self.shake_y)
    }

    pub fn add_shake(&mut self, amount: f32) {
        self.shake_intensity = (self.shake_intensity + amount).min(MAX_SHAKE);
    }

    /// Advance one tick. While playing, a settled shake snaps to zero;
    /// after game over it keeps decaying and re-rolling every tick.
    pub fn update(&mut self, game_over: bool, rng: &mut impl Rng) {
        if game_over || self.shake_intensity > 0.1 {
            self.shake_intensity *= SHAKE_DECAY;
            let reach = self.shake_intensity as i32;
            self.shake_x = rng.gen_range(-reach..=reach);
            self.shake_y = rng.gen_range(-reach..=reach);
        } else {
            self.shake_x = 0;
            self.shake_y = 0;
        }

        self.particles.retain_mut(Particle::update);
        self.glows.retain_mut(Glow::update);

        if !game_over {
            for cloud in &mut self.clouds {
                cloud.update(rng);
            }
        }
    }

    pub fn on_event(&mut self, event: &GameEvent, rng: &mut impl Rng) {
        match *event {
            GameEvent::Scored { x, y, .. } | GameEvent::PowerUpCollected { x, y, .. } => {
                self.burst_stars(x, y, rng);
            }
            GameEvent::Crashed { x, y } => self.burst_debris(x, y, rng),
            GameEvent::NewRecord { .. } => {}
        }
    }

    fn burst_stars(&mut self, x: f32, y: f32, rng: &mut impl Rng) {
        for _ in 0..STAR_PARTICLES {
            let lifetime = rng.gen_range(20..=40);
            self.particles.push(Particle {
                x,
                y,
                vx: rng.gen_range(-3.0..3.0),
                vy: rng.gen_range(-6.0..-2.0),
                lifetime,
                max_lifetime: lifetime,
                size: rng.gen_range(2.0..5.0),
                kind: ParticleKind::Star,
            });
        }
        self.glows.push(Glow {
            x,
            y,
            radius: 50.0,
            lifetime: 15.0,
            intensity: 15.0,
        });
        self.add_shake(SHAKE_STAR);
    }

    fn burst_debris(&mut self, x: f32, y: f32, rng: &mut impl Rng) {
        for _ in 0..CRASH_PARTICLES {
            let lifetime = rng.gen_range(15..=30);
            self.particles.push(Particle {
                x,
                y,
                vx: rng.gen_range(-8.0..8.0),
                vy: rng.gen_range(-8.0..8.0),
                lifetime,
                max_lifetime: lifetime,
                size: rng.gen_range(2.0..5.0),
                kind: ParticleKind::Debris,
            });
        }
        self.add_shake(SHAKE_CRASH);
    }
}
