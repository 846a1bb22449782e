//! Simulation core for a Flappy Bird style arcade game.
//!
//! The library holds everything that decides gameplay: entity data,
//! per-tick physics, collision and scoring, spawning, and the session
//! state machine. Rendering and terminal input live in the binary.

pub mod collision;
pub mod compute;
pub mod constants;
pub mod effects;
pub mod entities;
pub mod game;
pub mod persistence;
pub mod spawner;
