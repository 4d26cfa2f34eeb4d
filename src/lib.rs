//! A small fixed-tick space shooter for the terminal.
//!
//! The simulation is split the same way the binary is wired:
//! - [`entities`] — pure data: the shared sprite record, the per-kind
//!   structs and the session aggregate.
//! - [`compute`] — pure per-tick pipeline functions over the session.
//! - [`input`] — the latched key-intent buffer the driver writes and the
//!   simulation reads exactly once per tick.
//! - [`audio`] — the fire-and-forget sound-cue capability.
//!
//! The binary adds the crossterm driver (`main.rs`) and the rendering
//! adapter (`display.rs`); neither contains game logic.

pub mod audio;
pub mod compute;
pub mod entities;
pub mod input;

/// Game-space constants.  Distances are pixels in the fixed 480×720
/// field, velocities are pixels per 33 ms tick.
pub mod consts {
    /// Play-field dimensions.
    pub const FIELD_WIDTH: f64 = 480.0;
    pub const FIELD_HEIGHT: f64 = 720.0;

    /// Player footprint, horizontal speed and fire spacing.
    pub const PLAYER_HALF_W: f64 = 16.0;
    pub const PLAYER_HALF_H: f64 = 16.0;
    pub const BASE_SPEED: f64 = 4.0;
    /// Ticks between shots.
    pub const COOLDOWN_TICKS: u32 = 10;

    pub const ADVERSARY_HALF_W: f64 = 16.0;
    pub const ADVERSARY_HALF_H: f64 = 16.0;
    pub const ADVERSARY_SPEED: f64 = 5.0;

    pub const SHOT_HALF_W: f64 = 2.0;
    pub const SHOT_HALF_H: f64 = 8.0;
    pub const SHOT_SPEED: f64 = 10.0;

    /// 1-in-61 per tick.  Adversary arrivals and each live adversary's
    /// own fire decision roll independently at these odds.
    pub const SPAWN_ODDS: u32 = 61;

    /// Downward drift of the scrolling starfield.
    pub const BACKGROUND_DRIFT: f64 = 0.5;

    pub const START_HEALTH: i32 = 100;
    pub const DAMAGE_RAM: i32 = 10;
    pub const DAMAGE_SHOT: i32 = 5;
    pub const SCORE_ADVERSARY: u32 = 10;
    pub const SCORE_SHOT: u32 = 1;
}
