/// All game entity types — pure data, no logic.

/// Where a session sits in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Title,
    Running,
    GameOver,
}

/// The shared moving-object record: a box centered at (x, y) with
/// half-extents (w, h), translated by (sx, sy) once per tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    pub sx: f64,
    pub sy: f64,
    pub w: f64,
    pub h: f64,
    /// Cleared to mark the entity for removal at the next cleanup phase.
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub sprite: Sprite,
    /// May dip below zero inside the tick that ends the run; the terminal
    /// check owns game-over detection.
    pub health: i32,
    pub score: u32,
    /// Best score seen over the process lifetime; survives resets.
    pub hiscore: u32,
    /// Ticks remaining before the next shot is allowed.
    pub cooldown: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Adversary {
    pub sprite: Sprite,
}

/// A projectile.  The owning collection decides its motion and death rule.
#[derive(Clone, Debug, PartialEq)]
pub struct Shot {
    pub sprite: Sprite,
}

/// Anchor of the scrolling starfield.  Not alive-tracked, never collides,
/// never removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    pub sprite: Sprite,
}

/// The whole mutable game state.  Cloneable so the pure pipeline
/// functions can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub player: Player,
    pub background: Background,
    pub adversaries: Vec<Adversary>,
    pub player_shots: Vec<Shot>,
    pub adversary_shots: Vec<Shot>,
    pub phase: Phase,
    pub width: f64,
    pub height: f64,
    pub frame: u64,
}
