/// Latched key intents.
///
/// The host-input adapter writes into an `InputState` whenever key events
/// arrive; the simulation reads one [`TickInput`] snapshot at the start of
/// the player's update and nowhere else, so input can never tear a tick
/// mid-pipeline.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    Left,
    Right,
}

/// The buffer the driver mutates as events arrive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputState {
    steer: Option<Dir>,
    fire: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A direction press always wins over the current one.
    pub fn press(&mut self, dir: Dir) {
        self.steer = Some(dir);
    }

    /// A release only clears the direction it matches; releasing the
    /// inactive direction has no effect.
    pub fn release(&mut self, dir: Dir) {
        if self.steer == Some(dir) {
            self.steer = None;
        }
    }

    pub fn press_fire(&mut self) {
        self.fire = true;
    }

    /// The once-per-tick read.  Steering persists across ticks; the fire
    /// latch is consumed.
    pub fn snapshot(&mut self) -> TickInput {
        let snap = TickInput {
            steer: self.steer,
            fire: self.fire,
        };
        self.fire = false;
        snap
    }
}

/// What one tick of the simulation sees of the keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    pub steer: Option<Dir>,
    pub fire: bool,
}
