/// The sound capability the simulation fires cues into.
///
/// Cues are fire-and-forget; the simulation never observes a result.  The
/// terminal frontend has no sample playback, so the shipped
/// implementations either drop cues or surface them through the `log`
/// facade.

/// A single sound event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    PlayerFire,
    AdversaryFire,
}

pub trait Audio {
    fn play(&mut self, cue: Cue);
}

/// Discards every cue.  Used by tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl Audio for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Surfaces cues as debug log lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogAudio;

impl Audio for LogAudio {
    fn play(&mut self, cue: Cue) {
        log::debug!("cue: {:?}", cue);
    }
}
