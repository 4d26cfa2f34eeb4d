mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal,
    ExecutableCommand,
};
use rand::thread_rng;

use space_game::audio::LogAudio;
use space_game::compute::{init_session, start, sweep, terminal_check, tick};
use space_game::entities::{Phase, Session};
use space_game::input::{Dir, InputState};

const FRAME: Duration = Duration::from_millis(33); // ≈30 FPS

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 4 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 4;

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEYS: [KeyCode; 4] = [
    KeyCode::Up,
    KeyCode::Char('w'),
    KeyCode::Char('W'),
    KeyCode::Char(' '),
];

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

// ── Frame pacing ──────────────────────────────────────────────────────────────

/// Fixed-period driver the session is armed against.  The simulation
/// pipeline only runs while the pacer is armed; the terminal check disarms
/// it and a later start trigger re-arms it, so the caption screens and the
/// gameplay pipeline are mutually exclusive by construction.
struct Pacer {
    period: Duration,
    armed: bool,
}

impl Pacer {
    fn new(period: Duration) -> Self {
        Self {
            period,
            armed: false,
        }
    }

    fn start(&mut self) {
        self.armed = true;
    }

    fn stop(&mut self) {
        self.armed = false;
    }

    fn armed(&self) -> bool {
        self.armed
    }

    /// Sleep off the remainder of the frame period.
    fn wait(&self, frame_start: Instant) {
        let elapsed = frame_start.elapsed();
        if elapsed < self.period {
            thread::sleep(self.period - elapsed);
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until a quit key arrives.
///
/// Input model: key events only ever mutate the `InputState` buffer; the
/// simulation reads one snapshot per tick.  A `key_frame` map records the
/// frame of the last press/repeat event for every key so that direction
/// keys also expire on terminals that never send key-release events.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut audio = LogAudio;
    let mut input = InputState::new();
    let mut pacer = Pacer::new(FRAME);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);

                    if kind == KeyEventKind::Press {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c')
                                if modifiers.contains(KeyModifiers::CONTROL) =>
                            {
                                return Ok(());
                            }
                            _ => {}
                        }
                    }

                    if LEFT_KEYS.contains(&code) {
                        input.press(Dir::Left);
                    } else if RIGHT_KEYS.contains(&code) {
                        input.press(Dir::Right);
                    } else if FIRE_KEYS.contains(&code) {
                        input.press_fire();
                    }

                    // Any key press off the run screen starts a run.
                    if kind == KeyEventKind::Press && session.phase != Phase::Running {
                        *session = start(session);
                        pacer.start();
                        log::info!("game started");
                    }
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                    if LEFT_KEYS.contains(&code) {
                        input.release(Dir::Left);
                    } else if RIGHT_KEYS.contains(&code) {
                        input.release(Dir::Right);
                    }
                }
            }
        }

        // Classic terminals never send releases; expire stale directions.
        // Releasing the inactive direction is a no-op.
        if !LEFT_KEYS.iter().any(|k| is_held(&key_frame, k, frame)) {
            input.release(Dir::Left);
        }
        if !RIGHT_KEYS.iter().any(|k| is_held(&key_frame, k, frame)) {
            input.release(Dir::Right);
        }

        // ── Fixed pipeline: update → collide → spawn → render → cleanup ──────
        if pacer.armed() {
            let snapshot = input.snapshot();
            *session = tick(session, &snapshot, &mut rng, &mut audio);
            display::render(out, session)?;
            *session = sweep(session);
            *session = terminal_check(session);
            if session.phase == Phase::GameOver {
                pacer.stop();
            }
        } else {
            // Title / game-over caption frames at the same fixed rate.
            display::render(out, session)?;
        }

        pacer.wait(frame_start);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    env_logger::init();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back
    // to the hold-window expiry in the game loop.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut session = init_session();
    let result = game_loop(&mut out, &mut session, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
