/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `Session` and returns a brand-new `Session`.  Side effects are limited
/// to the injected capabilities: the RNG (so callers control determinism)
/// and the audio sink.
///
/// The driver sequences one tick as: [`tick`] (update, collide, spawn) →
/// render → [`sweep`] (cleanup) → [`terminal_check`].

use rand::Rng;

use crate::audio::{Audio, Cue};
use crate::consts::*;
use crate::entities::{Adversary, Background, Phase, Player, Session, Shot, Sprite};
use crate::input::{Dir, TickInput};

// ── Geometry ─────────────────────────────────────────────────────────────────

/// Axis-aligned box overlap.  Boxes are centered with half-extents, so the
/// horizontal intervals intersect iff |Δx| ≤ w_a + w_b, regardless of which
/// box sits inside the other; border contact counts as overlap.
pub fn overlaps(a: &Sprite, b: &Sprite) -> bool {
    (a.x - b.x).abs() <= a.w + b.w && (a.y - b.y).abs() <= a.h + b.h
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn player_sprite() -> Sprite {
    Sprite {
        x: FIELD_WIDTH / 2.0,
        y: FIELD_HEIGHT * 7.0 / 8.0,
        sx: 0.0,
        sy: 0.0,
        w: PLAYER_HALF_W,
        h: PLAYER_HALF_H,
        alive: true,
    }
}

/// Build a fresh session on the title screen.
pub fn init_session() -> Session {
    Session {
        player: Player {
            sprite: player_sprite(),
            health: START_HEALTH,
            score: 0,
            hiscore: 0,
            cooldown: 0,
        },
        background: Background {
            sprite: Sprite {
                x: FIELD_WIDTH / 2.0,
                y: FIELD_HEIGHT / 2.0,
                sx: 0.0,
                sy: BACKGROUND_DRIFT,
                w: FIELD_WIDTH / 2.0,
                h: FIELD_HEIGHT / 2.0,
                alive: true,
            },
        },
        adversaries: Vec::new(),
        player_shots: Vec::new(),
        adversary_shots: Vec::new(),
        phase: Phase::Title,
        width: FIELD_WIDTH,
        height: FIELD_HEIGHT,
        frame: 0,
    }
}

/// Begin a run from the title or game-over screen.  Player stats return to
/// their initial values, the dynamic collections are cleared and the high
/// score carries over.  A start while a run is active is a silent no-op.
pub fn start(state: &Session) -> Session {
    if state.phase == Phase::Running {
        return state.clone();
    }
    Session {
        player: Player {
            sprite: player_sprite(),
            health: START_HEALTH,
            score: 0,
            hiscore: state.player.hiscore,
            cooldown: 0,
        },
        adversaries: Vec::new(),
        player_shots: Vec::new(),
        adversary_shots: Vec::new(),
        phase: Phase::Running,
        frame: 0,
        ..state.clone()
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// Each tick, with probability 1/61, one adversary enters at a uniformly
/// random column along the top edge.
pub fn maybe_spawn_adversary(rng: &mut impl Rng, width: f64) -> Option<Adversary> {
    if !rng.gen_ratio(1, SPAWN_ODDS) {
        return None;
    }
    Some(Adversary {
        sprite: Sprite {
            x: rng.gen_range(0.0..=width),
            y: 0.0,
            sx: 0.0,
            sy: ADVERSARY_SPEED,
            w: ADVERSARY_HALF_W,
            h: ADVERSARY_HALF_H,
            alive: true,
        },
    })
}

// ── Per-entity update rules ──────────────────────────────────────────────────

fn update_player(
    p: &Player,
    input: &TickInput,
    width: f64,
    audio: &mut impl Audio,
) -> (Player, Option<Shot>) {
    let mut sprite = p.sprite.clone();
    sprite.sx = match input.steer {
        Some(Dir::Left) => -BASE_SPEED,
        Some(Dir::Right) => BASE_SPEED,
        None => 0.0,
    };
    sprite.x += sprite.sx;
    sprite.y += sprite.sy;
    sprite.x = sprite.x.clamp(sprite.w, width - sprite.w);

    let hiscore = p.hiscore.max(p.score);
    let mut cooldown = p.cooldown.saturating_sub(1);

    let mut fired = None;
    if input.fire && cooldown == 0 {
        fired = Some(Shot {
            sprite: Sprite {
                x: sprite.x,
                // muzzle sits a third of the hull above center
                y: sprite.y - sprite.h * 2.0 / 3.0,
                sx: 0.0,
                sy: -SHOT_SPEED,
                w: SHOT_HALF_W,
                h: SHOT_HALF_H,
                alive: true,
            },
        });
        cooldown = COOLDOWN_TICKS;
        audio.play(Cue::PlayerFire);
    }

    (
        Player {
            sprite,
            health: p.health,
            score: p.score,
            hiscore,
            cooldown,
        },
        fired,
    )
}

fn update_adversary(
    a: &Adversary,
    height: f64,
    rng: &mut impl Rng,
    audio: &mut impl Audio,
) -> (Adversary, Option<Shot>) {
    let mut sprite = a.sprite.clone();
    sprite.x += sprite.sx;
    sprite.y += sprite.sy;
    if sprite.y > height {
        sprite.alive = false;
    }

    // The fire roll runs even on the tick the adversary leaves the field.
    let shot = if rng.gen_ratio(1, SPAWN_ODDS) {
        audio.play(Cue::AdversaryFire);
        Some(Shot {
            sprite: Sprite {
                x: sprite.x,
                y: sprite.y + sprite.h,
                sx: 0.0,
                sy: SHOT_SPEED,
                w: SHOT_HALF_W,
                h: SHOT_HALF_H,
                alive: true,
            },
        })
    } else {
        None
    };

    (Adversary { sprite }, shot)
}

fn advance_player_shot(s: &Shot) -> Shot {
    let mut sprite = s.sprite.clone();
    sprite.x += sprite.sx;
    sprite.y += sprite.sy;
    if sprite.y < 0.0 {
        sprite.alive = false;
    }
    Shot { sprite }
}

fn advance_adversary_shot(s: &Shot, height: f64) -> Shot {
    let mut sprite = s.sprite.clone();
    sprite.x += sprite.sx;
    sprite.y += sprite.sy;
    if sprite.y > height {
        sprite.alive = false;
    }
    Shot { sprite }
}

// ── Collision resolver ───────────────────────────────────────────────────────

/// Pairwise interaction rules, applied in fixed precedence order.  An
/// entity dies to at most one rule per tick; later rules skip entities
/// already marked dead.
pub fn resolve_collisions(
    player: &mut Player,
    adversaries: &mut [Adversary],
    player_shots: &mut [Shot],
    adversary_shots: &mut [Shot],
) {
    // 1. player rams an adversary
    for a in adversaries.iter_mut() {
        if !a.sprite.alive {
            continue;
        }
        if overlaps(&player.sprite, &a.sprite) {
            a.sprite.alive = false;
            player.health -= DAMAGE_RAM;
            player.score += SCORE_ADVERSARY;
            log::debug!("bang");
        }
    }

    // 2. player shot downs an adversary
    for a in adversaries.iter_mut() {
        if !a.sprite.alive {
            continue;
        }
        for s in player_shots.iter_mut() {
            if !s.sprite.alive {
                continue;
            }
            if overlaps(&a.sprite, &s.sprite) {
                a.sprite.alive = false;
                s.sprite.alive = false;
                player.score += SCORE_ADVERSARY;
                log::debug!("boom");
                break;
            }
        }
    }

    // 3. shots intercept each other
    for eb in adversary_shots.iter_mut() {
        if !eb.sprite.alive {
            continue;
        }
        for hb in player_shots.iter_mut() {
            if !hb.sprite.alive {
                continue;
            }
            if overlaps(&eb.sprite, &hb.sprite) {
                eb.sprite.alive = false;
                hb.sprite.alive = false;
                player.score += SCORE_SHOT;
                break;
            }
        }
    }

    // 4. adversary shot grazes the player
    for eb in adversary_shots.iter_mut() {
        if !eb.sprite.alive {
            continue;
        }
        if overlaps(&player.sprite, &eb.sprite) {
            eb.sprite.alive = false;
            player.health -= DAMAGE_SHOT;
            player.score += SCORE_SHOT;
        }
    }
}

// ── Per-tick pipeline ────────────────────────────────────────────────────────

/// Advance the simulation by one tick: entity updates, collision
/// resolution, then the adversary spawn attempt.  The caller renders the
/// result, then runs [`sweep`] and [`terminal_check`], so an entity that
/// died this tick is still drawn once.
pub fn tick(
    state: &Session,
    input: &TickInput,
    rng: &mut impl Rng,
    audio: &mut impl Audio,
) -> Session {
    let frame = state.frame + 1;

    // ── 1. Update every entity ───────────────────────────────────────────────
    let (mut player, fired) = update_player(&state.player, input, state.width, audio);

    let mut background = state.background.clone();
    background.sprite.y += background.sprite.sy;

    let mut player_shots: Vec<Shot> = state.player_shots.iter().map(advance_player_shot).collect();
    if let Some(shot) = fired {
        player_shots.push(shot);
    }

    let mut adversary_shots: Vec<Shot> = state
        .adversary_shots
        .iter()
        .map(|s| advance_adversary_shot(s, state.height))
        .collect();

    let mut adversaries = Vec::with_capacity(state.adversaries.len());
    for a in &state.adversaries {
        let (a, shot) = update_adversary(a, state.height, rng, audio);
        if let Some(s) = shot {
            adversary_shots.push(s);
        }
        adversaries.push(a);
    }

    // ── 2. Resolve collisions ────────────────────────────────────────────────
    resolve_collisions(
        &mut player,
        &mut adversaries,
        &mut player_shots,
        &mut adversary_shots,
    );

    // ── 3. Attempt an adversary spawn ────────────────────────────────────────
    if let Some(a) = maybe_spawn_adversary(rng, state.width) {
        adversaries.push(a);
    }

    Session {
        player,
        background,
        adversaries,
        player_shots,
        adversary_shots,
        frame,
        ..state.clone()
    }
}

/// Cleanup phase — drops every entity whose `alive` flag fell this tick.
/// Survivor order is preserved; the player and background are not
/// alive-tracked and never removed.
pub fn sweep(state: &Session) -> Session {
    let adversaries: Vec<Adversary> = state
        .adversaries
        .iter()
        .filter(|a| a.sprite.alive)
        .cloned()
        .collect();
    let player_shots: Vec<Shot> = state
        .player_shots
        .iter()
        .filter(|s| s.sprite.alive)
        .cloned()
        .collect();
    let adversary_shots: Vec<Shot> = state
        .adversary_shots
        .iter()
        .filter(|s| s.sprite.alive)
        .cloned()
        .collect();

    log::debug!(
        "sprite count: {}",
        2 + adversaries.len() + player_shots.len() + adversary_shots.len()
    );

    Session {
        adversaries,
        player_shots,
        adversary_shots,
        ..state.clone()
    }
}

/// End-of-tick terminal check.  A run ends when health is non-positive;
/// the final score is folded into the high score before the transition.
pub fn terminal_check(state: &Session) -> Session {
    if state.phase != Phase::Running || state.player.health > 0 {
        return state.clone();
    }
    let mut player = state.player.clone();
    player.hiscore = player.hiscore.max(player.score);
    Session {
        player,
        phase: Phase::GameOver,
        ..state.clone()
    }
}
