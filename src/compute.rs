/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`, plus the `FrameEvent`s it produced when the view layer
/// cares about them.  Side effects are limited to the injected RNG and
/// `tracing` output.

use rand::Rng;

use crate::collision::{AabbOverlap, OverlapDetector};
use crate::config::GameConfig;
use crate::entities::{
    Bullet, Enemy, FrameEvent, GameState, GameStatus, Input, Player, RunState,
};
use crate::pool::Pool;

// ── Difficulty ramps ─────────────────────────────────────────────────────────

/// Ms until the next spawn after `elapsed_secs` of play:
/// `clamp(max - elapsed * ramp, min, max)`.
pub fn spawn_interval_ms(config: &GameConfig, elapsed_secs: f32) -> f32 {
    let e = &config.enemy;
    (e.max_spawn_interval_ms - elapsed_secs * e.spawn_ramp_per_second_ms)
        .min(e.max_spawn_interval_ms)
        .max(e.min_spawn_interval_ms)
}

/// HP of an enemy spawned while the score is `score`.
pub fn enemy_hp_for_score(config: &GameConfig, score: u32) -> u32 {
    let e = &config.enemy;
    let ramp = (score / e.hp_ramp_every_points).saturating_mul(e.hp_ramp_amount);
    e.hp_base.saturating_add(ramp)
}

/// 1-based difficulty step shown in the HUD; bumps whenever enemy HP does.
pub fn difficulty_level(config: &GameConfig, score: u32) -> u32 {
    1 + score / config.enemy.hp_ramp_every_points
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a run.
pub fn init_state(config: GameConfig) -> GameState {
    GameState {
        player: Player {
            x: config.screen.width / 2.0,
            y: config.player_y(),
            vx: 0.0,
            hp: config.player.max_hp,
            width: config.player.width,
            height: config.player.height,
        },
        bullets: Pool::new(),
        enemies: Pool::new(),
        run: RunState {
            score: 0,
            elapsed_ms: 0.0,
            fire_cooldown_ms: 0.0,
            spawn_cooldown_ms: spawn_interval_ms(&config, 0.0),
            status: GameStatus::Running,
            missing_body_warned: false,
        },
        config,
    }
}

/// Leave `GameOver` (or abandon a running game) and start a fresh run with
/// the same configuration.
pub fn restart(state: &GameState) -> GameState {
    tracing::info!(previous_score = state.run.score, "restarting run");
    init_state(state.config.clone())
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

pub fn move_player(state: &GameState, input: Input, dt_secs: f32) -> GameState {
    let mut next = state.clone();
    apply_movement(&mut next, input, dt_secs);
    next
}

fn apply_movement(state: &mut GameState, input: Input, dt_secs: f32) {
    let speed = state.config.player.speed;
    let half = state.player.width / 2.0;
    let max_x = state.config.screen.width - half;

    state.player.vx = input.direction() * speed;
    state.player.x = (state.player.x + state.player.vx * dt_secs).min(max_x).max(half);
}

// ── Timers ───────────────────────────────────────────────────────────────────

/// Run the fire-rate timer for `delta_ms`.  A long tick fires every shot it
/// covers: the cooldown is re-armed by adding the interval, never reset.
pub fn fire_weapon(state: &GameState, delta_ms: f32) -> (GameState, Vec<FrameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    step_fire(&mut next, delta_ms, &mut events);
    (next, events)
}

fn step_fire(state: &mut GameState, delta_ms: f32, events: &mut Vec<FrameEvent>) {
    let interval = state.config.fire_interval_ms();
    state.run.fire_cooldown_ms -= delta_ms;

    while state.run.fire_cooldown_ms <= 0.0 {
        let weapon = &state.config.weapon;
        state.bullets.spawn(Bullet {
            x: state.player.x,
            y: state.player.bounds().top(),
            vy: -weapon.bullet_speed,
            damage: weapon.bullet_damage,
            width: weapon.bullet_width,
            height: weapon.bullet_height,
        });
        events.push(FrameEvent::BulletFired);
        state.run.fire_cooldown_ms += interval;
    }
}

/// Run the spawn timer for `delta_ms`, one enemy per expiry.  The next
/// interval is taken from the ramp at the current elapsed time.
pub fn spawn_enemies(
    state: &GameState,
    delta_ms: f32,
    rng: &mut impl Rng,
) -> (GameState, Vec<FrameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    step_spawn(&mut next, delta_ms, rng, &mut events);
    (next, events)
}

fn step_spawn(
    state: &mut GameState,
    delta_ms: f32,
    rng: &mut impl Rng,
    events: &mut Vec<FrameEvent>,
) {
    let elapsed_secs = state.run.elapsed_ms / 1000.0;
    state.run.spawn_cooldown_ms -= delta_ms;

    while state.run.spawn_cooldown_ms <= 0.0 {
        let enemy = new_enemy(state, rng);
        events.push(FrameEvent::EnemySpawned { hp: enemy.hp });
        state.enemies.spawn(enemy);
        state.run.spawn_cooldown_ms += spawn_interval_ms(&state.config, elapsed_secs);
    }
}

fn new_enemy(state: &GameState, rng: &mut impl Rng) -> Enemy {
    let cfg = &state.config.enemy;
    let margin = cfg.width / 2.0;
    let max_x = state.config.screen.width - margin;
    let x = if max_x > margin {
        rng.gen_range(margin..=max_x)
    } else {
        state.config.screen.width / 2.0
    };

    Enemy {
        x,
        y: -cfg.height / 2.0,
        vy: cfg.speed,
        hp: enemy_hp_for_score(&state.config, state.run.score),
        contact_damage: cfg.contact_damage,
        width: cfg.width,
        height: cfg.height,
    }
}

// ── Motion ───────────────────────────────────────────────────────────────────

fn integrate(state: &mut GameState, dt_secs: f32) {
    for (_, bullet) in state.bullets.iter_mut() {
        bullet.y += bullet.vy * dt_secs;
    }
    for (_, enemy) in state.enemies.iter_mut() {
        enemy.y += enemy.vy * dt_secs;
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Apply every bullet–enemy overlap reported by `detector`.
pub fn resolve_collisions(
    state: &GameState,
    detector: &impl OverlapDetector,
) -> (GameState, Vec<FrameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    step_collisions(&mut next, detector, &mut events);
    (next, events)
}

fn step_collisions(
    state: &mut GameState,
    detector: &impl OverlapDetector,
    events: &mut Vec<FrameEvent>,
) {
    let pairs = detector.overlapping_pairs(&state.bullets, &state.enemies);
    for (bi, ei) in pairs {
        if !state.bullets.contains(bi) || !state.enemies.contains(ei) {
            if !state.run.missing_body_warned {
                tracing::warn!(
                    bullet = bi.0,
                    enemy = ei.0,
                    "overlap reported for an entity with no body; dropping pair"
                );
                state.run.missing_body_warned = true;
            }
            continue;
        }

        // Either side may already be gone from an earlier pair this tick.
        let damage = match state.bullets.get(bi) {
            Some(bullet) if state.enemies.is_alive(ei) => bullet.damage,
            _ => continue,
        };
        state.bullets.kill(bi);

        let remaining_hp = match state.enemies.get_mut(ei) {
            Some(enemy) => {
                enemy.hp = enemy.hp.saturating_sub(damage);
                enemy.hp
            }
            None => continue,
        };

        if remaining_hp == 0 {
            state.enemies.kill(ei);
            let points = state.config.score.points_per_enemy;
            state.run.score = state.run.score.saturating_add(points);
            events.push(FrameEvent::EnemyDestroyed { points });
        } else {
            events.push(FrameEvent::EnemyHit { remaining_hp });
        }
    }
}

// ── Cleanup sweep ────────────────────────────────────────────────────────────

/// Remove enemies that left the bottom or reached the player's row (the
/// latter hurt the player) and bullets that left the top.
pub fn sweep(state: &GameState) -> (GameState, Vec<FrameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    step_sweep(&mut next, &mut events);
    (next, events)
}

fn step_sweep(state: &mut GameState, events: &mut Vec<FrameEvent>) {
    let bottom = state.config.screen.height;
    let player_top = state.player.bounds().top();

    let escaped: Vec<_> = state
        .enemies
        .iter()
        .filter(|(_, e)| e.bounds().top() > bottom)
        .map(|(id, _)| id)
        .collect();
    for id in escaped {
        if state.enemies.kill(id) {
            events.push(FrameEvent::EnemyEscaped);
        }
    }

    let arrived: Vec<_> = state
        .enemies
        .iter()
        .filter(|(_, e)| e.bounds().bottom() >= player_top)
        .map(|(id, e)| (id, e.contact_damage))
        .collect();
    for (id, contact_damage) in arrived {
        if state.run.status == GameStatus::GameOver {
            break;
        }
        if state.enemies.kill(id) {
            apply_damage(state, contact_damage, events);
        }
    }

    let gone: Vec<_> = state
        .bullets
        .iter()
        .filter(|(_, b)| b.bounds().bottom() < 0.0)
        .map(|(id, _)| id)
        .collect();
    for id in gone {
        state.bullets.kill(id);
    }
}

// ── Damage & game over ───────────────────────────────────────────────────────

/// Take `amount` HP from the player.  Reaching 0 ends the run; a finished
/// run ignores further damage.
pub fn damage_player(state: &GameState, amount: u32) -> (GameState, Vec<FrameEvent>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    apply_damage(&mut next, amount, &mut events);
    (next, events)
}

fn apply_damage(state: &mut GameState, amount: u32, events: &mut Vec<FrameEvent>) {
    if state.run.status == GameStatus::GameOver {
        return;
    }

    state.player.hp = state.player.hp.saturating_sub(amount);
    events.push(FrameEvent::PlayerDamaged {
        amount,
        hp: state.player.hp,
    });

    if state.player.hp == 0 {
        state.run.status = GameStatus::GameOver;
        tracing::debug!(score = state.run.score, elapsed_ms = state.run.elapsed_ms, "game over");
        events.push(FrameEvent::GameOver {
            score: state.run.score,
        });
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by `delta_ms`.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameState,
    input: Input,
    delta_ms: f32,
    rng: &mut impl Rng,
) -> (GameState, Vec<FrameEvent>) {
    tick_with(state, input, delta_ms, rng, &AabbOverlap)
}

/// `tick` with a caller-supplied overlap detector.
pub fn tick_with(
    state: &GameState,
    input: Input,
    delta_ms: f32,
    rng: &mut impl Rng,
    detector: &impl OverlapDetector,
) -> (GameState, Vec<FrameEvent>) {
    let mut events = Vec::new();
    if state.run.status == GameStatus::GameOver {
        return (state.clone(), events);
    }

    let mut next = state.clone();
    let delta_ms = delta_ms.max(0.0);
    let dt_secs = delta_ms / 1000.0;
    next.run.elapsed_ms += delta_ms;

    // ── 1. Movement ──────────────────────────────────────────────────────────
    apply_movement(&mut next, input, dt_secs);

    // ── 2. Fire timer ────────────────────────────────────────────────────────
    step_fire(&mut next, delta_ms, &mut events);

    // ── 3. Spawn timer ───────────────────────────────────────────────────────
    step_spawn(&mut next, delta_ms, rng, &mut events);

    // ── 4. Move bullets & enemies ────────────────────────────────────────────
    integrate(&mut next, dt_secs);

    // ── 5. Collisions, then off-screen / reached-player sweep ────────────────
    step_collisions(&mut next, detector, &mut events);
    step_sweep(&mut next, &mut events);

    // ── 6. Reclaim tombstones ────────────────────────────────────────────────
    next.bullets.compact();
    next.enemies.compact();

    (next, events)
}
