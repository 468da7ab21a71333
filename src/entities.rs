/// All game entity types — pure data, no logic.

use crate::config::GameConfig;
use crate::pool::Pool;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box given by its center and full size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Strict intersection: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        (self.x - other.x).abs() < (self.width + other.width) / 2.0
            && (self.y - other.y).abs() < (self.height + other.height) / 2.0
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Held state of the movement controls for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub left: bool,
    pub right: bool,
}

impl Input {
    /// -1, 0 or +1.  Holding both directions cancels out.
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

// ── Player, projectiles & enemies ─────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    /// Fixed for the whole run.
    pub y: f32,
    /// Horizontal velocity applied on the last tick (units per second).
    pub vx: f32,
    pub hp: u32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Negative: bullets only travel up.
    pub vy: f32,
    pub damage: u32,
    pub width: f32,
    pub height: f32,
}

impl Bullet {
    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub vy: f32,
    pub hp: u32,
    /// Damage dealt to the player on reaching the player's row.
    pub contact_damage: u32,
    pub width: f32,
    pub height: f32,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

// ── Run bookkeeping ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    pub score: u32,
    pub elapsed_ms: f32,
    /// Ms until the next shot; may go negative inside a tick.
    pub fire_cooldown_ms: f32,
    /// Ms until the next enemy spawn; may go negative inside a tick.
    pub spawn_cooldown_ms: f32,
    pub status: GameStatus,
    /// Set once a collision pair named an entity with no body this run.
    pub missing_body_warned: bool,
}

/// Something that happened during a tick that the view layer may react to.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    BulletFired,
    EnemySpawned { hp: u32 },
    EnemyHit { remaining_hp: u32 },
    EnemyDestroyed { points: u32 },
    /// An enemy left the bottom of the screen without touching the player.
    EnemyEscaped,
    PlayerDamaged { amount: u32, hp: u32 },
    GameOver { score: u32 },
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub bullets: Pool<Bullet>,
    pub enemies: Pool<Enemy>,
    pub run: RunState,
    pub config: GameConfig,
}
