//! Tunable game parameters.
//!
//! Every section falls back to its defaults when missing from a config
//! file, so a JSON file only needs to name the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    pub background_color: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 480.0,
            height: 800.0,
            background_color: 0x181d27,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed in world units per second.
    pub speed: f32,
    pub max_hp: u32,
    /// Distance of the player's center from the bottom of the screen.
    pub y_offset: f32,
    pub color: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 72.0,
            height: 24.0,
            speed: 320.0,
            max_hp: 5,
            y_offset: 48.0,
            color: 0x4cc9f0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    pub shots_per_second: f32,
    pub bullet_speed: f32,
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_damage: u32,
    pub bullet_color: u32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            shots_per_second: 4.0,
            bullet_speed: 560.0,
            bullet_width: 8.0,
            bullet_height: 18.0,
            bullet_damage: 1,
            bullet_color: 0xf8fafc,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub min_spawn_interval_ms: f32,
    pub max_spawn_interval_ms: f32,
    /// How many ms the spawn interval shrinks per elapsed second.
    pub spawn_ramp_per_second_ms: f32,
    pub hp_base: u32,
    pub hp_ramp_every_points: u32,
    pub hp_ramp_amount: u32,
    pub contact_damage: u32,
    pub color: u32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            width: 42.0,
            height: 42.0,
            speed: 95.0,
            min_spawn_interval_ms: 350.0,
            max_spawn_interval_ms: 900.0,
            spawn_ramp_per_second_ms: 12.0,
            hp_base: 2,
            hp_ramp_every_points: 10,
            hp_ramp_amount: 1,
            contact_damage: 1,
            color: 0xef4444,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub points_per_enemy: u32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self { points_per_enemy: 10 }
    }
}

/// Parameters for the hit pulse the view plays when the player takes damage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub hit_flash_duration_ms: f32,
    pub hit_flash_color: u32,
    pub hit_shake_duration_ms: f32,
    /// Shake amplitude as a fraction of the screen width.
    pub hit_shake_intensity: f32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            hit_flash_duration_ms: 120.0,
            hit_flash_color: 0xffffff,
            hit_shake_duration_ms: 120.0,
            hit_shake_intensity: 0.004,
        }
    }
}

// ── Root ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub player: PlayerConfig,
    pub weapon: WeaponConfig,
    pub enemy: EnemyConfig,
    pub score: ScoreConfig,
    pub effects: EffectsConfig,
}

impl GameConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate the JSON config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen.width", self.screen.width)?;
        positive("screen.height", self.screen.height)?;
        positive("player.width", self.player.width)?;
        positive("player.height", self.player.height)?;
        non_negative("player.speed", self.player.speed)?;
        positive("weapon.shots_per_second", self.weapon.shots_per_second)?;
        positive("weapon.bullet_width", self.weapon.bullet_width)?;
        positive("weapon.bullet_height", self.weapon.bullet_height)?;
        non_negative("weapon.bullet_speed", self.weapon.bullet_speed)?;
        positive("enemy.width", self.enemy.width)?;
        positive("enemy.height", self.enemy.height)?;
        non_negative("enemy.speed", self.enemy.speed)?;
        positive("enemy.min_spawn_interval_ms", self.enemy.min_spawn_interval_ms)?;
        non_negative("enemy.spawn_ramp_per_second_ms", self.enemy.spawn_ramp_per_second_ms)?;
        non_negative("effects.hit_shake_intensity", self.effects.hit_shake_intensity)?;

        if self.player.max_hp == 0 {
            return Err(ConfigError::Invalid {
                field: "player.max_hp",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.enemy.hp_base == 0 {
            return Err(ConfigError::Invalid {
                field: "enemy.hp_base",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.weapon.bullet_damage == 0 {
            return Err(ConfigError::Invalid {
                field: "weapon.bullet_damage",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.enemy.contact_damage == 0 {
            return Err(ConfigError::Invalid {
                field: "enemy.contact_damage",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.enemy.hp_ramp_every_points == 0 {
            return Err(ConfigError::Invalid {
                field: "enemy.hp_ramp_every_points",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.enemy.min_spawn_interval_ms > self.enemy.max_spawn_interval_ms {
            return Err(ConfigError::SpawnIntervalRange {
                min_ms: self.enemy.min_spawn_interval_ms,
                max_ms: self.enemy.max_spawn_interval_ms,
            });
        }
        if self.player.width > self.screen.width {
            return Err(ConfigError::PlayerWiderThanScreen {
                player_width: self.player.width,
                screen_width: self.screen.width,
            });
        }
        if self.enemy.width > self.screen.width {
            return Err(ConfigError::Invalid {
                field: "enemy.width",
                reason: format!("must not exceed screen.width ({})", self.screen.width),
            });
        }
        if self.player.y_offset <= 0.0 || self.player.y_offset >= self.screen.height {
            return Err(ConfigError::Invalid {
                field: "player.y_offset",
                reason: format!("must lie inside (0, {})", self.screen.height),
            });
        }
        Ok(())
    }

    /// Ms between automatic shots.
    pub fn fire_interval_ms(&self) -> f32 {
        1000.0 / self.weapon.shots_per_second
    }

    /// Fixed y of the player's center.
    pub fn player_y(&self) -> f32 {
        self.screen.height - self.player.y_offset
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be > 0, got {value}"),
        })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be >= 0, got {value}"),
        })
    }
}
