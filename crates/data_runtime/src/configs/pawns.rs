//! Pawn and weapon tuning loader (`data/config/pawns.toml`).
//!
//! Values here are class-level constants: initial health, movement feel,
//! AI phase duration bounds, fist reach/damage. The defaults are the shipped
//! numbers so the simulation runs without the data directory.

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PawnTuning {
    pub player: PlayerTuning,
    pub goon: EnemyTuning,
    pub boss: EnemyTuning,
    pub fist: FistTuning,
    /// Furthest a loose weapon can be to become a grab candidate.
    pub pickup_radius: f32,
}

impl Default for PawnTuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            goon: EnemyTuning::default(),
            boss: EnemyTuning {
                initial_health: 200.0,
                ..EnemyTuning::default()
            },
            fist: FistTuning::default(),
            pickup_radius: 16.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub initial_health: f32,
    pub move_speed: f32,
    pub air_move_speed: f32,
    pub jump_impulse: f32,
    /// A pawn counts as airborne while |vel.y| exceeds this.
    pub air_vel_threshold: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            initial_health: 100.0,
            move_speed: 0.7,
            air_move_speed: 0.05,
            jump_impulse: 2.0,
            air_vel_threshold: 0.07,
            width: 16.0,
            height: 16.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub initial_health: f32,
    /// Distance covered per tick while advancing.
    pub move_speed: f32,
    /// Advancing-phase duration bounds, milliseconds.
    pub follow_duration_ms: (u32, u32),
    /// Waiting-phase duration bounds, milliseconds.
    pub wait_duration_ms: (u32, u32),
    /// Launch an attack when this close to the target.
    pub attack_phase_radius: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            initial_health: 10.0,
            move_speed: 1.0,
            follow_duration_ms: (1000, 1200),
            wait_duration_ms: (3000, 6000),
            attack_phase_radius: 32.0,
            width: 16.0,
            height: 16.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FistTuning {
    /// Furthest a pawn can be to be hit.
    pub attack_radius: f32,
    pub damage: f32,
}

impl Default for FistTuning {
    fn default() -> Self {
        Self { attack_radius: 10.0, damage: 10.0 }
    }
}

/// Load `data/config/pawns.toml`, erroring on a missing or malformed file.
pub fn load() -> Result<PawnTuning> {
    let path = crate::data_root().join("config/pawns.toml");
    let txt = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&txt).context("parse pawns.toml")
}

/// Load the tuning file, falling back to the built-in defaults.
pub fn load_or_default() -> PawnTuning {
    match load() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("pawns config unavailable, using defaults: {e:#}");
            PawnTuning::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_numbers() {
        let t = PawnTuning::default();
        assert_eq!(t.player.initial_health, 100.0);
        assert_eq!(t.goon.initial_health, 10.0);
        assert_eq!(t.boss.initial_health, 200.0);
        assert!(t.fist.attack_radius > 0.0);
        assert!(t.goon.follow_duration_ms.0 <= t.goon.follow_duration_ms.1);
        assert!(t.goon.wait_duration_ms.0 <= t.goon.wait_duration_ms.1);
    }
}
