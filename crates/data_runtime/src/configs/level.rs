//! Level layout loader (`data/config/level.toml`).
//!
//! Describes everything the match-start routine spawns: player spawn points,
//! elevator placements, per-floor enemy waves, loose weapon drops and the
//! boss position, plus the tick rate used to convert millisecond tuning into
//! tick counts.

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LevelCfg {
    /// Authoritative ticks per second.
    pub tick_hz: u32,
    /// Gravity applied to airborne pawns, per tick (y grows downward).
    pub gravity: f32,
    /// Fixed spawn coordinates for player slots 1 and 2.
    pub player_spawns: [(f32, f32); 2],
    /// Enemies activate their AI when a player is within this distance.
    pub ai_activation_distance: f32,
    pub elevators: Vec<ElevatorCfg>,
    pub floors: Vec<FloorCfg>,
    pub boss_spawn: (f32, f32),
}

impl Default for LevelCfg {
    fn default() -> Self {
        Self {
            tick_hz: 60,
            gravity: 0.06,
            player_spawns: [(100.0, 30.0), (10.0, 30.0)],
            ai_activation_distance: 100.0,
            elevators: vec![ElevatorCfg::default()],
            floors: vec![
                FloorCfg {
                    surface_y: 30.0,
                    goons: vec![(260.0, 30.0), (300.0, 30.0)],
                    loose_weapons: vec![(140.0, 30.0), (60.0, 30.0)],
                },
                FloorCfg {
                    surface_y: 142.0,
                    goons: vec![(520.0, 142.0), (560.0, 142.0), (600.0, 142.0)],
                    loose_weapons: vec![],
                },
            ],
            boss_spawn: (640.0, 142.0),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElevatorCfg {
    pub start: (f32, f32),
    pub end: (f32, f32),
    /// Descent length in ticks.
    pub duration_ticks: u32,
    /// Grace delay before the shaft walls come down, in ticks.
    pub settle_ticks: u32,
    /// Width of the approach band that auto-starts the sequence.
    pub trigger_band: f32,
}

impl Default for ElevatorCfg {
    fn default() -> Self {
        Self {
            start: (400.0, 14.0),
            end: (400.0, 126.0),
            duration_ticks: 1000,
            settle_ticks: 30,
            trigger_band: 24.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FloorCfg {
    /// Walkable ground height for this floor (y grows downward).
    pub surface_y: f32,
    pub goons: Vec<(f32, f32)>,
    /// Unwielded weapons placed for players to grab.
    pub loose_weapons: Vec<(f32, f32)>,
}

/// Load `data/config/level.toml`, erroring on a missing or malformed file.
pub fn load() -> Result<LevelCfg> {
    let path = crate::data_root().join("config/level.toml");
    let txt = std::fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&txt).context("parse level.toml")
}

/// Load the level file, falling back to the built-in defaults.
pub fn load_or_default() -> LevelCfg {
    match load() {
        Ok(cfg) => cfg,
        Err(e) => {
            log::warn!("level config unavailable, using defaults: {e:#}");
            LevelCfg::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_coherent() {
        let lv = LevelCfg::default();
        assert!(lv.tick_hz > 0);
        assert!(!lv.elevators.is_empty());
        assert!(!lv.floors.is_empty());
        for e in &lv.elevators {
            assert!(e.duration_ticks > 0);
            assert!(e.trigger_band > 0.0);
        }
    }
}
