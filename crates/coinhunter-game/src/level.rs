use std::fmt;

use serde::{Deserialize, Serialize};

use coinhunter_core::geom::Rect;

use crate::entities::EnemyKind;

/// A point placement in the level (coin, spring, flag, spawn).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub x: f32,
    pub y: f32,
}

/// Enemy placement from level data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    #[serde(rename = "type")]
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
}

/// End-of-level marker; reaching `x` is the win condition backstop for
/// the flag overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub x: f32,
}

/// Static level geometry and placements, loaded once per attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    #[serde(default = "default_stage_id")]
    pub id: String,
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub coins: Vec<Spot>,
    #[serde(default)]
    pub springs: Vec<Spot>,
    pub flag: Spot,
    pub goal: Goal,
    pub world_width: f32,
    pub world_height: f32,
    pub player_spawn: Spot,
}

fn default_stage_id() -> String {
    "stage1".to_string()
}

/// Why a level file was rejected.
#[derive(Debug)]
pub enum LevelError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Parse(e) => write!(f, "level parse error: {e}"),
            LevelError::Invalid(reason) => write!(f, "invalid level: {reason}"),
        }
    }
}

impl std::error::Error for LevelError {}

impl Level {
    /// Parse and validate a level from its JSON document.
    pub fn from_json(json: &str) -> Result<Level, LevelError> {
        let level: Level = serde_json::from_str(json).map_err(LevelError::Parse)?;
        level.validate()?;
        Ok(level)
    }

    /// Parse a level, substituting the built-in stage on any failure.
    /// The substitution is logged but never fatal.
    pub fn from_json_or_default(json: &str) -> Level {
        match Level::from_json(json) {
            Ok(level) => level,
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to built-in level");
                Level::default_level()
            },
        }
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(LevelError::Invalid("world dimensions must be positive"));
        }
        if self.player_spawn.x < 0.0
            || self.player_spawn.x >= self.world_width
            || self.player_spawn.y < 0.0
            || self.player_spawn.y >= self.world_height
        {
            return Err(LevelError::Invalid("player spawn outside world bounds"));
        }
        Ok(())
    }

    /// The compiled-in stage used when no level file is available.
    pub fn default_level() -> Level {
        Level {
            id: default_stage_id(),
            platforms: vec![
                // Ground with a pit at x=1400..1520
                Rect::new(0.0, 448.0, 1400.0, 32.0),
                Rect::new(1520.0, 448.0, 1480.0, 32.0),
                // Floating platforms
                Rect::new(400.0, 340.0, 120.0, 16.0),
                Rect::new(640.0, 260.0, 120.0, 16.0),
                Rect::new(900.0, 300.0, 120.0, 16.0),
                Rect::new(1380.0, 300.0, 160.0, 16.0),
                Rect::new(1700.0, 340.0, 120.0, 16.0),
                Rect::new(2000.0, 280.0, 120.0, 16.0),
            ],
            enemies: vec![
                EnemySpawn {
                    kind: EnemyKind::Slime,
                    x: 800.0,
                    y: 416.0,
                },
                EnemySpawn {
                    kind: EnemyKind::Slime,
                    x: 1900.0,
                    y: 416.0,
                },
                EnemySpawn {
                    kind: EnemyKind::Bird,
                    x: 1250.0,
                    y: 240.0,
                },
            ],
            coins: vec![
                Spot { x: 430.0, y: 300.0 },
                Spot { x: 470.0, y: 300.0 },
                Spot { x: 680.0, y: 220.0 },
                Spot { x: 940.0, y: 260.0 },
                Spot { x: 1430.0, y: 260.0 },
                Spot { x: 1740.0, y: 300.0 },
                Spot { x: 2040.0, y: 240.0 },
                Spot { x: 2250.0, y: 410.0 },
                Spot { x: 2300.0, y: 410.0 },
                Spot { x: 2350.0, y: 410.0 },
            ],
            springs: vec![Spot { x: 1150.0, y: 432.0 }],
            flag: Spot { x: 2600.0, y: 384.0 },
            goal: Goal { x: 2600.0 },
            world_width: 3000.0,
            world_height: 480.0,
            player_spawn: Spot { x: 100.0, y: 384.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_valid() {
        let level = Level::default_level();
        assert!(level.validate().is_ok());
        assert!(!level.platforms.is_empty());
        assert_eq!(level.flag.x, 2600.0);
    }

    #[test]
    fn parses_camel_case_json() {
        let json = r#"{
            "platforms": [{"x": 0, "y": 448, "w": 800, "h": 32}],
            "enemies": [{"type": "slime", "x": 300, "y": 416}],
            "coins": [{"x": 200, "y": 400}],
            "springs": [],
            "flag": {"x": 700, "y": 384},
            "goal": {"x": 700},
            "worldWidth": 800,
            "worldHeight": 480,
            "playerSpawn": {"x": 100, "y": 384}
        }"#;
        let level = Level::from_json(json).expect("valid level should parse");
        assert_eq!(level.id, "stage1", "missing id defaults to stage1");
        assert_eq!(level.platforms.len(), 1);
        assert_eq!(level.enemies[0].kind, EnemyKind::Slime);
        assert_eq!(level.world_width, 800.0);
    }

    #[test]
    fn bird_kind_parses() {
        let json = r#"{"type": "bird", "x": 10, "y": 20}"#;
        let spawn: EnemySpawn = serde_json::from_str(json).unwrap();
        assert_eq!(spawn.kind, EnemyKind::Bird);
    }

    #[test]
    fn garbage_json_is_rejected() {
        assert!(Level::from_json("not json at all").is_err());
    }

    #[test]
    fn zero_world_width_is_rejected() {
        let mut level = Level::default_level();
        level.world_width = 0.0;
        let json = serde_json::to_string(&level).unwrap();
        assert!(matches!(
            Level::from_json(&json),
            Err(LevelError::Invalid(_))
        ));
    }

    #[test]
    fn spawn_outside_world_is_rejected() {
        let mut level = Level::default_level();
        level.player_spawn.x = level.world_width + 50.0;
        let json = serde_json::to_string(&level).unwrap();
        assert!(Level::from_json(&json).is_err());
    }

    #[test]
    fn fallback_substitutes_default() {
        let level = Level::from_json_or_default("{broken");
        assert_eq!(level, Level::default_level());
    }

    #[test]
    fn shipped_stage_file_matches_builtin() {
        let json = include_str!("../../../levels/stage1.json");
        let level = Level::from_json(json).expect("shipped stage must parse");
        assert_eq!(level, Level::default_level());
    }

    #[test]
    fn level_roundtrips_through_json() {
        let level = Level::default_level();
        let json = serde_json::to_string(&level).unwrap();
        assert!(json.contains("worldWidth"), "wire format is camelCase");
        let back = Level::from_json(&json).unwrap();
        assert_eq!(level, back);
    }
}
