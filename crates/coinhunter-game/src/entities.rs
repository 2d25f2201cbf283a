use serde::{Deserialize, Serialize};

use coinhunter_core::geom::Rect;

use crate::level::{EnemySpawn, Spot};

/// How far an enemy patrols to either side of its spawn point.
pub const PATROL_RANGE: f32 = 120.0;
/// Probe depth used for the ground-edge check.
const EDGE_PROBE_DEPTH: f32 = 4.0;

pub const COIN_SIZE: f32 = 24.0;
pub const SPRING_WIDTH: f32 = 32.0;
pub const SPRING_HEIGHT: f32 = 16.0;
pub const FLAG_WIDTH: f32 = 20.0;
pub const FLAG_HEIGHT: f32 = 64.0;

/// Enemy variants with their kind-specific behavior parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    /// Ground patroller; turns at patrol bounds and platform edges.
    Slime,
    /// Flyer; patrols level in the air and ignores platforms.
    Bird,
}

impl EnemyKind {
    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Slime => 1.5,
            EnemyKind::Bird => 2.0,
        }
    }

    pub fn size(&self) -> (f32, f32) {
        match self {
            EnemyKind::Slime => (32.0, 32.0),
            EnemyKind::Bird => (32.0, 24.0),
        }
    }

    pub fn airborne(&self) -> bool {
        matches!(self, EnemyKind::Bird)
    }
}

/// A patrolling enemy. Defeated enemies stay in the list with
/// `alive = false` until the level restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub patrol_min: f32,
    pub patrol_max: f32,
    pub alive: bool,
}

impl Enemy {
    pub fn from_spawn(spawn: &EnemySpawn) -> Self {
        Self {
            kind: spawn.kind,
            x: spawn.x,
            y: spawn.y,
            vel_x: -spawn.kind.speed(),
            patrol_min: spawn.x - PATROL_RANGE,
            patrol_max: spawn.x + PATROL_RANGE,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        let (w, h) = self.kind.size();
        Rect::new(self.x, self.y, w, h)
    }
}

/// Advance one enemy a frame: move, then reverse on patrol bounds, and
/// for ground enemies on losing support beneath the body.
pub fn step_enemy(enemy: &mut Enemy, platforms: &[Rect]) {
    if !enemy.alive {
        return;
    }

    enemy.x += enemy.vel_x;

    if enemy.x <= enemy.patrol_min {
        enemy.x = enemy.patrol_min;
        enemy.vel_x = enemy.kind.speed();
    } else if enemy.x >= enemy.patrol_max {
        enemy.x = enemy.patrol_max;
        enemy.vel_x = -enemy.kind.speed();
    } else if !enemy.kind.airborne() {
        let (w, h) = enemy.kind.size();
        let below = Rect::new(enemy.x, enemy.y + h, w, EDGE_PROBE_DEPTH);
        let supported = platforms.iter().any(|p| below.overlaps(p));
        if !supported {
            // Walked off the edge: step back and turn around.
            enemy.x -= enemy.vel_x;
            enemy.vel_x = -enemy.vel_x;
        }
    }
}

/// A collectible coin; `collected` is sticky until level reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub x: f32,
    pub y: f32,
    pub collected: bool,
}

impl Coin {
    pub fn at(spot: &Spot) -> Self {
        Self {
            x: spot.x,
            y: spot.y,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, COIN_SIZE, COIN_SIZE)
    }
}

/// A launch spring; `triggered` is sticky until level reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub x: f32,
    pub y: f32,
    pub triggered: bool,
}

impl Spring {
    pub fn at(spot: &Spot) -> Self {
        Self {
            x: spot.x,
            y: spot.y,
            triggered: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, SPRING_WIDTH, SPRING_HEIGHT)
    }
}

/// The goal flag's collision rectangle.
pub fn flag_rect(flag: &Spot) -> Rect {
    Rect::new(flag.x, flag.y, FLAG_WIDTH, FLAG_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::EnemySpawn;

    fn slime_at(x: f32) -> Enemy {
        Enemy::from_spawn(&EnemySpawn {
            kind: EnemyKind::Slime,
            x,
            y: 416.0,
        })
    }

    #[test]
    fn spawn_sets_patrol_bounds_around_origin() {
        let enemy = slime_at(800.0);
        assert_eq!(enemy.patrol_min, 800.0 - PATROL_RANGE);
        assert_eq!(enemy.patrol_max, 800.0 + PATROL_RANGE);
        assert!(enemy.alive);
        assert!(enemy.vel_x < 0.0, "Enemies start patrolling left");
    }

    #[test]
    fn enemy_reverses_at_patrol_bounds() {
        let platforms = vec![Rect::new(0.0, 448.0, 3000.0, 32.0)];
        let mut enemy = slime_at(800.0);

        // Walk left until the patrol bound flips the velocity.
        for _ in 0..200 {
            step_enemy(&mut enemy, &platforms);
            if enemy.vel_x > 0.0 {
                break;
            }
        }
        assert!(enemy.vel_x > 0.0, "Velocity should flip at patrol_min");
        assert!(enemy.x >= enemy.patrol_min);

        // And back the other way at patrol_max.
        for _ in 0..400 {
            step_enemy(&mut enemy, &platforms);
            if enemy.vel_x < 0.0 {
                break;
            }
        }
        assert!(enemy.vel_x < 0.0, "Velocity should flip at patrol_max");
        assert!(enemy.x <= enemy.patrol_max);
    }

    #[test]
    fn slime_turns_at_platform_edge() {
        // A short ledge: the slime reaches the edge long before its
        // patrol bound and must turn there instead.
        let platforms = vec![Rect::new(760.0, 448.0, 80.0, 32.0)];
        let mut enemy = slime_at(800.0);

        for _ in 0..100 {
            step_enemy(&mut enemy, &platforms);
        }
        let ledge = &platforms[0];
        assert!(
            enemy.x + enemy.kind.size().0 >= ledge.x && enemy.x <= ledge.right(),
            "Slime must stay over its ledge, x={}",
            enemy.x
        );
    }

    #[test]
    fn bird_ignores_platform_edges() {
        // No platforms at all: a bird keeps flying to its patrol bound.
        let mut enemy = Enemy::from_spawn(&EnemySpawn {
            kind: EnemyKind::Bird,
            x: 1250.0,
            y: 240.0,
        });
        let start_y = enemy.y;
        for _ in 0..50 {
            step_enemy(&mut enemy, &[]);
        }
        assert_eq!(enemy.y, start_y, "Birds fly level");
        assert!(
            enemy.x < 1250.0,
            "Bird should have advanced without ground support"
        );
    }

    #[test]
    fn dead_enemy_does_not_move() {
        let platforms = vec![Rect::new(0.0, 448.0, 3000.0, 32.0)];
        let mut enemy = slime_at(800.0);
        enemy.alive = false;
        let x = enemy.x;
        step_enemy(&mut enemy, &platforms);
        assert_eq!(enemy.x, x);
    }

    #[test]
    fn kind_parameters() {
        assert!(EnemyKind::Bird.speed() > EnemyKind::Slime.speed());
        assert!(EnemyKind::Bird.airborne());
        assert!(!EnemyKind::Slime.airborne());
    }

    #[test]
    fn pickups_start_unconsumed() {
        let coin = Coin::at(&Spot { x: 10.0, y: 20.0 });
        assert!(!coin.collected);
        let spring = Spring::at(&Spot { x: 10.0, y: 20.0 });
        assert!(!spring.triggered);
    }
}
