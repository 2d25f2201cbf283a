pub mod camera;
pub mod entities;
pub mod level;
pub mod physics;
pub mod scoring;

use serde::{Deserialize, Serialize};

use coinhunter_core::events::GameEvent;
use coinhunter_core::input::FrameInput;

use camera::Camera;
use entities::{Coin, Enemy, Spring, flag_rect, step_enemy};
use level::Level;
use physics::{CoinHunterConfig, PlayerState, step_player};
use scoring::{COIN_SCORE, STOMP_SCORE, time_bonus};

/// Coarse game state. Within one attempt transitions are one-directional
/// (`Playing` → `GameOver` | `LevelComplete`); only an explicit restart
/// or return-to-title leaves a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Start,
    Playing,
    Paused,
    GameOver,
    LevelComplete,
}

/// The whole game world: level, player, entities, camera, and score
/// bookkeeping. Owns all mutable state for one page load; constructed
/// once and driven by `step` at 60 Hz.
pub struct CoinHunter {
    level: Level,
    config: CoinHunterConfig,
    pub player: PlayerState,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub springs: Vec<Spring>,
    pub camera: Camera,
    pub status: GameStatus,
    pub score: i32,
    pub coins_collected: u32,
    pub flag_reached: bool,
    frames: u64,
}

impl CoinHunter {
    pub fn new(level: Level, config: CoinHunterConfig) -> Self {
        let player = Self::fresh_player(&level, &config);
        let enemies = level.enemies.iter().map(Enemy::from_spawn).collect();
        let coins = level.coins.iter().map(Coin::at).collect();
        let springs = level.springs.iter().map(Spring::at).collect();
        Self {
            level,
            config,
            player,
            enemies,
            coins,
            springs,
            camera: Camera::default(),
            status: GameStatus::Start,
            score: 0,
            coins_collected: 0,
            flag_reached: false,
            frames: 0,
        }
    }

    fn fresh_player(level: &Level, config: &CoinHunterConfig) -> PlayerState {
        let mut player = PlayerState::new(level.player_spawn.x, level.player_spawn.y);
        player.health = config.physics.max_health;
        player
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn config(&self) -> &CoinHunterConfig {
        &self.config
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.frames as f32 / self.config.frame_rate_hz
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.status, GameStatus::GameOver | GameStatus::LevelComplete)
    }

    /// `Start` → `Playing`. The caller restarts the frame loop.
    pub fn start(&mut self) {
        if self.status == GameStatus::Start {
            self.status = GameStatus::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Playing {
            self.status = GameStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Playing;
        }
    }

    /// Reset every mutable field to its initial value and go straight to
    /// `Playing`. Valid from any state.
    pub fn restart(&mut self) {
        self.reset_world();
        self.status = GameStatus::Playing;
    }

    /// Reset the world and return to the title screen.
    pub fn return_to_title(&mut self) {
        self.reset_world();
        self.status = GameStatus::Start;
    }

    fn reset_world(&mut self) {
        self.player = Self::fresh_player(&self.level, &self.config);
        self.enemies = self.level.enemies.iter().map(Enemy::from_spawn).collect();
        self.coins = self.level.coins.iter().map(Coin::at).collect();
        self.springs = self.level.springs.iter().map(Spring::at).collect();
        self.camera.reset();
        self.score = 0;
        self.coins_collected = 0;
        self.flag_reached = false;
        self.frames = 0;
    }

    /// Advance one 60 Hz frame. A world that is not `Playing` ignores
    /// input and changes nothing.
    pub fn step(&mut self, input: FrameInput) -> Vec<GameEvent> {
        if self.status != GameStatus::Playing {
            return Vec::new();
        }
        self.frames += 1;
        let mut events = Vec::new();

        let physics = self.config.physics.clone();
        let moved = step_player(
            &mut self.player,
            input,
            &self.level.platforms,
            self.level.world_width,
            &physics,
        );
        if moved.jumped {
            events.push(GameEvent::Jumped);
        }

        for enemy in &mut self.enemies {
            step_enemy(enemy, &self.level.platforms);
        }

        let prect = self.player.rect(&physics);

        // Enemies: stomp from above, otherwise take a hit unless the
        // invulnerability window is open.
        for enemy in &mut self.enemies {
            if !enemy.alive || !prect.overlaps(&enemy.rect()) {
                continue;
            }
            let stomp =
                self.player.vel_y > 0.0 && self.player.y < enemy.y - physics.stomp_margin;
            if stomp {
                enemy.alive = false;
                self.player.vel_y = -physics.stomp_bounce;
                self.player.on_ground = false;
                self.score += STOMP_SCORE;
                events.push(GameEvent::EnemyStomped { score: STOMP_SCORE });
            } else if !self.player.is_invulnerable() {
                self.player.health = (self.player.health - 1).max(0);
                self.player.invuln_frames = physics.invuln_frames;
                events.push(GameEvent::PlayerHurt {
                    health_left: self.player.health,
                });
                if self.player.health == 0 {
                    self.status = GameStatus::GameOver;
                    events.push(GameEvent::GameOver);
                    return events;
                }
            }
        }

        // One-shot pickups.
        for coin in &mut self.coins {
            if !coin.collected && prect.overlaps(&coin.rect()) {
                coin.collected = true;
                self.coins_collected += 1;
                self.score += COIN_SCORE;
                events.push(GameEvent::CoinCollected {
                    total: self.coins_collected,
                });
            }
        }

        for spring in &mut self.springs {
            if !spring.triggered && prect.overlaps(&spring.rect()) {
                spring.triggered = true;
                self.player.vel_y = -physics.spring_power;
                self.player.on_ground = false;
                self.player.jumping = false;
                events.push(GameEvent::SpringBounced);
            }
        }

        // Goal flag: completes the level exactly once, even if the
        // overlap persists across frames.
        if !self.flag_reached && prect.overlaps(&flag_rect(&self.level.flag)) {
            self.flag_reached = true;
            let time = self.elapsed_secs();
            self.score += time_bonus(time);
            self.status = GameStatus::LevelComplete;
            events.push(GameEvent::LevelComplete {
                score: self.score,
                time,
            });
            return events;
        }

        // Falling out of the world always costs health — the
        // invulnerability window does not apply here.
        if self.player.y > self.level.world_height {
            self.player.health = (self.player.health - 1).max(0);
            events.push(GameEvent::PlayerFell {
                health_left: self.player.health,
            });
            if self.player.health == 0 {
                self.status = GameStatus::GameOver;
                events.push(GameEvent::GameOver);
                return events;
            }
            self.player
                .respawn(self.level.player_spawn.x, self.level.player_spawn.y);
            self.player.invuln_frames = physics.invuln_frames;
        }

        self.camera
            .follow(self.player.rect(&physics).center_x(), self.level.world_width);

        events
    }
}

impl Default for CoinHunter {
    fn default() -> Self {
        Self::new(Level::default_level(), CoinHunterConfig::default())
    }
}
