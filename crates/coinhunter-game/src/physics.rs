use serde::{Deserialize, Serialize};

use coinhunter_core::geom::Rect;
use coinhunter_core::input::FrameInput;

/// Gravity acceleration (px/frame^2, downward — canvas y grows down).
pub const GRAVITY: f32 = 0.8;
/// Horizontal move speed (px/frame).
pub const MOVE_SPEED: f32 = 5.0;
/// Jump launch speed, applied as negative (upward) velocity.
pub const JUMP_POWER: f32 = 18.0;
/// Horizontal velocity decay per frame with no direction held.
pub const FRICTION: f32 = 0.8;
/// Frames of guaranteed ascent after a jump starts.
pub const MIN_JUMP_TIME: u32 = 5;
/// Frames after which the sustained ascent is cut off.
pub const MAX_JUMP_TIME: u32 = 20;
/// Multiple of gravity subtracted each frame while the ascent is sustained.
pub const JUMP_ASSIST: f32 = 1.8;
/// Upward speed granted by bouncing off a stomped enemy.
pub const STOMP_BOUNCE: f32 = 8.0;
/// Upward speed granted by a spring.
pub const SPRING_POWER: f32 = 22.0;
/// The player must be this far above an enemy's top for a stomp.
pub const STOMP_MARGIN: f32 = 10.0;
pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 64.0;
pub const MAX_HEALTH: i32 = 3;
/// Damage-immunity window after a hit, in frames.
pub const INVULN_FRAMES: u32 = 90;
/// Horizontal speeds below this decay to an exact stop.
pub const VEL_EPSILON: f32 = 0.05;
/// Simulation rate; one `step` call is one frame at this rate.
pub const FRAME_RATE: f32 = 60.0;

/// Tunable physics parameters, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub move_speed: f32,
    pub jump_power: f32,
    pub friction: f32,
    pub min_jump_time: u32,
    pub max_jump_time: u32,
    pub jump_assist: f32,
    pub stomp_bounce: f32,
    pub spring_power: f32,
    pub stomp_margin: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub max_health: i32,
    pub invuln_frames: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            move_speed: MOVE_SPEED,
            jump_power: JUMP_POWER,
            friction: FRICTION,
            min_jump_time: MIN_JUMP_TIME,
            max_jump_time: MAX_JUMP_TIME,
            jump_assist: JUMP_ASSIST,
            stomp_bounce: STOMP_BOUNCE,
            spring_power: SPRING_POWER,
            stomp_margin: STOMP_MARGIN,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            max_health: MAX_HEALTH,
            invuln_frames: INVULN_FRAMES,
        }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinHunterConfig {
    pub physics: PhysicsConfig,
    pub frame_rate_hz: f32,
}

impl Default for CoinHunterConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            frame_rate_hz: FRAME_RATE,
        }
    }
}

impl CoinHunterConfig {
    /// Load config from a TOML file. Falls back to defaults if the file
    /// is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("COINHUNTER_CONFIG")
            .unwrap_or_else(|_| "config/coinhunter.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<CoinHunterConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    CoinHunterConfig::default()
                },
            },
            Err(_) => CoinHunterConfig::default(),
        }
    }
}

/// Which way the player sprite faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

/// The player's mutable state: position/velocity, health, and the jump
/// state machine counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub facing: Facing,
    pub on_ground: bool,
    pub health: i32,
    pub invuln_frames: u32,
    /// True from jump start until the sustained ascent ends.
    pub jumping: bool,
    /// Frames since the current jump started.
    pub jump_frames: u32,
    /// Frames the jump button was held during the current jump.
    pub hold_frames: u32,
    /// Edge detector for the jump button.
    pub jump_was_held: bool,
    /// y at the moment the current jump started.
    pub jump_start_y: f32,
    /// Highest point of the current airborne arc, relative to the start y.
    pub jump_peak: f32,
    /// Diagnostics recorded on landing.
    pub last_jump_height: f32,
    pub last_jump_hold_frames: u32,
}

impl PlayerState {
    pub fn new(spawn_x: f32, spawn_y: f32) -> Self {
        Self {
            x: spawn_x,
            y: spawn_y,
            vel_x: 0.0,
            vel_y: 0.0,
            facing: Facing::Right,
            on_ground: false,
            health: MAX_HEALTH,
            invuln_frames: 0,
            jumping: false,
            jump_frames: 0,
            hold_frames: 0,
            jump_was_held: false,
            jump_start_y: spawn_y,
            jump_peak: 0.0,
            last_jump_height: 0.0,
            last_jump_hold_frames: 0,
        }
    }

    pub fn rect(&self, cfg: &PhysicsConfig) -> Rect {
        Rect::new(self.x, self.y, cfg.player_width, cfg.player_height)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_frames > 0
    }

    /// Put the player back at a spawn point with motion and jump state
    /// cleared. Health is untouched; the caller decides the damage.
    pub fn respawn(&mut self, spawn_x: f32, spawn_y: f32) {
        self.x = spawn_x;
        self.y = spawn_y;
        self.vel_x = 0.0;
        self.vel_y = 0.0;
        self.on_ground = false;
        self.jumping = false;
        self.jump_frames = 0;
        self.hold_frames = 0;
    }
}

/// What happened to the player during one physics step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepResult {
    pub jumped: bool,
    pub landed: bool,
}

/// Advance the player one frame: input, the jump state machine, gravity,
/// integration, and one-sided platform resolution.
///
/// Platforms only stop downward motion — a player rising from below or
/// running into a platform's side passes through. That asymmetry is part
/// of the game's observed behavior, not an omission.
pub fn step_player(
    player: &mut PlayerState,
    input: FrameInput,
    platforms: &[Rect],
    world_width: f32,
    cfg: &PhysicsConfig,
) -> StepResult {
    let mut result = StepResult::default();

    // Horizontal: held direction wins, otherwise decay toward rest.
    if input.left && !input.right {
        player.vel_x = -cfg.move_speed;
        player.facing = Facing::Left;
    } else if input.right && !input.left {
        player.vel_x = cfg.move_speed;
        player.facing = Facing::Right;
    } else {
        player.vel_x *= cfg.friction;
        if player.vel_x.abs() < VEL_EPSILON {
            player.vel_x = 0.0;
        }
    }

    // Jump state machine. Only the grounded rising edge starts a jump;
    // re-pressing mid-air does nothing.
    let jump_pressed = input.jump && !player.jump_was_held;
    if jump_pressed && player.on_ground {
        player.vel_y = -cfg.jump_power;
        player.on_ground = false;
        player.jumping = true;
        player.jump_frames = 0;
        player.hold_frames = 0;
        player.jump_start_y = player.y;
        player.jump_peak = 0.0;
        result.jumped = true;
    } else if player.jumping {
        player.jump_frames += 1;
        if input.jump {
            player.hold_frames += 1;
        }
        if player.vel_y < 0.0 {
            // The ascent is sustained while the button is held, and for
            // the first min_jump_time frames even if it is not: early
            // release cannot produce a shorter hop than the minimum.
            let sustain = input.jump || player.jump_frames < cfg.min_jump_time;
            if player.jump_frames >= cfg.max_jump_time {
                player.vel_y = 0.0;
                player.jumping = false;
            } else if sustain {
                player.vel_y -= cfg.jump_assist * cfg.gravity;
            } else {
                // Short hop: truncate the ascent on release.
                player.vel_y = 0.0;
                player.jumping = false;
            }
        }
    }
    player.jump_was_held = input.jump;

    // Gravity applies every frame; landing resolution re-grounds below.
    player.vel_y += cfg.gravity;

    // Integrate, guarding against corrupted values: zero velocity and
    // keep the last valid position rather than propagating NaN.
    let prev_y = player.y;
    let new_x = player.x + player.vel_x;
    let new_y = player.y + player.vel_y;
    if new_x.is_finite() && new_y.is_finite() {
        player.x = new_x;
        player.y = new_y;
    } else {
        tracing::error!(
            vel_x = player.vel_x,
            vel_y = player.vel_y,
            "Non-finite integration result, zeroing velocity"
        );
        player.vel_x = 0.0;
        player.vel_y = 0.0;
    }

    if player.invuln_frames > 0 {
        player.invuln_frames -= 1;
    }

    // One-sided platform resolution: only a downward-moving player that
    // was above the platform top before this frame lands on it.
    player.on_ground = false;
    if player.vel_y > 0.0 {
        let prect = player.rect(cfg);
        for platform in platforms {
            if prect.overlaps(platform) && prev_y < platform.y {
                player.y = platform.y - cfg.player_height;
                player.vel_y = 0.0;
                player.on_ground = true;
                if player.jumping || player.jump_peak > 0.0 {
                    player.last_jump_height = player.jump_peak;
                    player.last_jump_hold_frames = player.hold_frames;
                    player.jump_peak = 0.0;
                }
                player.jumping = false;
                result.landed = true;
                break;
            }
        }
    }

    if !player.on_ground {
        let height = player.jump_start_y - player.y;
        if height > player.jump_peak {
            player.jump_peak = height;
        }
    }

    player.x = player.x.clamp(0.0, (world_width - cfg.player_width).max(0.0));

    result
}
