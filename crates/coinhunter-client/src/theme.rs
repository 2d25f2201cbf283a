//! Color palette for the canvas renderer.

pub const SKY: &str = "#87ceeb";
pub const PLATFORM: &str = "#8b5a2b";
pub const PLATFORM_TOP: &str = "#2ed573";
pub const PLAYER: &str = "#ff5757";
pub const SLIME: &str = "#46b34e";
pub const BIRD: &str = "#5398ff";
pub const COIN: &str = "#ffc312";
pub const SPRING: &str = "#b0b8c4";
pub const FLAG_POLE: &str = "#555b66";
pub const FLAG_CLOTH: &str = "#ff6baf";
pub const HUD_TEXT: &str = "#ffffff";
pub const HEART: &str = "#ff5757";
pub const HEART_EMPTY: &str = "#404654";
pub const OVERLAY_SCRIM: &str = "rgba(10, 12, 24, 0.72)";
