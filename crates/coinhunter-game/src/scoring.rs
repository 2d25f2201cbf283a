/// Points for collecting a coin.
pub const COIN_SCORE: i32 = 10;
/// Points for stomping an enemy.
pub const STOMP_SCORE: i32 = 100;

/// Completion bonus: starts at 1000 and decays 10 points per second,
/// floored at zero.
pub fn time_bonus(elapsed_secs: f32) -> i32 {
    let decayed = 1000 - (elapsed_secs.max(0.0) as i32).saturating_mul(10);
    decayed.max(0)
}
