use serde::{Deserialize, Serialize};

/// Events emitted by a simulation step (pickups, damage, terminal
/// transitions). The client maps these to sound effects and HUD flashes;
/// tests assert on them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player left the ground under jump input.
    Jumped,
    /// A coin was collected; carries the new coin total.
    CoinCollected { total: u32 },
    /// An enemy was defeated from above; carries the points awarded.
    EnemyStomped { score: i32 },
    /// A spring launched the player.
    SpringBounced,
    /// The player touched an enemy without protection.
    PlayerHurt { health_left: i32 },
    /// The player fell out of the world.
    PlayerFell { health_left: i32 },
    /// The goal flag was reached. Fires exactly once per attempt.
    LevelComplete { score: i32, time: f32 },
    /// Health reached zero.
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_roundtrip_through_json() {
        let events = vec![
            GameEvent::Jumped,
            GameEvent::CoinCollected { total: 3 },
            GameEvent::EnemyStomped { score: 100 },
            GameEvent::LevelComplete {
                score: 420,
                time: 61.5,
            },
        ];
        let json = serde_json::to_string(&events).unwrap();
        let back: Vec<GameEvent> = serde_json::from_str(&json).unwrap();
        assert_eq!(events, back);
    }
}
