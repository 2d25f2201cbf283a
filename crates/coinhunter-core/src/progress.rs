use serde::{Deserialize, Serialize};

/// localStorage key the saved progress lives under.
pub const STORAGE_KEY: &str = "gameProgress";

/// Best score/time for one stage. `best_time` is `None` until the stage
/// has been cleared at least once (JSON `null` — non-finite floats do not
/// survive serde_json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageProgress {
    pub id: String,
    pub unlocked: bool,
    pub best_score: i32,
    pub best_time: Option<f32>,
}

/// Saved player progress, persisted as a single JSON document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub stages: Vec<StageProgress>,
}

impl Progress {
    /// Fresh progress for an ordered stage list: the first stage is
    /// unlocked, nothing has been cleared.
    pub fn new<I, S>(stage_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let stages = stage_ids
            .into_iter()
            .enumerate()
            .map(|(i, id)| StageProgress {
                id: id.into(),
                unlocked: i == 0,
                best_score: 0,
                best_time: None,
            })
            .collect();
        Self { stages }
    }

    pub fn is_unlocked(&self, stage_id: &str) -> bool {
        self.stages
            .iter()
            .any(|s| s.id == stage_id && s.unlocked)
    }

    pub fn stage(&self, stage_id: &str) -> Option<&StageProgress> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    /// Record a stage clear: keep the higher score and the lower time,
    /// and unlock the following stage. Unknown stage ids are ignored.
    pub fn record_result(&mut self, stage_id: &str, score: i32, time: f32) {
        let Some(idx) = self.stages.iter().position(|s| s.id == stage_id) else {
            tracing::warn!(stage_id, "Recording result for unknown stage");
            return;
        };
        let stage = &mut self.stages[idx];
        stage.best_score = stage.best_score.max(score);
        if time.is_finite() {
            stage.best_time = Some(match stage.best_time {
                Some(best) => best.min(time),
                None => time,
            });
        }
        if let Some(next) = self.stages.get_mut(idx + 1) {
            next.unlocked = true;
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            tracing::error!(error = %e, "Progress serialization failed");
            String::from("{\"stages\":[]}")
        })
    }

    /// Parse stored progress. Corrupt data is discarded with a warning so
    /// a bad save can never keep the game from starting.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(progress) => progress,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding corrupt saved progress");
                Self::default()
            },
        }
    }
}
