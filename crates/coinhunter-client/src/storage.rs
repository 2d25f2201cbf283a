use coinhunter_core::progress::{Progress, STORAGE_KEY};

/// Calls the closure with browser localStorage, if available. No-op on
/// non-WASM.
#[allow(unused_variables)]
pub fn with_local_storage(f: impl FnOnce(&web_sys::Storage)) {
    #[cfg(target_family = "wasm")]
    {
        if let Some(window) = web_sys::window()
            && let Ok(Some(storage)) = window.local_storage()
        {
            f(&storage);
        }
    }
}

/// Load saved progress from the `gameProgress` key, seeding a fresh
/// record for `stage_ids` when nothing usable is stored.
pub fn load_progress(stage_ids: &[&str]) -> Progress {
    let mut loaded: Option<Progress> = None;
    with_local_storage(|storage| {
        if let Ok(Some(json)) = storage.get_item(STORAGE_KEY) {
            loaded = Some(Progress::from_json(&json));
        }
    });
    match loaded {
        Some(progress) if !progress.stages.is_empty() => progress,
        _ => Progress::new(stage_ids.iter().copied()),
    }
}

/// Persist progress under the `gameProgress` key. Write failures (e.g.
/// storage quota) are ignored; progress is a nicety, not game state.
pub fn save_progress(progress: &Progress) {
    let json = progress.to_json();
    with_local_storage(|storage| {
        let _ = storage.set_item(STORAGE_KEY, &json);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_load_seeds_fresh_progress() {
        let progress = load_progress(&["stage1", "stage2"]);
        assert_eq!(progress.stages.len(), 2);
        assert!(progress.is_unlocked("stage1"));
        assert!(!progress.is_unlocked("stage2"));
    }

    #[test]
    fn native_save_is_a_noop() {
        let progress = Progress::new(["stage1"]);
        save_progress(&progress);
    }
}
