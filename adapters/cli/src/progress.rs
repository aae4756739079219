//! Player progress persistence.
//!
//! Coins and per-word wrong-answer counts survive between battles in a
//! small JSON file. A missing or unreadable file simply starts fresh;
//! saving failures are reported to the caller.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persistent state carried between battles.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlayerProgress {
    /// Coin balance carried into the next battle.
    #[serde(default)]
    pub(crate) coins: u64,
    /// Wrong-answer counts keyed by English text.
    #[serde(default)]
    pub(crate) review: HashMap<String, u32>,
}

/// Loads progress, falling back to defaults when the file is absent or
/// unreadable.
pub(crate) fn load(path: &Path) -> PlayerProgress {
    std::fs::read_to_string(path)
        .ok()
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

/// Saves progress, creating parent directories as needed.
pub(crate) fn save(path: &Path, progress: &PlayerProgress) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(progress)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load, save, PlayerProgress};
    use std::collections::HashMap;

    #[test]
    fn missing_file_yields_defaults() {
        let progress = load(std::path::Path::new("/nonexistent/progress.json"));
        assert_eq!(progress, PlayerProgress::default());
    }

    #[test]
    fn progress_survives_a_save_and_load() {
        let dir = std::env::temp_dir().join("word-siege-progress-test");
        let path = dir.join("progress.json");
        let mut review = HashMap::new();
        let _ = review.insert("cat".to_owned(), 2);
        let progress = PlayerProgress { coins: 17, review };
        save(&path, &progress).expect("save succeeds");
        assert_eq!(load(&path), progress);
        let _ = std::fs::remove_dir_all(dir);
    }
}
