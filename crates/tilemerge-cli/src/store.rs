use std::{fs, path::PathBuf};

use anyhow::Context as _;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use tilemerge_engine::BestScoreStore;

use crate::util;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct BestScoreRecord {
    #[serde(default)]
    best_score: u64,
}

/// Best score persisted as `{"best_score": N}` in a JSON file.
///
/// A missing or unreadable file loads as 0. Write failures are logged and
/// otherwise ignored.
#[derive(Debug, Clone)]
pub struct JsonFileBestScore {
    path: PathBuf,
}

impl JsonFileBestScore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn write(&self, score: u64) -> anyhow::Result<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
        let mut output = util::Output::open(self.path.clone())?;
        output.write_json(&BestScoreRecord { best_score: score })
    }
}

impl BestScoreStore for JsonFileBestScore {
    fn load(&mut self) -> u64 {
        if !self.path.exists() {
            debug!("no best score file at {}", self.path.display());
            return 0;
        }
        match util::read_json_file::<BestScoreRecord, _>("best score", &self.path) {
            Ok(record) => record.best_score,
            Err(err) => {
                warn!("{err:#}; starting from 0");
                0
            }
        }
    }

    fn save(&mut self, score: u64) {
        if let Err(err) = self.write(score) {
            warn!("{err:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{env, process};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("tilemerge-test-{}", process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_file_loads_zero() {
        let mut store = JsonFileBestScore::new(temp_path("missing.json"));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_path("roundtrip.json");
        let mut store = JsonFileBestScore::new(path.clone());
        store.save(5036);
        assert_eq!(store.load(), 5036);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"best_score": 5036}));
    }

    #[test]
    fn test_invalid_file_loads_zero() {
        let path = temp_path("invalid.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        assert_eq!(JsonFileBestScore::new(path.clone()).load(), 0);

        fs::write(&path, "{}").unwrap();
        assert_eq!(JsonFileBestScore::new(path).load(), 0);
    }
}
