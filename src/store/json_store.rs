use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use crate::session::result::SessionResult;
use crate::store::schema::ResultHistoryData;

const HISTORY_FILE: &str = "results.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("keyline");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                warn!(error = %err, file = name, "unreadable store file, starting fresh");
                T::default()
            }),
            Err(err) => {
                warn!(error = %err, file = name, "could not read store file");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Stored history; a stale schema version starts a fresh one.
    pub fn load_history(&self) -> ResultHistoryData {
        let history: ResultHistoryData = self.load(HISTORY_FILE);
        if history.needs_reset() {
            warn!(
                version = history.schema_version,
                "result history has an unknown schema version, resetting"
            );
            return ResultHistoryData::default();
        }
        history
    }

    pub fn save_history(&self, data: &ResultHistoryData) -> Result<()> {
        self.save(HISTORY_FILE, data)
    }

    pub fn append_result(&self, result: SessionResult) -> Result<ResultHistoryData> {
        let mut history = self.load_history();
        history.push(result);
        self.save_history(&history)?;
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_empty_history() {
        let (_dir, store) = make_test_store();
        assert!(store.load_history().results.is_empty());
    }

    #[test]
    fn test_append_persists_and_leaves_no_tmp() {
        let (dir, store) = make_test_store();
        store.append_result(SessionResult::new(100.0, 10, 1, 2)).unwrap();
        let history = store.append_result(SessionResult::new(200.0, 20, 0, 3)).unwrap();
        assert_eq!(history.results.len(), 2);

        let reloaded = store.load_history();
        assert_eq!(reloaded.results.len(), 2);
        assert_eq!(reloaded.results[1].velocity, 200.0);
        assert!(dir.path().join("results.json").exists());
        assert!(!dir.path().join("results.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let (dir, store) = make_test_store();
        fs::write(dir.path().join("results.json"), "{not json").unwrap();
        assert!(store.load_history().results.is_empty());
    }

    #[test]
    fn test_stale_schema_is_reset() {
        let (dir, store) = make_test_store();
        fs::write(
            dir.path().join("results.json"),
            r#"{"schema_version": 99, "results": []}"#,
        )
        .unwrap();
        let history = store.load_history();
        assert_eq!(history.schema_version, crate::store::schema::SCHEMA_VERSION);
    }
}
