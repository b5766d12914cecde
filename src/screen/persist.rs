//! On-disk layout of the saved screen stack
//!
//! The state directory holds:
//! - `screen_list.txt`: one screen kind per line, in stack order
//! - `screen_<n>.json`: the saved blob of the n-th listed screen
//!
//! Only screens flagged serializable are written. Reading is all-or-nothing:
//! the caller gets either every record or an error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistError;

pub const SCREEN_LIST_FILE: &str = "screen_list.txt";

/// One saved screen: its registry kind and its opaque blob
#[derive(Debug, Clone, PartialEq)]
pub struct SavedScreen {
    pub kind: String,
    pub data: serde_json::Value,
}

/// Reads and writes the saved screen stack
pub struct StateStore {
    directory: PathBuf,
}

impl StateStore {
    /// Creates a store rooted at `directory`
    ///
    /// Nothing is touched on disk until the first save.
    pub fn new(directory: impl AsRef<Path>) -> Self {
        StateStore {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn exists(&self) -> bool {
        self.directory.is_dir()
    }

    fn blob_path(&self, index: usize) -> PathBuf {
        self.directory.join(format!("screen_{}.json", index))
    }

    /// Replaces whatever is saved with `screens`
    pub fn save(&self, screens: &[SavedScreen]) -> Result<(), PersistError> {
        if self.exists() {
            self.clear()?;
        } else {
            fs::create_dir_all(&self.directory)?;
        }

        let mut list = String::new();
        for screen in screens {
            list.push_str(&screen.kind);
            list.push('\n');
        }
        fs::write(self.directory.join(SCREEN_LIST_FILE), list)?;

        for (index, screen) in screens.iter().enumerate() {
            let json = serde_json::to_string_pretty(&screen.data)?;
            fs::write(self.blob_path(index), json)?;
        }

        Ok(())
    }

    /// Reads back every saved screen
    ///
    /// Returns `Ok(None)` when there is no saved state at all (no directory,
    /// or an empty one). Blank lines in the list are skipped. Blobs without a
    /// list, an empty list, and a missing or unparsable blob are errors.
    pub fn load(&self) -> Result<Option<Vec<SavedScreen>>, PersistError> {
        if !self.exists() {
            return Ok(None);
        }

        let list_path = self.directory.join(SCREEN_LIST_FILE);
        if !list_path.exists() {
            if self.has_files()? {
                return Err(PersistError::CorruptedData(format!(
                    "{} missing from {}",
                    SCREEN_LIST_FILE,
                    self.directory.display()
                )));
            }
            return Ok(None);
        }

        let list = fs::read_to_string(&list_path)?;
        let mut screens = Vec::new();

        for (index, kind) in list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
        {
            let json = fs::read_to_string(self.blob_path(index))?;
            let data: serde_json::Value = serde_json::from_str(&json)?;
            screens.push(SavedScreen {
                kind: kind.to_string(),
                data,
            });
        }

        if screens.is_empty() {
            return Err(PersistError::CorruptedData(format!(
                "{} lists no screens",
                SCREEN_LIST_FILE
            )));
        }

        Ok(Some(screens))
    }

    fn has_files(&self) -> Result<bool, PersistError> {
        for entry in fs::read_dir(&self.directory)? {
            if entry?.path().is_file() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Deletes every file in the state directory
    pub fn clear(&self) -> Result<(), PersistError> {
        if !self.exists() {
            return Ok(());
        }

        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(path)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn saved(kind: &str, data: serde_json::Value) -> SavedScreen {
        SavedScreen {
            kind: kind.to_string(),
            data,
        }
    }

    #[test]
    fn test_load_without_directory_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("missing"));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_writes_list_and_numbered_blobs() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("screens"));

        store
            .save(&[
                saved("background", serde_json::Value::Null),
                saved("select_char", json!({ "theme": "Blue" })),
            ])
            .unwrap();

        let list = fs::read_to_string(store.directory().join(SCREEN_LIST_FILE)).unwrap();
        assert_eq!(list, "background\nselect_char\n");
        assert!(store.directory().join("screen_0.json").exists());
        assert!(store.directory().join("screen_1.json").exists());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded[1], saved("select_char", json!({ "theme": "Blue" })));
    }

    #[test]
    fn test_save_replaces_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());

        store
            .save(&[saved("a", json!(1)), saved("b", json!(2)), saved("c", json!(3))])
            .unwrap();
        store.save(&[saved("a", json!(1))]).unwrap();

        assert!(!store.directory().join("screen_2.json").exists());
        assert_eq!(store.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_load_fails_on_corrupt_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());
        store
            .save(&[saved("a", json!(1)), saved("b", json!(2))])
            .unwrap();

        fs::write(store.directory().join("screen_1.json"), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(PersistError::Serialization(_))));
    }

    #[test]
    fn test_load_fails_on_missing_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());
        store.save(&[saved("a", json!(1))]).unwrap();

        fs::remove_file(store.directory().join("screen_0.json")).unwrap();

        assert!(matches!(store.load(), Err(PersistError::Io(_))));
    }

    #[test]
    fn test_blobs_without_list_are_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());
        store
            .save(&[saved("a", json!(1)), saved("b", json!(2))])
            .unwrap();

        fs::remove_file(store.directory().join(SCREEN_LIST_FILE)).unwrap();

        assert!(matches!(store.load(), Err(PersistError::CorruptedData(_))));
    }

    #[test]
    fn test_empty_list_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());
        store.save(&[]).unwrap();

        assert!(matches!(store.load(), Err(PersistError::CorruptedData(_))));
    }

    #[test]
    fn test_clear_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());
        store.save(&[saved("a", json!(1))]).unwrap();

        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        assert_eq!(fs::read_dir(store.directory()).unwrap().count(), 0);
    }
}
