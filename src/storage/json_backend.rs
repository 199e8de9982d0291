use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use crate::{
    errors::{MerchantError, Result},
    utils::paths::{ensure_dir, store_file_in},
};

use super::KeyValueStore;

const TMP_SUFFIX: &str = "tmp";
const CORRUPT_SUFFIX: &str = "corrupt";

/// Filesystem-backed store keeping every key in one pretty-printed JSON object.
///
/// The file is re-read on every access so that two handles on the same path
/// observe each other's writes (as a restarted app would).
#[derive(Debug)]
pub struct JsonKeyValueStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonKeyValueStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self {
            path,
            guard: Mutex::new(()),
        })
    }

    /// Opens `store.json` inside the given data directory.
    pub fn in_dir(base: &Path) -> Result<Self> {
        ensure_dir(base)?;
        Self::new(store_file_in(base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>> {
        self.guard
            .lock()
            .map_err(|_| MerchantError::Storage("store lock poisoned".into()))
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(map)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self.lock()?;
        let mut map = match self.read_map() {
            Ok(map) => map,
            Err(MerchantError::Serde(err)) => {
                self.quarantine(&err)?;
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        apply(&mut map);
        self.write_map(&map)
    }

    /// Moves an undecodable store out of the way so writes can start over.
    fn quarantine(&self, err: &serde_json::Error) -> Result<()> {
        let target = corrupt_path(&self.path);
        tracing::warn!(
            path = %self.path.display(),
            moved_to = %target.display(),
            error = %err,
            "store file is not valid JSON; starting a fresh store"
        );
        fs::rename(&self.path, &target)?;
        Ok(())
    }
}

impl KeyValueStore for JsonKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock()?;
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<()> {
        self.update(|map| {
            for (key, value) in entries {
                map.insert((*key).to_string(), value.clone());
            }
        })
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn corrupt_path(path: &Path) -> PathBuf {
    let mut target = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, CORRUPT_SUFFIX),
        None => CORRUPT_SUFFIX.to_string(),
    };
    target.set_extension(ext);
    target
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonKeyValueStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonKeyValueStore::in_dir(temp.path()).expect("json store");
        (store, temp)
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (store, _guard) = store_with_temp_dir();
        assert_eq!(store.get("SavedEmail").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_a_second_handle() {
        let (store, guard) = store_with_temp_dir();
        store.set("SavedEmail", "a@b.com").unwrap();
        let reopened = JsonKeyValueStore::in_dir(guard.path()).unwrap();
        assert_eq!(reopened.get("SavedEmail").unwrap().as_deref(), Some("a@b.com"));
    }

    #[test]
    fn set_many_leaves_no_temp_file() {
        let (store, _guard) = store_with_temp_dir();
        store
            .set_many(&[("a", "1".to_string()), ("b", "2".to_string())])
            .unwrap();
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
        assert!(!tmp_path(store.path()).exists());
    }

    #[test]
    fn corrupt_file_surfaces_serde_error() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.path(), "{ not json").unwrap();
        match store.get("anything") {
            Err(MerchantError::Serde(_)) => {}
            other => panic!("expected serde error, got {other:?}"),
        }
    }

    #[test]
    fn write_after_corrupt_file_starts_fresh_and_keeps_a_copy() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.path(), "{ not json").unwrap();

        store.set("SavedEmail", "a@b.com").unwrap();

        assert_eq!(store.get("SavedEmail").unwrap().as_deref(), Some("a@b.com"));
        let kept = fs::read_to_string(corrupt_path(store.path())).unwrap();
        assert_eq!(kept, "{ not json");
    }
}
