//! Local-file backed state: a value loaded from a JSON file and written
//! back as a whole snapshot on every change.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::RegistryError;

#[derive(Debug)]
pub struct LocalFile<T> {
    path: PathBuf,
    value: T,
}

impl<T: Serialize + DeserializeOwned> LocalFile<T> {
    /// Load `path`, falling back to `default` when the file does not exist.
    /// Nothing is written until the first `set`.
    pub fn load(path: impl Into<PathBuf>, default: T) -> Result<Self, RegistryError> {
        let path = path.into();
        let value = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No local file yet, using default");
                default
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, value })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and persist the whole snapshot.
    pub fn set(&mut self, value: T) -> Result<(), RegistryError> {
        write_json(&self.path, &value)?;
        self.value = value;
        Ok(())
    }
}

impl<T: Serialize + DeserializeOwned + Clone> LocalFile<T> {
    /// Read-modify-write of the whole value. On a failed write the
    /// in-memory value is left untouched.
    pub fn update<F: FnOnce(&mut T)>(&mut self, f: F) -> Result<(), RegistryError> {
        let mut next = self.value.clone();
        f(&mut next);
        self.set(next)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RegistryError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, serde_json::to_vec_pretty(value)?)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), "Local file written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Temp directory removed on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new() -> Self {
            let ts = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos();
            Self(std::env::temp_dir().join(format!("engine-registry-store-{}-{ts}", std::process::id())))
        }

        fn file(&self, name: &str) -> PathBuf {
            self.0.join(name)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_missing_file_uses_default_without_writing() {
        let scratch = Scratch::new();
        let path = scratch.file("missing.json");
        let store = LocalFile::load(&path, vec![1u32, 2]).unwrap();
        assert_eq!(store.get(), &vec![1, 2]);
        assert!(!path.exists());
    }

    #[test]
    fn test_set_then_load() {
        let scratch = Scratch::new();
        let path = scratch.file("nested/values.json");
        let mut store = LocalFile::load(&path, Vec::<String>::new()).unwrap();
        store.set(vec!["a".into(), "b".into()]).unwrap();

        let reloaded = LocalFile::load(&path, Vec::<String>::new()).unwrap();
        assert_eq!(reloaded.get(), &vec!["a".to_string(), "b".to_string()]);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_update_writes_whole_value() {
        let scratch = Scratch::new();
        let path = scratch.file("update.json");
        let mut store = LocalFile::load(&path, vec![1u32]).unwrap();
        store.update(|v| v.push(2)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let on_disk: Vec<u32> = serde_json::from_str(&text).unwrap();
        assert_eq!(on_disk, vec![1, 2]);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let scratch = Scratch::new();
        let path = scratch.file("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            LocalFile::load(&path, Vec::<u32>::new()),
            Err(RegistryError::Json(_))
        ));
    }
}
