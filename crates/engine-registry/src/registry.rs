use std::path::Path;

use tracing::{info, warn};

use crate::engine::{Engine, EngineForm};
use crate::error::RegistryError;
use crate::store::LocalFile;

/// Engines folder under the application directory.
pub const ENGINES_DIR: &str = "engines";

/// Engine list file, relative to the application directory.
pub const ENGINES_FILE: &str = "engines/engines.json";

/// Every mutation rewrites the whole persisted list (last writer wins).
#[derive(Debug)]
pub struct EngineRegistry {
    store: LocalFile<Vec<Engine>>,
}

impl EngineRegistry {
    /// Open the registry stored under `app_dir`.
    pub fn open(app_dir: &Path) -> Result<Self, RegistryError> {
        let store = LocalFile::load(app_dir.join(ENGINES_FILE), Vec::new())?;
        info!(
            path = %store.path().display(),
            count = store.get().len(),
            "Engine registry loaded"
        );
        Ok(Self { store })
    }

    pub fn engines(&self) -> &[Engine] {
        self.store.get()
    }

    pub fn get(&self, name: &str) -> Option<&Engine> {
        self.engines().iter().find(|e| e.name == name)
    }

    pub fn add(&mut self, form: EngineForm) -> Result<Engine, RegistryError> {
        let engine = form.validate()?;
        if self.get(&engine.name).is_some() {
            warn!(name = %engine.name, "An engine with this name already exists");
        }

        let mut engines = self.engines().to_vec();
        engines.push(engine.clone());
        self.store.set(engines)?;
        info!(name = %engine.name, "Engine added");
        Ok(engine)
    }

    /// Replace every engine named `original_name` with the edited values.
    pub fn edit(&mut self, original_name: &str, form: EngineForm) -> Result<Engine, RegistryError> {
        if self.get(original_name).is_none() {
            return Err(RegistryError::EngineNotFound(original_name.to_string()));
        }
        let engine = form.validate()?;

        let engines = self
            .engines()
            .iter()
            .map(|e| {
                if e.name == original_name {
                    engine.clone()
                } else {
                    e.clone()
                }
            })
            .collect();
        self.store.set(engines)?;
        info!(from = original_name, to = %engine.name, "Engine edited");
        Ok(engine)
    }

    /// Remove every engine named `name`. Returns how many were removed;
    /// an unknown name removes nothing.
    pub fn delete(&mut self, name: &str) -> Result<usize, RegistryError> {
        let before = self.engines().len();
        let engines = remove_by_name(self.engines(), name);
        let removed = before - engines.len();
        self.store.set(engines)?;
        info!(name, removed, "Engine removed");
        Ok(removed)
    }
}

/// The engine list without entries named exactly `name`, order preserved.
pub fn remove_by_name(engines: &[Engine], name: &str) -> Vec<Engine> {
    engines.iter().filter(|e| e.name != name).cloned().collect()
}
