use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// A configured UCI engine. `name` is the key used for edit and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engine {
    pub name: String,
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elo: Option<u32>,
}

/// Values submitted by the add / edit engine forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineForm {
    pub name: String,
    pub path: String,
    pub image: Option<String>,
    pub elo: Option<u32>,
}

impl EngineForm {
    /// Form pre-filled from an existing engine, as the edit form opens.
    pub fn from_engine(engine: &Engine) -> Self {
        Self {
            name: engine.name.clone(),
            path: engine.path.display().to_string(),
            image: engine.image.clone(),
            elo: engine.elo,
        }
    }

    pub fn validate(self) -> Result<Engine, RegistryError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RegistryError::InvalidEngine("name is required"));
        }
        let path = self.path.trim();
        if path.is_empty() {
            return Err(RegistryError::InvalidEngine("path is required"));
        }

        let image = self
            .image
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());

        Ok(Engine {
            name: name.to_string(),
            path: PathBuf::from(path),
            image,
            elo: self.elo,
        })
    }
}
