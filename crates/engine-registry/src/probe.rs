//! File-existence probes for engine rows.
//!
//! A row starts out as present and flips to missing once its probe
//! resolves. Probe errors count as missing.

use std::path::{Path, PathBuf};

use futures::future::join_all;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::engine::Engine;

pub async fn file_exists(path: &Path) -> bool {
    match tokio::fs::try_exists(path).await {
        Ok(exists) => exists,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Existence check failed");
            false
        }
    }
}

/// Fire-and-forget probe. Dropping the handle does not cancel it.
pub fn spawn_probe(path: PathBuf) -> JoinHandle<bool> {
    tokio::spawn(async move { file_exists(&path).await })
}

/// One displayed engine row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineRow {
    pub engine: Engine,
    pub file_exists: bool,
}

impl EngineRow {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            file_exists: true,
        }
    }

    pub async fn probe(&mut self) {
        self.file_exists = file_exists(&self.engine.path).await;
    }

    /// Display name, suffixed when the engine binary is missing.
    pub fn label(&self) -> String {
        if self.file_exists {
            self.engine.name.clone()
        } else {
            format!("{} (file missing)", self.engine.name)
        }
    }
}

/// Probe every engine concurrently and return rows in list order.
pub async fn probe_all(engines: &[Engine]) -> Vec<EngineRow> {
    join_all(engines.iter().cloned().map(|engine| async move {
        let mut row = EngineRow::new(engine);
        row.probe().await;
        row
    }))
    .await
}
