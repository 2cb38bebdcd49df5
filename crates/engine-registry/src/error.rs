use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid engine: {0}")]
    InvalidEngine(&'static str),

    #[error("Engine not found: {0}")]
    EngineNotFound(String),

    #[error("Failed to open folder: {0}")]
    Opener(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
