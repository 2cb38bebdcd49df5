//! UCI engine registry: descriptors persisted as a whole-list JSON snapshot.

pub mod engine;
pub mod error;
pub mod folder;
pub mod probe;
pub mod registry;
pub mod store;

pub use engine::{Engine, EngineForm};
pub use error::RegistryError;
pub use folder::{default_opener, open_folder};
pub use probe::{file_exists, probe_all, spawn_probe, EngineRow};
pub use registry::{remove_by_name, EngineRegistry, ENGINES_DIR, ENGINES_FILE};
pub use store::LocalFile;
