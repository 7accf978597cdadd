//! Initialize journal use case

use crate::error::Result;
use crate::infrastructure::{BackendKind, Config, FileSystemRepository, JournalRepository};
use std::fs;
use std::path::Path;

/// Initialize a new journal at the specified path.
pub fn init(path: &Path, backend: BackendKind) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());

    // Fails if .babyjournal already exists
    repo.initialize()?;

    let config = Config::new(backend);
    repo.save_config(&config)?;

    tracing::info!("Initialized journal at {} ({})", path.display(), backend);
    Ok(config)
}
