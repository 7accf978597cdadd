//! Journal root discovery and backend selection

use crate::error::{JournalError, Result};
use crate::infrastructure::config::{BackendKind, Config, JOURNAL_DIR};
use crate::infrastructure::local::LocalStore;
use crate::infrastructure::sheet::SheetStore;
use crate::infrastructure::store::JournalStore;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at the journal root
pub const ROOT_ENV: &str = "BABYJOURNAL_ROOT";

/// Abstract repository for journal metadata
pub trait JournalRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .babyjournal/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .babyjournal/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .babyjournal directory exists
    fn is_initialized(&self) -> bool;

    /// Create .babyjournal directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover journal root by walking up from current directory
    /// First checks BABYJOURNAL_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_journal_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(JournalError::Config(format!(
                    "BABYJOURNAL_ROOT is set to '{}' but no .babyjournal directory found. \
                    Run 'babyjournal init' in that directory or unset BABYJOURNAL_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover journal root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_journal_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    // Reached filesystem root without finding .babyjournal
                    return Err(JournalError::NotJournalDirectory(start.to_path_buf()));
                }
            }
        }
    }

    /// Check if a path contains a .babyjournal directory
    fn has_journal_dir(path: &Path) -> bool {
        path.join(JOURNAL_DIR).is_dir()
    }

    /// Build the storage backend named by the configuration.
    ///
    /// The backend is picked here once; callers only see the trait.
    pub fn open_store(&self, config: &Config) -> Result<Box<dyn JournalStore>> {
        let backend = config.effective_backend()?;
        tracing::debug!("Opening {} backend at {}", backend, self.root.display());

        let store: Box<dyn JournalStore> = match backend {
            BackendKind::Local => Box::new(LocalStore::new(&self.root, config.owner.clone())),
            BackendKind::Sheet => Box::new(SheetStore::new(&self.root, config.sheet.clone())),
        };
        Ok(store)
    }
}

impl JournalRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_journal_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let journal_dir = self.root.join(JOURNAL_DIR);

        if journal_dir.exists() {
            return Err(JournalError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&journal_dir)?;
        Ok(())
    }
}
