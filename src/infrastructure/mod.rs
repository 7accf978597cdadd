//! Infrastructure layer - Configuration and storage backends

pub mod config;
pub mod local;
pub mod repository;
pub mod sheet;
pub mod store;

pub use config::{BackendKind, Config, SheetSettings};
pub use local::LocalStore;
pub use repository::{FileSystemRepository, JournalRepository};
pub use sheet::SheetStore;
pub use store::{Identity, JournalStore, StorageHandles};
