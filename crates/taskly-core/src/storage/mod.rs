mod config;
pub mod database;
pub mod gateway;

pub use config::{Config, CountdownConfig, DeviceKind, NotificationsConfig};
pub use database::Database;
pub use gateway::{MemoryGateway, PersistenceGateway, COUNTDOWN_KEY, SHOPPING_LIST_KEY};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the taskly data directory, creating it if needed.
///
/// `TASKLY_DATA_DIR` wins outright. Otherwise `~/.config/taskly[-dev]/`,
/// with `TASKLY_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("TASKLY_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TASKLY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskly-dev")
            } else {
                base_dir.join("taskly")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StorageError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
