use crate::api::FolioApi;
use crate::config::FolioConfig;
use crate::error::{FolioError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};

/// Overrides the data directory, mainly for tests and portable setups.
pub const HOME_ENV: &str = "FOLIO_HOME";

pub struct FolioContext {
    pub api: FolioApi<FileStore>,
    pub config: FolioConfig,
    pub data_dir: PathBuf,
}

/// Where notes and configuration live: `$FOLIO_HOME` when set, the
/// platform data directory otherwise.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "folio", "folio")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            FolioError::Api(format!(
                "Could not determine a data directory. Set ${}.",
                HOME_ENV
            ))
        })
}

/// Loads configuration and the library from `data_dir`.
///
/// A broken config file falls back to defaults; a broken library document is
/// reported through the API's startup messages.
pub fn initialize(data_dir: &Path) -> FolioContext {
    let config = FolioConfig::load(data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable config, using defaults");
        FolioConfig::default()
    });

    let store = FileStore::new(data_dir.to_path_buf()).with_file_name(&config.data_file);
    let api = FolioApi::open(store).with_search_mode(config.search_mode);

    FolioContext {
        api,
        config,
        data_dir: data_dir.to_path_buf(),
    }
}
