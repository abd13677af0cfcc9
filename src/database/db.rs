use std::{
    fs, io,
    path::{Path, PathBuf}
};

use thiserror::Error;
use tracing::{info, warn};

use super::db_structs::PersistedState;
use crate::model::{
    constants::STATE_SCHEMA_VERSION, elo_model::EloModel, model_config::ModelConfig, structures::event_key::EventKey
};

#[derive(Debug, Error)]
pub enum StateError {
    #[error("State file I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("State file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Unsupported state version {0} (expected {expected})", expected = STATE_SCHEMA_VERSION)]
    UnsupportedVersion(u32),

    #[error("Event key {0} appears twice in the stored ledger")]
    DuplicateLedgerKey(EventKey)
}

/// Somewhere a league's state can be kept between runs.
pub trait StateStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<PersistedState>, StateError>;

    fn save(&self, state: &PersistedState) -> Result<(), StateError>;
}

/// Stores state as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileStore {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<PersistedState>, StateError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into())
        };

        let state: PersistedState = serde_json::from_str(&contents)?;
        if state.version != STATE_SCHEMA_VERSION {
            return Err(StateError::UnsupportedVersion(state.version));
        }

        info!(
            "Loaded {} participants and {} event keys from {}",
            state.participants.len(),
            state.ledger.len(),
            self.path.display()
        );
        Ok(Some(state))
    }

    /// Writes to a sibling temp file, then renames it over the target.
    fn save(&self, state: &PersistedState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_vec_pretty(state)?)?;
        fs::rename(&temp, &self.path)?;

        info!("Saved league state to {}", self.path.display());
        Ok(())
    }
}

/// Loads a model from `store`. Nothing stored yields a fresh model.
pub fn load_model(store: &impl StateStore, config: ModelConfig) -> Result<EloModel, StateError> {
    let Some(state) = store.load()? else {
        info!("No stored state, starting a new league");
        return Ok(EloModel::new(config));
    };

    let (tracker, ledger) = state.into_parts().map_err(StateError::DuplicateLedgerKey)?;
    Ok(EloModel::from_parts(tracker, ledger, config))
}

/// Like [`load_model`], but unreadable state is logged and replaced by a fresh model.
pub fn restore_model(store: &impl StateStore, config: ModelConfig) -> EloModel {
    match load_model(store, config.clone()) {
        Ok(model) => model,
        Err(e) => {
            warn!("Discarding stored state: {}", e);
            EloModel::new(config)
        }
    }
}

pub fn save_model(store: &impl StateStore, model: &EloModel) -> Result<(), StateError> {
    store.save(&PersistedState::capture(model))
}
