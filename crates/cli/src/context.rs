//! Application context - wires config, store and service together

use claimflow_store::SqliteClaimStore;
use claimflow_workflow::{ClaimService, ClaimflowConfig};
use std::path::Path;
use std::sync::Arc;

pub struct AppContext {
    pub config: ClaimflowConfig,
    pub service: ClaimService,
}

impl AppContext {
    /// Open the database at `db_path`, loading config from `config_path` if given
    pub async fn new(
        db_path: impl AsRef<Path>,
        config_path: Option<&Path>,
    ) -> Result<Self, anyhow::Error> {
        let config = match config_path {
            Some(path) => ClaimflowConfig::from_file(path)?,
            None => ClaimflowConfig::default(),
        };

        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = SqliteClaimStore::open(db_path, config.store.clone()).await?;
        let service = ClaimService::new(&config, Arc::new(store));

        tracing::debug!("Application context ready");

        Ok(Self { config, service })
    }
}
