//! Store configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Records per `query_by_owner` page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Optimistic update attempts before giving up (SQLite backend)
    #[serde(default = "default_max_update_attempts")]
    pub max_update_attempts: u32,
}

fn default_page_size() -> usize {
    20
}

fn default_max_update_attempts() -> u32 {
    8
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_update_attempts: default_max_update_attempts(),
        }
    }
}
