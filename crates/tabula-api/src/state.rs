//! Shared handler state.

use std::sync::Arc;
use std::time::Duration;

use tabula_core::TabulaConfig;
use tabula_storage::RowStore;

use crate::Result;
use crate::flash::FlashStore;
use crate::submission::SubmissionPolicy;

/// State cloned into every handler. Cheap to clone (Arc internals).
#[derive(Clone, Debug)]
pub struct AppState {
    /// Row store backing the form
    pub store: Arc<RowStore>,
    /// Submission rules
    pub policy: Arc<SubmissionPolicy>,
    /// Pending one-time records
    pub flash: Arc<FlashStore>,
}

impl AppState {
    /// Assemble state from already-built parts.
    pub fn new(store: RowStore, policy: SubmissionPolicy, flash: FlashStore) -> Self {
        Self {
            store: Arc::new(store),
            policy: Arc::new(policy),
            flash: Arc::new(flash),
        }
    }

    /// Build store, policy and flash store from configuration.
    pub fn from_config(config: &TabulaConfig) -> Result<Self> {
        config.validate()?;
        let store = RowStore::from_config(&config.store)?;
        let policy = SubmissionPolicy::from_config(store.schema().clone(), &config.form);
        let flash = FlashStore::new(Duration::from_secs(config.form.flash_ttl_secs));
        Ok(Self::new(store, policy, flash))
    }
}
