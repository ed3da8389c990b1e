//! Shared application state.

use database::cache::CacheClient;
use mongodb::{Client, Database};

/// Cloned into every handler; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Shares the underlying connection pool across clones
    pub mongo_client: Client,
    pub db: Database,
    pub cache: CacheClient,
}
