//! Application state management

use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloned into handlers; the MongoDB client shares one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
