//! Library Management System client
//!
//! The request/session layer every front end of the library system is built
//! on: a typed REST client with bearer-token persistence, and a session
//! manager providing login, logout and role-gated navigation guards.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod navigation;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use config::AppConfig;
pub use error::{ClientError, ClientResult};
pub use session::{LoginOutcome, SessionManager};

use navigation::Navigator;
use storage::KeyValueStore;

/// Application state, constructed once at startup and handed to every consumer
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<ApiClient>,
    pub session: Arc<SessionManager>,
}

impl AppState {
    /// Wire the client and session manager around one shared store
    pub fn new(
        config: AppConfig,
        store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        let api = Arc::new(ApiClient::new(&config.api, store.clone())?);
        let session = Arc::new(SessionManager::new(
            api.clone(),
            store,
            navigator,
            config.routes.clone(),
        ));

        Ok(Self {
            config: Arc::new(config),
            api,
            session,
        })
    }
}
