//! Application state.
//!
//! One aggregate handed to handlers as `State<Arc<AppState>>`: the database
//! pool and repositories, the storage backend, the duration probe, the token
//! verifier, and the loaded configuration.

use linktrend_core::Config;
use linktrend_db::{SessionRepository, TransactionRepository, UserRepository, VideoRepository};
use linktrend_processing::VideoProbe;
use linktrend_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::google::GoogleTokenVerifier;

pub struct AppState {
    pub pool: PgPool,
    pub users: UserRepository,
    pub videos: VideoRepository,
    pub transactions: TransactionRepository,
    pub sessions: SessionRepository,
    pub storage: Arc<dyn Storage>,
    pub probe: VideoProbe,
    pub google: GoogleTokenVerifier,
    pub config: Config,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        storage: Arc<dyn Storage>,
        probe: VideoProbe,
        config: Config,
    ) -> Self {
        let google = GoogleTokenVerifier::new(
            config.google_jwks_url.clone(),
            config.google_client_id.clone(),
            None,
        );
        Self {
            users: UserRepository::new(pool.clone()),
            videos: VideoRepository::new(pool.clone()),
            transactions: TransactionRepository::new(pool.clone()),
            sessions: SessionRepository::new(pool.clone()),
            pool,
            storage,
            probe,
            google,
            config,
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
