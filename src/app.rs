// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::storage::{FileStorage, LocalStorage};
use crate::stores::{DocumentStore, SessionStore, SubscriptionStore};

/// Application root: the three stores over one shared storage handle.
///
/// Built once per process. Every store's API client listens on a child of
/// the root cancellation token, so [`WalletApp::shutdown`] aborts all
/// in-flight requests.
pub struct WalletApp {
    pub session: SessionStore,
    pub subscription: SubscriptionStore,
    pub documents: DocumentStore,
    storage: Arc<dyn LocalStorage>,
    shutdown: CancellationToken,
}

impl WalletApp {
    /// Open file-backed storage under `config.data_dir`, build the stores and
    /// restore any persisted session.
    pub async fn start(config: &ClientConfig) -> ClientResult<Self> {
        let storage = FileStorage::open(&config.data_dir).map_err(ClientError::StorageWrite)?;
        let app = Self::with_storage(config, Arc::new(storage))?;

        let restored = app.session.restore().await;
        info!(
            data_dir = %config.data_dir.display(),
            platform = ?config.platform,
            restored,
            "Wallet client started"
        );
        Ok(app)
    }

    /// Build the stores over an existing storage handle.
    pub fn with_storage(config: &ClientConfig, storage: Arc<dyn LocalStorage>) -> ClientResult<Self> {
        let shutdown = CancellationToken::new();
        let client = |base_url: &str| -> ClientResult<ApiClient> {
            Ok(ApiClient::new(base_url, config.request_timeout)?
                .with_cancellation(shutdown.child_token()))
        };

        Ok(Self {
            session: SessionStore::new(
                client(&config.auth_base_url)?,
                storage.clone(),
                config.register_path.clone(),
            ),
            subscription: SubscriptionStore::new(
                client(&config.signature_base_url)?,
                storage.clone(),
            ),
            documents: DocumentStore::new(
                client(&config.wallet_base_url)?,
                storage.clone(),
                config.platform,
                config.documents_dir.clone(),
            ),
            storage,
            shutdown,
        })
    }

    pub fn storage(&self) -> &Arc<dyn LocalStorage> {
        &self.storage
    }

    /// Cancel every in-flight and future request made through this app.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
        info!("Wallet client shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}
