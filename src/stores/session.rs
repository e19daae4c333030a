// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session store: sign-in, sign-up, sign-out and token persistence.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::{ApiClient, AUTH_PATH};
use crate::error::{ClientError, ClientResult};
use crate::models::{Credentials, Session, SignUpRequest, TokenResponse};
use crate::storage::{clear_token, load_token, save_token, LocalStorage};
use crate::validation;

#[derive(Debug, Default)]
struct SessionState {
    session: Option<Session>,
    loading: bool,
    error: Option<String>,
    cached_credentials: Option<Credentials>,
}

pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn LocalStorage>,
    register_path: String,
    state: RwLock<SessionState>,
}

impl SessionStore {
    pub fn new(
        api: ApiClient,
        storage: Arc<dyn LocalStorage>,
        register_path: impl Into<String>,
    ) -> Self {
        Self {
            api,
            storage,
            register_path: register_path.into(),
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Pick up a previously persisted token.
    ///
    /// The token is trusted as-is; it is not re-validated with the server.
    pub async fn restore(&self) -> bool {
        match load_token(self.storage.as_ref()) {
            Ok(Some(token)) => {
                self.state.write().await.session = Some(Session { token });
                info!("Restored persisted session");
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session token");
                false
            }
        }
    }

    /// Authenticate and persist the returned token.
    ///
    /// Returns the response status; `400` when the credentials are blank
    /// (no request is made) and `500` for failures without an HTTP status.
    pub async fn sign_in(&self, credentials: Credentials) -> StatusCode {
        if let Err(message) = validation::check_credentials(&credentials) {
            return self.reject(ClientError::invalid_input(message)).await;
        }

        self.begin().await;
        let result = self.authenticate(&credentials).await;
        if result.is_ok() {
            self.state.write().await.cached_credentials = Some(credentials);
        }
        self.finish(result).await
    }

    /// Register a new account.
    ///
    /// Input is validated first (see [`validation::check_sign_up`]). If the
    /// backend answers with a token the user is signed in straight away.
    pub async fn sign_up(&self, request: SignUpRequest) -> StatusCode {
        let request = match validation::check_sign_up(&request) {
            Ok(request) => request,
            Err(message) => return self.reject(ClientError::invalid_input(message)).await,
        };

        self.begin().await;
        let result = self.register(&request).await;
        self.finish(result).await
    }

    /// Drop the persisted token and the in-memory session.
    ///
    /// Storage failures are logged, never surfaced.
    pub async fn sign_out(&self) {
        if let Err(e) = clear_token(self.storage.as_ref()) {
            warn!(error = %e, "Failed to remove persisted token");
        }

        let mut state = self.state.write().await;
        state.session = None;
        state.error = None;
        info!("Signed out");
    }

    pub async fn session(&self) -> Option<Session> {
        self.state.read().await.session.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state
            .read()
            .await
            .session
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Last credentials that signed in successfully (memory only).
    pub async fn cached_credentials(&self) -> Option<Credentials> {
        self.state.read().await.cached_credentials.clone()
    }

    async fn authenticate(&self, credentials: &Credentials) -> ClientResult<StatusCode> {
        let response = self.api.post_json(AUTH_PATH, credentials, None).await?;
        let status = response.status();
        let body: TokenResponse = self.api.json(response).await?;
        self.persist_session(body.access_token).await?;
        info!(email = %credentials.email, "Signed in");
        Ok(status)
    }

    async fn register(&self, request: &SignUpRequest) -> ClientResult<StatusCode> {
        let response = self
            .api
            .post_json(&self.register_path, request, None)
            .await?;
        let status = response.status();

        // Some backend revisions sign the user in on registration.
        let token = self
            .api
            .json::<Value>(response)
            .await
            .ok()
            .and_then(|body| serde_json::from_value::<TokenResponse>(body).ok());
        if let Some(body) = token {
            self.persist_session(body.access_token).await?;
        }

        info!(email = %request.email, status = %status, "Registered account");
        Ok(status)
    }

    async fn persist_session(&self, token: String) -> ClientResult<()> {
        save_token(self.storage.as_ref(), &token).map_err(ClientError::StorageWrite)?;
        self.state.write().await.session = Some(Session { token });
        Ok(())
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn finish(&self, result: ClientResult<StatusCode>) -> StatusCode {
        self.state.write().await.loading = false;
        match result {
            Ok(status) => status,
            Err(e) => self.reject(e).await,
        }
    }

    async fn reject(&self, error: ClientError) -> StatusCode {
        warn!(error = %error, "Session action failed");
        let status = error.status();
        self.state.write().await.error = Some(error.to_string());
        status
    }
}
