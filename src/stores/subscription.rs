// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Subscription store: the plan attached to the signed-in user.
//!
//! The backend calls a subscription a "signature"; the endpoint names keep
//! that wording.

use std::sync::Arc;

use reqwest::StatusCode;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::bearer_token;
use crate::api::{ApiClient, SIGNATURE_PATH};
use crate::error::{ClientError, ClientResult};
use crate::models::{PlanRequest, PlanTier, Subscription};
use crate::storage::LocalStorage;

#[derive(Debug, Default)]
struct SubscriptionState {
    subscription: Option<Subscription>,
    loading: bool,
    error: Option<String>,
}

pub struct SubscriptionStore {
    api: ApiClient,
    storage: Arc<dyn LocalStorage>,
    state: RwLock<SubscriptionState>,
}

impl SubscriptionStore {
    pub fn new(api: ApiClient, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            api,
            storage,
            state: RwLock::new(SubscriptionState::default()),
        }
    }

    /// Fetch the current subscription.
    ///
    /// Any failure resets the subscription to unknown (`None`).
    pub async fn get_signature(&self) -> Option<Subscription> {
        self.begin().await;
        let result = self.fetch().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(subscription) => {
                info!(plan = %subscription.plan_tier, "Loaded subscription");
                state.subscription = Some(subscription.clone());
                Some(subscription)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load subscription");
                state.subscription = None;
                state.error = Some(e.to_string());
                None
            }
        }
    }

    /// Subscribe the user to `plan`. Returns the response status.
    pub async fn assign_signature(&self, plan: PlanTier) -> StatusCode {
        self.begin().await;
        let result = self.assign(plan).await;
        self.finish(result).await
    }

    /// Switch the user's plan. On `200` the local subscription is updated
    /// in place.
    pub async fn change_signature_plan(&self, plan: PlanTier) -> StatusCode {
        self.begin().await;
        let result = self.change(plan).await;
        self.finish(result).await
    }

    pub async fn subscription(&self) -> Option<Subscription> {
        self.state.read().await.subscription.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    async fn fetch(&self) -> ClientResult<Subscription> {
        let token = bearer_token(self.storage.as_ref())?;
        self.api.get_json(SIGNATURE_PATH, Some(&token)).await
    }

    async fn assign(&self, plan: PlanTier) -> ClientResult<StatusCode> {
        let token = bearer_token(self.storage.as_ref())?;
        let response = self
            .api
            .post_json(SIGNATURE_PATH, &PlanRequest { plan_tier: plan }, Some(&token))
            .await?;
        info!(plan = %plan, status = %response.status(), "Assigned plan");
        Ok(response.status())
    }

    async fn change(&self, plan: PlanTier) -> ClientResult<StatusCode> {
        let token = bearer_token(self.storage.as_ref())?;
        let response = self
            .api
            .patch_json(SIGNATURE_PATH, &PlanRequest { plan_tier: plan }, Some(&token))
            .await?;
        let status = response.status();

        if status == StatusCode::OK {
            let updated = self.api.json::<Subscription>(response).await.ok();
            let mut state = self.state.write().await;
            match (updated, state.subscription.as_mut()) {
                (Some(updated), _) => state.subscription = Some(updated),
                (None, Some(current)) => current.plan_tier = plan,
                (None, None) => {}
            }
        }

        info!(plan = %plan, status = %status, "Changed plan");
        Ok(status)
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn finish(&self, result: ClientResult<StatusCode>) -> StatusCode {
        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Subscription action failed");
                state.error = Some(e.to_string());
                e.status()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Credentials;
    use crate::storage::{MemoryStorage, TOKEN_KEY};
    use crate::stores::SessionStore;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn subscription_body(plan: &str) -> serde_json::Value {
        json!({
            "signatureType": plan,
            "signetAt": "2024-05-01T10:30:00",
            "documentCount": 2
        })
    }

    fn store(server: &MockServer, storage: Arc<MemoryStorage>) -> SubscriptionStore {
        let api = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        SubscriptionStore::new(api, storage)
    }

    fn signed_in_storage() -> Arc<MemoryStorage> {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(TOKEN_KEY, "tok123").unwrap();
        storage
    }

    #[tokio::test]
    async fn get_signature_uses_token_from_sign_in() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/auth"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok123" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/user/signature"))
            .and(header("Authorization", "Bearer tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subscription_body("MONTHLY")))
            .expect(1)
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let api = ApiClient::new(server.uri(), Duration::from_secs(5)).unwrap();
        let session = SessionStore::new(api, storage.clone(), "/api/user/create");
        assert_eq!(
            session.sign_in(Credentials::new("a@b.com", "secret1")).await,
            StatusCode::OK
        );

        let store = store(&server, storage);
        let subscription = store.get_signature().await.unwrap();
        assert_eq!(subscription.plan_tier, PlanTier::Monthly);
        assert_eq!(subscription.document_count, 2);
        assert_eq!(store.subscription().await, Some(subscription));
    }

    #[tokio::test]
    async fn zoned_signed_at_is_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/signature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "signatureType": "MONTHLY",
                "signetAt": "2024-05-01T10:30:00.000Z",
                "documentCount": 2
            })))
            .mount(&server)
            .await;

        let store = store(&server, signed_in_storage());
        let subscription = store.get_signature().await.unwrap();
        assert_eq!(subscription.signed_at.to_string(), "2024-05-01 10:30:00");
        assert_eq!(store.error().await, None);
    }

    #[tokio::test]
    async fn missing_token_resets_subscription() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subscription_body("MONTHLY")))
            .expect(0)
            .mount(&server)
            .await;

        let store = store(&server, Arc::new(MemoryStorage::new()));
        assert_eq!(store.get_signature().await, None);
        assert_eq!(store.subscription().await, None);
        assert_eq!(
            store.error().await.as_deref(),
            Some("Authentication token not found")
        );
    }

    #[tokio::test]
    async fn failed_lookup_clears_previous_subscription() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/signature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subscription_body("ANNUAL")))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/user/signature"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = store(&server, signed_in_storage());
        assert!(store.get_signature().await.is_some());
        assert!(store.get_signature().await.is_none());
        assert_eq!(store.subscription().await, None);
    }

    #[tokio::test]
    async fn assign_returns_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/signature"))
            .and(body_json(json!({ "signatureType": "QUARTERLY" })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let store = store(&server, signed_in_storage());
        assert_eq!(
            store.assign_signature(PlanTier::Quarterly).await,
            StatusCode::CREATED
        );
    }

    #[tokio::test]
    async fn assign_without_token_is_500() {
        let server = MockServer::start().await;
        let store = store(&server, Arc::new(MemoryStorage::new()));
        assert_eq!(
            store.assign_signature(PlanTier::Monthly).await,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn change_plan_updates_local_state_in_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/signature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subscription_body("MONTHLY")))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/user/signature"))
            .and(body_json(json!({ "signatureType": "ANNUAL" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let store = store(&server, signed_in_storage());
        store.get_signature().await.unwrap();

        assert_eq!(
            store.change_signature_plan(PlanTier::Annual).await,
            StatusCode::OK
        );
        let subscription = store.subscription().await.unwrap();
        assert_eq!(subscription.plan_tier, PlanTier::Annual);
        assert_eq!(subscription.document_count, 2);
    }

    #[tokio::test]
    async fn rejected_plan_change_keeps_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/signature"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subscription_body("MONTHLY")))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/user/signature"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({ "message": "Plan unavailable" })),
            )
            .mount(&server)
            .await;

        let store = store(&server, signed_in_storage());
        store.get_signature().await.unwrap();

        assert_eq!(
            store.change_signature_plan(PlanTier::Annual).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            store.subscription().await.map(|s| s.plan_tier),
            Some(PlanTier::Monthly)
        );
        assert_eq!(store.error().await.as_deref(), Some("Plan unavailable"));
    }
}
