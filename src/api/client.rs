// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer-authenticated REST client for the wallet backend.

use std::future::Future;
use std::time::Duration;

use reqwest::{multipart::Form, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// HTTP client bound to one service base URL.
///
/// Every request races against the client's cancellation token; once the
/// token fires, in-flight and future requests fail with
/// [`ClientError::Cancelled`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    cancel: CancellationToken,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            cancel: CancellationToken::new(),
        })
    }

    /// Tie this client's requests to `token`.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> ClientResult<Response> {
        self.send(self.http.get(self.url(path)), token).await
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let response = self.get(path, token).await?;
        self.json(response).await
    }

    /// Raw response body, e.g. a document download.
    pub async fn get_bytes(&self, path: &str, token: Option<&str>) -> ClientResult<Vec<u8>> {
        let response = self.get(path, token).await?;
        let bytes = self
            .cancellable(async move { response.bytes().await.map_err(ClientError::from) })
            .await?;
        Ok(bytes.to_vec())
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<Response> {
        self.send(self.http.post(self.url(path)).json(body), token)
            .await
    }

    pub async fn patch_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<Response> {
        self.send(self.http.patch(self.url(path)).json(body), token)
            .await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: Form,
        token: Option<&str>,
    ) -> ClientResult<Response> {
        self.send(self.http.post(self.url(path)).multipart(form), token)
            .await
    }

    /// Decode a JSON response body.
    pub async fn json<T: DeserializeOwned>(&self, response: Response) -> ClientResult<T> {
        let bytes = self
            .cancellable(async move { response.bytes().await.map_err(ClientError::from) })
            .await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn send(&self, request: RequestBuilder, token: Option<&str>) -> ClientResult<Response> {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = self
            .cancellable(async move { request.send().await.map_err(ClientError::from) })
            .await?;

        let status = response.status();
        debug!(url = %response.url(), status = %status, "API response");
        if status.is_success() {
            return Ok(response);
        }

        let body = self
            .cancellable(async move { Ok(response.text().await.unwrap_or_default()) })
            .await?;
        Err(ClientError::http(status, error_message(status, &body)))
    }

    async fn cancellable<F, T>(&self, fut: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        if self.cancel.is_cancelled() {
            return Err(ClientError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(ClientError::Cancelled),
            result = fut => result,
        }
    }
}

/// Best-effort message from an error response body.
///
/// Looks for a `message` (or `error`) string in a JSON body and falls back
/// to the status reason phrase.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|field| value.get(field).and_then(Value::as_str).map(str::to_string))
    });

    from_body
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("Request failed: {} {reason}", status.as_u16()),
            None => format!("Request failed with status {}", status.as_u16()),
        })
}
