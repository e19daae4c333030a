// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Feature stores.
//!
//! Each store is an explicit struct holding its injected [`ApiClient`] and
//! storage handle plus a small state snapshot (current data, loading flag,
//! last error message) behind a `tokio::sync::RwLock`. Store actions never
//! return panics or unhandled errors to the UI: failures are converted into
//! the store's error message and a safe fallback value.
//!
//! [`ApiClient`]: crate::api::ApiClient

pub mod documents;
pub mod session;
pub mod subscription;

pub use documents::{DocumentStore, DownloadedImage};
pub use session::SessionStore;
pub use subscription::SubscriptionStore;

use crate::error::{ClientError, ClientResult};
use crate::storage::{load_token, LocalStorage};

/// Token for an authenticated call, read fresh from storage.
pub(crate) fn bearer_token(storage: &dyn LocalStorage) -> ClientResult<String> {
    load_token(storage)
        .map_err(ClientError::StorageRead)?
        .ok_or(ClientError::MissingToken)
}
