// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Remote API access.
//!
//! ## Endpoints
//!
//! | Service | Method | Path |
//! |---------|--------|------|
//! | auth | `POST` | `/api/user/auth` |
//! | auth | `POST` | `/api/user/create` (configurable) |
//! | signature | `GET` / `POST` / `PATCH` | `/api/user/signature` |
//! | wallet | `GET` | `/api/user/wallet` |
//! | wallet | `POST` | `/api/user/wallet/create` (multipart) |
//! | wallet | `GET` | `/api/user/wallet/{id}/verify` |
//! | wallet | `GET` | `/api/user/wallet/download/{id}` |

pub mod client;

pub use client::{error_message, ApiClient};

pub const AUTH_PATH: &str = "/api/user/auth";
pub const SIGNATURE_PATH: &str = "/api/user/signature";
pub const WALLET_PATH: &str = "/api/user/wallet";
pub const WALLET_CREATE_PATH: &str = "/api/user/wallet/create";

pub fn verify_path(document_id: &str) -> String {
    format!("/api/user/wallet/{document_id}/verify")
}

pub fn download_path(document_id: &str) -> String {
    format!("/api/user/wallet/download/{document_id}")
}
