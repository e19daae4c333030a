// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Document Wallet Client
//!
//! Client-side state for a personal document wallet: session, subscription
//! plan and documents. Downloaded documents are validated offline against
//! the RSA signature published by the wallet service, and the outcome is kept
//! in local key-value storage.
//!
//! ## Modules
//!
//! - `api` - Bearer-authenticated REST client (reqwest)
//! - `app` - Composition root holding the stores
//! - `crypto` - Public key decoding and signature verification (ring)
//! - `storage` - Local key-value storage and the document repository
//! - `stores` - Session, subscription and document stores

pub mod api;
pub mod app;
pub mod config;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;
pub mod stores;
pub mod validation;

pub use app::WalletApp;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
