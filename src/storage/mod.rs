// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Local Storage Module
//!
//! On-device key-value persistence. Local storage is the only source of truth
//! for whether a document has been validated: the remote service has no such
//! endpoint.
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   items/
//!     docs_token.json           # @docs:token (raw bearer token)
//!     validatedDocuments.json   # @validatedDocuments (JSON array)
//!     invalidDocuments.json     # @invalidDocuments (JSON array)
//!     webImages.json            # @webImages (JSON array, web only)
//! {DOCUMENTS_DIR}/
//!   {document_id}_{document_name}.png   # native only
//! ```

pub mod local;
pub mod paths;
pub mod repository;
pub mod token;

pub use local::{
    read_json, write_json, FileStorage, LocalStorage, MemoryStorage, StorageError, StorageResult,
};
pub use paths::{
    StoragePaths, INVALID_DOCUMENTS_KEY, TOKEN_KEY, VALIDATED_DOCUMENTS_KEY, WEB_IMAGES_KEY,
};
pub use repository::DocumentRepository;
pub use token::{clear_token, load_token, save_token};
