// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Document repository over local storage.
//!
//! Validated documents, documents awaiting validation and web images are each
//! kept as one JSON array under a fixed key. Every save reads the whole array,
//! drops any entry with the same id, appends the new entry and writes the
//! array back: last write wins per id.
//!
//! All read-modify-write sequences run under one mutex, so concurrent tasks
//! cannot lose each other's updates. A document id lives in at most one of
//! the validated and invalid arrays.
//!
//! Promotion is compare-and-swap: the staged record that was verified must
//! still be the one in the invalid array when the lock is taken, otherwise
//! nothing is written.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::{
    read_json, write_json, LocalStorage, StorageError, StorageResult, INVALID_DOCUMENTS_KEY,
    VALIDATED_DOCUMENTS_KEY, WEB_IMAGES_KEY,
};
use crate::models::{Identified, StoredDocument, WebImage};

/// Repository for the locally persisted document arrays.
pub struct DocumentRepository {
    storage: Arc<dyn LocalStorage>,
    lock: Mutex<()>,
}

impl DocumentRepository {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            storage,
            lock: Mutex::new(()),
        }
    }

    /// Documents whose signature has been verified.
    pub fn validated(&self) -> StorageResult<Vec<StoredDocument>> {
        self.list(VALIDATED_DOCUMENTS_KEY)
    }

    /// Downloaded documents still awaiting a successful verification.
    pub fn invalid(&self) -> StorageResult<Vec<StoredDocument>> {
        self.list(INVALID_DOCUMENTS_KEY)
    }

    pub fn web_images(&self) -> StorageResult<Vec<WebImage>> {
        self.list(WEB_IMAGES_KEY)
    }

    pub fn find_validated(&self, document_id: &str) -> StorageResult<Option<StoredDocument>> {
        Ok(self
            .validated()?
            .into_iter()
            .find(|doc| doc.id == document_id))
    }

    pub fn find_invalid(&self, document_id: &str) -> StorageResult<Option<StoredDocument>> {
        Ok(self
            .invalid()?
            .into_iter()
            .find(|doc| doc.id == document_id))
    }

    /// Put a document in the invalid (staging) array.
    ///
    /// Any validated entry with the same id is dropped, since the document
    /// has to pass verification again.
    pub fn stage_invalid(&self, document: StoredDocument) -> StorageResult<()> {
        let _guard = self.guard()?;
        let id = document.id.clone();
        self.upsert(INVALID_DOCUMENTS_KEY, document)?;
        self.remove_from(VALIDATED_DOCUMENTS_KEY, &id)?;
        debug!(document_id = %id, "Staged document for validation");
        Ok(())
    }

    /// Move `staged` from the invalid array to the validated array with
    /// `message` recorded on it.
    ///
    /// Returns `false` without writing when the staged entry for that id is
    /// no longer equal to `staged` (it was re-staged or removed meanwhile).
    pub fn promote(&self, staged: &StoredDocument, message: &str) -> StorageResult<bool> {
        let _guard = self.guard()?;
        let current = self
            .list::<StoredDocument>(INVALID_DOCUMENTS_KEY)?
            .into_iter()
            .find(|doc| doc.id == staged.id);
        if current.as_ref() != Some(staged) {
            debug!(document_id = %staged.id, "Staged document changed, not promoting");
            return Ok(false);
        }

        let mut validated = staged.clone();
        validated.message = message.to_string();
        self.upsert(VALIDATED_DOCUMENTS_KEY, validated)?;
        self.remove_from(INVALID_DOCUMENTS_KEY, &staged.id)?;
        debug!(document_id = %staged.id, "Promoted document to validated");
        Ok(true)
    }

    pub fn save_web_image(&self, image: WebImage) -> StorageResult<()> {
        let _guard = self.guard()?;
        self.upsert(WEB_IMAGES_KEY, image)
    }

    fn guard(&self) -> StorageResult<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| StorageError::IntegrityViolation("document lock poisoned".to_string()))
    }

    fn list<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Vec<T>> {
        Ok(read_json(self.storage.as_ref(), key)?.unwrap_or_default())
    }

    fn upsert<T>(&self, key: &str, item: T) -> StorageResult<()>
    where
        T: Identified + Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = self.list(key)?;
        items.retain(|existing| existing.id() != item.id());
        items.push(item);
        write_json(self.storage.as_ref(), key, &items)
    }

    fn remove_from(&self, key: &str, document_id: &str) -> StorageResult<()> {
        let mut items: Vec<StoredDocument> = self.list(key)?;
        let before = items.len();
        items.retain(|existing| existing.id != document_id);
        if items.len() == before {
            return Ok(());
        }
        write_json(self.storage.as_ref(), key, &items)
    }
}
