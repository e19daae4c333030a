// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Document store: wallet listing, upload, download and offline validation.
//!
//! ## Validation flow
//!
//! 1. [`DocumentStore::download_and_save_document`] fetches the document
//!    bytes and its verification material and stages the record in the
//!    invalid array.
//! 2. [`DocumentStore::validate_offline_document`] checks the staged
//!    signature. A valid verdict promotes the record to the validated array;
//!    an invalid one leaves it staged.
//!
//! Step 2 needs no network access, so documents downloaded earlier can be
//! validated offline.

use std::path::PathBuf;
use std::sync::Arc;

use base64ct::{Base64, Encoding};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::bearer_token;
use crate::api::{download_path, verify_path, ApiClient, WALLET_CREATE_PATH, WALLET_PATH};
use crate::crypto::{content_matches_hash, verify_hash_signature, Verdict};
use crate::error::{ClientError, ClientResult};
use crate::models::{
    FileRef, Platform, RemoteDocument, StoredDocument, VerificationMaterial, WalletListResponse,
    WebImage,
};
use crate::storage::{DocumentRepository, LocalStorage, StorageError, StoragePaths};

/// Message recorded on a freshly staged document.
const STAGED_MESSAGE: &str = "Document saved with validation data";

/// Verify-and-promote rounds before giving up on a document that keeps
/// being re-staged.
const PROMOTE_ATTEMPTS: usize = 3;

/// Where a downloaded document image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedImage {
    pub base64_image: String,
    /// File path on native platforms; `None` on web.
    pub local_image_uri: Option<String>,
}

#[derive(Debug, Default)]
struct DocumentState {
    documents: Option<Vec<RemoteDocument>>,
    loading: bool,
    error: Option<String>,
}

pub struct DocumentStore {
    api: ApiClient,
    storage: Arc<dyn LocalStorage>,
    repository: DocumentRepository,
    platform: Platform,
    documents_dir: PathBuf,
    state: RwLock<DocumentState>,
}

impl DocumentStore {
    pub fn new(
        api: ApiClient,
        storage: Arc<dyn LocalStorage>,
        platform: Platform,
        documents_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            api,
            repository: DocumentRepository::new(storage.clone()),
            storage,
            platform,
            documents_dir: documents_dir.into(),
            state: RwLock::new(DocumentState::default()),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn repository(&self) -> &DocumentRepository {
        &self.repository
    }

    /// Fetch the user's remote wallet. `None` on any failure.
    pub async fn get_documents(&self) -> Option<Vec<RemoteDocument>> {
        self.begin().await;
        let result = self.fetch_documents().await;

        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(documents) => {
                info!(count = documents.len(), "Loaded wallet documents");
                state.documents = Some(documents.clone());
                Some(documents)
            }
            Err(e) => {
                warn!(error = %e, "Failed to load wallet documents");
                state.documents = None;
                state.error = Some(e.to_string());
                None
            }
        }
    }

    /// Upload a document. Returns the response status, `500` for failures
    /// that carry no HTTP status.
    pub async fn create_document(
        &self,
        file: FileRef,
        document_name: &str,
        document_type: &str,
    ) -> StatusCode {
        self.begin().await;
        let result = self.upload(file, document_name, document_type).await;
        self.finish_status(result).await
    }

    /// Download a document and keep its image locally.
    pub async fn download_document(
        &self,
        document_id: &str,
        document_name: &str,
    ) -> Option<DownloadedImage> {
        self.begin().await;
        let result = self
            .download(document_id, document_name)
            .await
            .map(|(image, _)| image);
        self.finish(result).await
    }

    /// Download a document plus its verification material and stage it for
    /// validation. Returns a confirmation message.
    pub async fn download_and_save_document(
        &self,
        document_id: &str,
        document_name: &str,
    ) -> Option<String> {
        self.begin().await;
        let result = self.download_and_stage(document_id, document_name).await;
        self.finish(result).await
    }

    /// Check the signature of a locally staged document.
    ///
    /// The signed message is the `hash` string, so a valid verdict does not
    /// prove the downloaded bytes match the hash. Calling this again for a
    /// document that was already promoted returns [`Verdict::Valid`] without
    /// writing anything.
    pub async fn validate_offline_document(&self, document_id: &str) -> ClientResult<Verdict> {
        self.state.write().await.error = None;
        let result = self.validate(document_id);
        self.record(result).await
    }

    /// Download, stage and validate in one step.
    pub async fn download_and_validate_document(
        &self,
        document_id: &str,
        document_name: &str,
    ) -> ClientResult<Verdict> {
        self.begin().await;
        let staged = self.download_and_stage(document_id, document_name).await;
        self.state.write().await.loading = false;

        match staged {
            Ok(_) => self.validate_offline_document(document_id).await,
            Err(e) => self.record(Err(e)).await,
        }
    }

    /// Locally validated documents; empty when storage is empty or unreadable.
    pub fn get_validated_documents(&self) -> Vec<StoredDocument> {
        self.repository.validated().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read validated documents");
            Vec::new()
        })
    }

    /// Documents downloaded but not (yet) validated.
    pub fn get_invalid_documents(&self) -> Vec<StoredDocument> {
        self.repository.invalid().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read invalid documents");
            Vec::new()
        })
    }

    pub fn get_web_images(&self) -> Vec<WebImage> {
        self.repository.web_images().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read web images");
            Vec::new()
        })
    }

    pub async fn documents(&self) -> Option<Vec<RemoteDocument>> {
        self.state.read().await.documents.clone()
    }

    pub async fn loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    async fn fetch_documents(&self) -> ClientResult<Vec<RemoteDocument>> {
        let token = bearer_token(self.storage.as_ref())?;
        let body: WalletListResponse = self.api.get_json(WALLET_PATH, Some(&token)).await?;
        Ok(body.wallet)
    }

    async fn upload(
        &self,
        file: FileRef,
        document_name: &str,
        document_type: &str,
    ) -> ClientResult<StatusCode> {
        if document_name.trim().is_empty() || document_type.trim().is_empty() {
            return Err(ClientError::invalid_input(
                "Document name and type are required",
            ));
        }
        let token = bearer_token(self.storage.as_ref())?;
        let form = multipart_form(file, document_name, document_type).await?;

        let response = self
            .api
            .post_multipart(WALLET_CREATE_PATH, form, Some(&token))
            .await?;
        info!(document_name, status = %response.status(), "Uploaded document");
        Ok(response.status())
    }

    async fn download(
        &self,
        document_id: &str,
        document_name: &str,
    ) -> ClientResult<(DownloadedImage, Vec<u8>)> {
        let token = bearer_token(self.storage.as_ref())?;
        let bytes = self
            .api
            .get_bytes(&download_path(document_id), Some(&token))
            .await?;
        let base64_image = Base64::encode_string(&bytes);

        let local_image_uri = match self.platform {
            Platform::Native => Some(self.write_image(document_id, document_name, &bytes).await?),
            Platform::Web => {
                self.repository
                    .save_web_image(WebImage {
                        id: document_id.to_string(),
                        document_name: document_name.to_string(),
                        base64_image: base64_image.clone(),
                    })
                    .map_err(ClientError::StorageWrite)?;
                None
            }
        };

        debug!(document_id, size = bytes.len(), platform = ?self.platform, "Downloaded document");
        Ok((
            DownloadedImage {
                base64_image,
                local_image_uri,
            },
            bytes,
        ))
    }

    async fn write_image(
        &self,
        document_id: &str,
        document_name: &str,
        bytes: &[u8],
    ) -> ClientResult<String> {
        let path = StoragePaths::document_image(&self.documents_dir, document_id, document_name);
        tokio::fs::create_dir_all(&self.documents_dir)
            .await
            .map_err(|e| ClientError::StorageWrite(StorageError::Io(e)))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ClientError::StorageWrite(StorageError::Io(e)))?;
        Ok(path.to_string_lossy().into_owned())
    }

    async fn download_and_stage(
        &self,
        document_id: &str,
        document_name: &str,
    ) -> ClientResult<String> {
        let (image, bytes) = self.download(document_id, document_name).await?;

        let token = bearer_token(self.storage.as_ref())?;
        let material: VerificationMaterial = self
            .api
            .get_json(&verify_path(document_id), Some(&token))
            .await?;

        if !content_matches_hash(&bytes, &material.hash) {
            warn!(
                document_id,
                "Downloaded content does not match the published hash"
            );
        }

        let mut document = StoredDocument::new(document_id, document_name, STAGED_MESSAGE, material);
        document.local_image_uri = image.local_image_uri;
        document.base64_image = Some(image.base64_image);
        self.repository
            .stage_invalid(document)
            .map_err(ClientError::StorageWrite)?;

        info!(document_id, "Staged document for validation");
        Ok(format!(
            "Document {document_name} downloaded and saved with validation data"
        ))
    }

    fn validate(&self, document_id: &str) -> ClientResult<Verdict> {
        for _ in 0..PROMOTE_ATTEMPTS {
            let staged = self
                .repository
                .find_invalid(document_id)
                .map_err(ClientError::StorageRead)?;

            let Some(document) = staged else {
                let validated = self
                    .repository
                    .find_validated(document_id)
                    .map_err(ClientError::StorageRead)?;
                return match validated {
                    Some(_) => {
                        debug!(document_id, "Document already validated");
                        Ok(Verdict::Valid)
                    }
                    None => Err(ClientError::NotFound(format!(
                        "document {document_id} has not been downloaded"
                    ))),
                };
            };

            let verdict = verify_hash_signature(&document.material())?;
            if !verdict.is_valid() {
                warn!(document_id, "Document signature is invalid");
                return Ok(verdict);
            }

            let promoted = self
                .repository
                .promote(&document, verdict.message())
                .map_err(ClientError::StorageWrite)?;
            if promoted {
                info!(document_id, "Document signature is valid");
                return Ok(verdict);
            }
            debug!(document_id, "Staged document changed during validation, retrying");
        }

        Err(ClientError::StorageWrite(StorageError::IntegrityViolation(
            format!("staged document {document_id} kept changing during validation"),
        )))
    }

    async fn begin(&self) {
        let mut state = self.state.write().await;
        state.loading = true;
        state.error = None;
    }

    async fn finish<T>(&self, result: ClientResult<T>) -> Option<T> {
        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Document action failed");
                state.error = Some(e.to_string());
                None
            }
        }
    }

    async fn finish_status(&self, result: ClientResult<StatusCode>) -> StatusCode {
        let mut state = self.state.write().await;
        state.loading = false;
        match result {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Document upload failed");
                state.error = Some(e.to_string());
                e.status()
            }
        }
    }

    async fn record<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        if let Err(e) = &result {
            warn!(error = %e, "Document validation failed");
            self.state.write().await.error = Some(e.to_string());
        }
        result
    }
}

/// Multipart body with `file`, `documentName` and `walletDocumentType` parts.
async fn multipart_form(
    file: FileRef,
    document_name: &str,
    document_type: &str,
) -> ClientResult<Form> {
    let data = match &file {
        FileRef::NativeUri { .. } => {
            let path = file
                .native_path()
                .ok_or_else(|| ClientError::invalid_input("file has no local path"))?;
            tokio::fs::read(&path)
                .await
                .map_err(|e| ClientError::StorageRead(StorageError::Io(e)))?
        }
        FileRef::WebBlob { data, .. } => data.clone(),
    };

    let part = Part::bytes(data)
        .file_name(file.name().to_string())
        .mime_str(file.mime())
        .map_err(|_| ClientError::invalid_input(format!("invalid MIME type: {}", file.mime())))?;

    Ok(Form::new()
        .part("file", part)
        .text("documentName", document_name.to_string())
        .text("walletDocumentType", document_type.to_string()))
}
