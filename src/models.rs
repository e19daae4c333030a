// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Request/response structures exchanged with the remote services and the
//! records kept in local storage. Wire types keep the backend's camelCase
//! field names so locally persisted JSON stays readable by older clients.
//!
//! ## Model Categories
//!
//! - **Session**: credentials, sign-up payload, bearer token
//! - **Subscription**: plan tier and the subscription record
//! - **Documents**: remote wallet entries, verification material, local
//!   validated/invalid records and web image blobs
//! - **Platform**: host environment and file references for uploads

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{de, Deserialize, Deserializer, Serialize};

// =============================================================================
// Session Models
// =============================================================================

/// Email/password pair used for sign-in.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration payload.
///
/// `document` is the user's national identification number (CPF).
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignUpRequest {
    pub name: String,
    pub document: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("name", &self.name)
            .field("document", &self.document)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

// =============================================================================
// Subscription Models
// =============================================================================

/// Billing tier controlling the document quota.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanTier {
    Monthly,
    Quarterly,
    Annual,
}

impl PlanTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Monthly => "MONTHLY",
            PlanTier::Quarterly => "QUARTERLY",
            PlanTier::Annual => "ANNUAL",
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscription record returned by the signature service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    #[serde(rename = "signatureType")]
    pub plan_tier: PlanTier,
    /// The backend spells this field `signetAt`. Zoned timestamps are
    /// normalized to UTC.
    #[serde(
        rename = "signetAt",
        alias = "signedAt",
        deserialize_with = "deserialize_timestamp"
    )]
    pub signed_at: NaiveDateTime,
    #[serde(rename = "documentCount", default)]
    pub document_count: u32,
}

/// Parse an RFC 3339 timestamp (`...Z`, `...+03:00`) or a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` one.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {raw}")))
}

#[derive(Debug, Serialize)]
pub(crate) struct PlanRequest {
    #[serde(rename = "signatureType")]
    pub plan_tier: PlanTier,
}

// =============================================================================
// Document Models
// =============================================================================

/// Document as listed by the wallet service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    pub id: String,
    pub document_name: String,
    #[serde(rename = "walletDocumentType")]
    pub document_type: String,
    #[serde(rename = "userId")]
    pub owner_id: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WalletListResponse {
    #[serde(default)]
    pub wallet: Vec<RemoteDocument>,
}

/// Material needed to check a document signature offline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerificationMaterial {
    pub hash: String,
    /// Base64 RSA signature over `hash`.
    #[serde(rename = "hashRsa")]
    pub signed_hash: String,
    /// Base64 DER or PEM encoded RSA public key.
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

/// Locally persisted document record.
///
/// The same shape backs both the validated store and the invalid (staging)
/// store; which array holds it is what carries the status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub document_name: String,
    pub message: String,
    pub hash: String,
    #[serde(rename = "hashRsa")]
    pub signed_hash: String,
    pub public_key: String,
    #[serde(rename = "imageUri", default, skip_serializing_if = "Option::is_none")]
    pub local_image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<String>,
}

impl StoredDocument {
    pub fn new(
        id: impl Into<String>,
        document_name: impl Into<String>,
        message: impl Into<String>,
        material: VerificationMaterial,
    ) -> Self {
        Self {
            id: id.into(),
            document_name: document_name.into(),
            message: message.into(),
            hash: material.hash,
            signed_hash: material.signed_hash,
            public_key: material.public_key,
            local_image_uri: None,
            base64_image: None,
        }
    }

    pub fn material(&self) -> VerificationMaterial {
        VerificationMaterial {
            hash: self.hash.clone(),
            signed_hash: self.signed_hash.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

/// Base64 image kept in local storage on the web platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebImage {
    pub id: String,
    pub document_name: String,
    pub base64_image: String,
}

/// Records stored in the id-keyed local arrays.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for StoredDocument {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for WebImage {
    fn id(&self) -> &str {
        &self.id
    }
}

// =============================================================================
// Platform Models
// =============================================================================

/// Host environment the client runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Device filesystem is available for document images.
    #[default]
    Native,
    /// Only key-value storage is available; images are kept base64-encoded.
    Web,
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "ios" | "android" => Ok(Platform::Native),
            "web" => Ok(Platform::Web),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// File handed over by a platform file picker for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRef {
    /// A file on the device, addressed by path or `file://` URI.
    NativeUri {
        uri: String,
        name: String,
        mime: String,
    },
    /// In-memory blob produced by a browser file input.
    WebBlob {
        data: Vec<u8>,
        name: String,
        mime: String,
    },
}

impl FileRef {
    pub fn name(&self) -> &str {
        match self {
            FileRef::NativeUri { name, .. } | FileRef::WebBlob { name, .. } => name,
        }
    }

    pub fn mime(&self) -> &str {
        match self {
            FileRef::NativeUri { mime, .. } | FileRef::WebBlob { mime, .. } => mime,
        }
    }

    /// Local path of a native file reference.
    pub fn native_path(&self) -> Option<PathBuf> {
        match self {
            FileRef::NativeUri { uri, .. } => {
                Some(PathBuf::from(uri.strip_prefix("file://").unwrap_or(uri)))
            }
            FileRef::WebBlob { .. } => None,
        }
    }
}
