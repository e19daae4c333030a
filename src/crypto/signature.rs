// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signature check over a document's hash string.
//!
//! The message that was signed is the `hash` field itself (its UTF-8 bytes),
//! not the document content. A valid verdict therefore means "the service
//! signed this hash string", not "these bytes match the signed hash".
//! [`content_matches_hash`] is the separate content check; it does not
//! influence the verdict.

use std::fmt;

use ring::signature::{UnparsedPublicKey, RSA_PKCS1_2048_8192_SHA256};
use sha2::{Digest, Sha256};

use super::keys::{decode_base64, RsaPublicKey};
use super::SignatureError;
use crate::models::VerificationMaterial;

/// Outcome of a signature check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// Human-readable verdict shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Valid => "valid signature",
            Verdict::Invalid => "invalid signature",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Decode a base64 signature into raw bytes.
pub fn decode_signature(signed_hash: &str) -> Result<Vec<u8>, SignatureError> {
    let bytes = decode_base64(signed_hash)?;
    if bytes.is_empty() {
        return Err(SignatureError::InvalidBase64("empty signature".to_string()));
    }
    Ok(bytes)
}

/// Verify `material.signed_hash` over `material.hash` with `material.public_key`.
///
/// Decoding failures are errors; a well-formed signature that does not match
/// yields [`Verdict::Invalid`].
pub fn verify_hash_signature(material: &VerificationMaterial) -> Result<Verdict, SignatureError> {
    let key = RsaPublicKey::decode(&material.public_key)?;
    let signature = decode_signature(&material.signed_hash)?;

    // ring recomputes SHA-256 over the message before the PKCS#1 check.
    let verifier = UnparsedPublicKey::new(&RSA_PKCS1_2048_8192_SHA256, key.as_der());
    match verifier.verify(material.hash.as_bytes(), &signature) {
        Ok(()) => Ok(Verdict::Valid),
        Err(_) => Ok(Verdict::Invalid),
    }
}

/// Whether `content` hashes (SHA-256, hex, case-insensitive) to `hash`.
pub fn content_matches_hash(content: &[u8], hash: &str) -> bool {
    hex::encode(Sha256::digest(content)).eq_ignore_ascii_case(hash.trim())
}
