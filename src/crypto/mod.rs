// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Offline document signature verification.
//!
//! The wallet service signs each document's `hash` string with RSASSA-PKCS1-v1_5
//! over SHA-256 and publishes the signature (`hashRsa`) and public key next to
//! it. Verification happens entirely on the device with `ring`.

pub mod keys;
pub mod signature;

#[cfg(test)]
pub(crate) mod fixtures;

pub use keys::RsaPublicKey;
pub use signature::{
    content_matches_hash, decode_signature, verify_hash_signature, Verdict,
};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid PEM: {0}")]
    InvalidPem(String),

    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("invalid DER: {0}")]
    InvalidDer(String),

    #[error("unsupported key: {0}")]
    UnsupportedKey(String),
}
