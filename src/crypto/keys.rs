// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RSA public key decoding.
//!
//! The wallet service hands out keys in whichever encoding its revision
//! produced: a PEM block (`PUBLIC KEY` or `RSA PUBLIC KEY`), or bare base64
//! of the DER, either X.509 SubjectPublicKeyInfo or PKCS#1 `RSAPublicKey`.
//! Everything is normalized to the PKCS#1 DER that `ring` verifies with.

use base64ct::{Base64, Encoding};
use rsa::pkcs1::{DecodeRsaPublicKey, EncodeRsaPublicKey};
use rsa::pkcs8::DecodePublicKey;

use super::SignatureError;

/// RSA public key as PKCS#1 `RSAPublicKey` DER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicKey {
    der: Vec<u8>,
}

impl RsaPublicKey {
    /// Decode a PEM or base64 DER public key.
    pub fn decode(input: &str) -> Result<Self, SignatureError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(SignatureError::InvalidDer("empty public key".to_string()));
        }

        if input.contains("-----BEGIN") {
            return Self::from_pem(input);
        }

        let der = decode_base64(input)?;
        Self::from_der(&der)
    }

    pub fn from_pem(input: &str) -> Result<Self, SignatureError> {
        let block = pem::parse(input).map_err(|e| SignatureError::InvalidPem(e.to_string()))?;
        let key = match block.tag() {
            "PUBLIC KEY" => rsa::RsaPublicKey::from_public_key_der(block.contents())
                .map_err(|e| SignatureError::InvalidDer(e.to_string()))?,
            "RSA PUBLIC KEY" => rsa::RsaPublicKey::from_pkcs1_der(block.contents())
                .map_err(|e| SignatureError::InvalidDer(e.to_string()))?,
            other => return Err(SignatureError::UnsupportedKey(other.to_string())),
        };
        Self::from_key(&key)
    }

    /// Accepts SubjectPublicKeyInfo or PKCS#1 DER.
    pub fn from_der(der: &[u8]) -> Result<Self, SignatureError> {
        let key = rsa::RsaPublicKey::from_public_key_der(der)
            .or_else(|_| rsa::RsaPublicKey::from_pkcs1_der(der))
            .map_err(|e| SignatureError::InvalidDer(e.to_string()))?;
        Self::from_key(&key)
    }

    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    fn from_key(key: &rsa::RsaPublicKey) -> Result<Self, SignatureError> {
        let der = key
            .to_pkcs1_der()
            .map_err(|e| SignatureError::InvalidDer(e.to_string()))?;
        Ok(Self {
            der: der.as_bytes().to_vec(),
        })
    }
}

/// Decode standard base64, ignoring embedded whitespace and line breaks.
pub(crate) fn decode_base64(input: &str) -> Result<Vec<u8>, SignatureError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    Base64::decode_vec(&compact).map_err(|e| SignatureError::InvalidBase64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::fixtures::{
        PKCS1_PUBLIC_KEY_PEM, SPKI_PUBLIC_KEY_BASE64, SPKI_PUBLIC_KEY_PEM,
    };

    fn pem_body(pem: &str) -> String {
        pem.lines().filter(|line| !line.starts_with("-----")).collect()
    }

    #[test]
    fn all_encodings_decode_to_the_same_key() {
        let from_spki_pem = RsaPublicKey::decode(SPKI_PUBLIC_KEY_PEM).unwrap();
        let from_spki_b64 = RsaPublicKey::decode(SPKI_PUBLIC_KEY_BASE64).unwrap();
        let from_pkcs1_pem = RsaPublicKey::decode(PKCS1_PUBLIC_KEY_PEM).unwrap();
        let from_pkcs1_b64 = RsaPublicKey::decode(&pem_body(PKCS1_PUBLIC_KEY_PEM)).unwrap();

        assert_eq!(from_spki_pem, from_spki_b64);
        assert_eq!(from_spki_pem, from_pkcs1_pem);
        assert_eq!(from_spki_pem, from_pkcs1_b64);
    }

    #[test]
    fn spki_is_normalized_to_pkcs1_der() {
        let key = RsaPublicKey::decode(SPKI_PUBLIC_KEY_PEM).unwrap();
        let pkcs1 = decode_base64(&pem_body(PKCS1_PUBLIC_KEY_PEM)).unwrap();
        assert_eq!(key.as_der(), pkcs1.as_slice());
    }

    #[test]
    fn base64_with_line_breaks_is_accepted() {
        let wrapped = pem_body(SPKI_PUBLIC_KEY_PEM)
            .as_bytes()
            .chunks(64)
            .map(|chunk| std::str::from_utf8(chunk).unwrap())
            .collect::<Vec<_>>()
            .join("\n");
        assert!(RsaPublicKey::decode(&wrapped).is_ok());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            RsaPublicKey::decode("not base64 !!"),
            Err(SignatureError::InvalidBase64(_))
        ));
        assert!(matches!(
            RsaPublicKey::decode("AAAA"),
            Err(SignatureError::InvalidDer(_))
        ));
        assert!(matches!(
            RsaPublicKey::decode(""),
            Err(SignatureError::InvalidDer(_))
        ));
    }

    #[test]
    fn unsupported_pem_tag_is_rejected() {
        let cert = SPKI_PUBLIC_KEY_PEM.replace("PUBLIC KEY", "CERTIFICATE");
        assert!(matches!(
            RsaPublicKey::decode(&cert),
            Err(SignatureError::UnsupportedKey(_))
        ));
    }

    #[test]
    fn truncated_der_is_rejected() {
        let der = decode_base64(SPKI_PUBLIC_KEY_BASE64).unwrap();
        assert!(matches!(
            RsaPublicKey::from_der(&der[..der.len() - 10]),
            Err(SignatureError::InvalidDer(_))
        ));
    }
}
