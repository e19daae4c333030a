// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the client. Configuration is loaded from the environment once
//! at startup by [`ClientConfig::from_env`].
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `API_BASE_URL` | Fallback base URL for every remote service | `http://localhost:8080` |
//! | `AUTH_API_URL` | Authentication service base URL | `API_BASE_URL` |
//! | `SIGNATURE_API_URL` | Subscription service base URL | `API_BASE_URL` |
//! | `WALLET_API_URL` | Wallet service base URL | `API_BASE_URL` |
//! | `REGISTER_PATH` | Sign-up endpoint path | `/api/user/create` |
//! | `DATA_DIR` | Root directory for local key-value storage | `./.docwallet` |
//! | `DOCUMENTS_DIR` | Directory for downloaded document images (native) | `$DATA_DIR/documents` |
//! | `PLATFORM` | Host environment (`native` or `web`) | `native` |
//! | `REQUEST_TIMEOUT_SECS` | HTTP request timeout | `15` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,docwallet_client=debug` |

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::models::Platform;

/// Fallback base URL for all services.
pub const API_BASE_URL_ENV: &str = "API_BASE_URL";

/// Authentication service base URL.
pub const AUTH_API_URL_ENV: &str = "AUTH_API_URL";

/// Subscription ("signature") service base URL.
pub const SIGNATURE_API_URL_ENV: &str = "SIGNATURE_API_URL";

/// Wallet service base URL.
pub const WALLET_API_URL_ENV: &str = "WALLET_API_URL";

/// Sign-up endpoint path. Revisions of the backend expose either
/// `/api/user/create` or `/api/user/register`.
pub const REGISTER_PATH_ENV: &str = "REGISTER_PATH";

/// Root directory of the local key-value store.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Directory that receives downloaded document images on native hosts.
pub const DOCUMENTS_DIR_ENV: &str = "DOCUMENTS_DIR";

/// Host environment selector.
pub const PLATFORM_ENV: &str = "PLATFORM";

/// HTTP request timeout in seconds.
pub const REQUEST_TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_SECS";

/// Logging output format (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_REGISTER_PATH: &str = "/api/user/create";
pub const DEFAULT_DATA_DIR: &str = "./.docwallet";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {value}")]
    InvalidUrl { name: String, value: String },

    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: String, value: String },
}

/// Client configuration shared by every store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub auth_base_url: String,
    pub signature_base_url: String,
    pub wallet_base_url: String,
    pub register_path: String,
    pub data_dir: PathBuf,
    pub documents_dir: PathBuf,
    pub platform: Platform,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL, DEFAULT_DATA_DIR)
    }
}

impl ClientConfig {
    /// Configuration pointing every service at one base URL.
    pub fn with_base_url(base_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        let base_url = base_url.into();
        let data_dir = data_dir.into();
        Self {
            auth_base_url: base_url.clone(),
            signature_base_url: base_url.clone(),
            wallet_base_url: base_url,
            register_path: DEFAULT_REGISTER_PATH.to_string(),
            documents_dir: data_dir.join("documents"),
            data_dir,
            platform: Platform::Native,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = var(API_BASE_URL_ENV).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let base_url = validate_url(API_BASE_URL_ENV, base_url)?;

        let service_url = |name: &str| -> Result<String, ConfigError> {
            match var(name) {
                Some(value) => validate_url(name, value),
                None => Ok(base_url.clone()),
            }
        };
        let auth_base_url = service_url(AUTH_API_URL_ENV)?;
        let signature_base_url = service_url(SIGNATURE_API_URL_ENV)?;
        let wallet_base_url = service_url(WALLET_API_URL_ENV)?;

        let register_path = var(REGISTER_PATH_ENV).unwrap_or_else(|| DEFAULT_REGISTER_PATH.to_string());

        let data_dir = PathBuf::from(var(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));
        let documents_dir = var(DOCUMENTS_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("documents"));

        let platform = match var(PLATFORM_ENV) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: PLATFORM_ENV.to_string(),
                value,
            })?,
            None => Platform::Native,
        };

        let request_timeout = match var(REQUEST_TIMEOUT_ENV) {
            Some(value) => value
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidValue {
                    name: REQUEST_TIMEOUT_ENV.to_string(),
                    value,
                })?,
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self {
            auth_base_url,
            signature_base_url,
            wallet_base_url,
            register_path,
            data_dir,
            documents_dir,
            platform,
            request_timeout,
        })
    }
}

fn validate_url(name: &str, value: String) -> Result<String, ConfigError> {
    match Url::parse(&value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(value.trim_end_matches('/').to_string())
        }
        _ => Err(ConfigError::InvalidUrl {
            name: name.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.documents_dir, PathBuf::from("./.docwallet/documents"));
        assert_eq!(config.platform, Platform::Native);
    }

    #[test]
    fn service_urls_fall_back_to_base_url() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_BASE_URL_ENV, "https://api.example.com/"),
            (WALLET_API_URL_ENV, "https://wallet.example.com:8082"),
        ]))
        .unwrap();

        assert_eq!(config.auth_base_url, "https://api.example.com");
        assert_eq!(config.signature_base_url, "https://api.example.com");
        assert_eq!(config.wallet_base_url, "https://wallet.example.com:8082");
    }

    #[test]
    fn platform_and_timeout_are_parsed() {
        let config = ClientConfig::from_lookup(lookup(&[
            (PLATFORM_ENV, "web"),
            (REQUEST_TIMEOUT_ENV, "30"),
            (DATA_DIR_ENV, "/tmp/wallet"),
            (REGISTER_PATH_ENV, "/api/user/register"),
        ]))
        .unwrap();

        assert_eq!(config.platform, Platform::Web);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.documents_dir, PathBuf::from("/tmp/wallet/documents"));
        assert_eq!(config.register_path, "/api/user/register");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(AUTH_API_URL_ENV, "not a url")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = ClientConfig::from_lookup(lookup(&[(PLATFORM_ENV, "desktop")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = ClientConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_ENV, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
