// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token persistence.
//!
//! Stores read the token fresh on every call, so a sign-out in one store is
//! seen immediately by the others.

use super::{LocalStorage, StorageResult, TOKEN_KEY};

/// Persisted token, treating an empty value as absent.
pub fn load_token(storage: &dyn LocalStorage) -> StorageResult<Option<String>> {
    Ok(storage
        .get_item(TOKEN_KEY)?
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty()))
}

pub fn save_token(storage: &dyn LocalStorage, token: &str) -> StorageResult<()> {
    storage.set_item(TOKEN_KEY, token)
}

pub fn clear_token(storage: &dyn LocalStorage) -> StorageResult<()> {
    storage.remove_item(TOKEN_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn token_lifecycle() {
        let storage = MemoryStorage::new();
        assert_eq!(load_token(&storage).unwrap(), None);

        save_token(&storage, "tok123").unwrap();
        assert_eq!(load_token(&storage).unwrap().as_deref(), Some("tok123"));

        clear_token(&storage).unwrap();
        assert_eq!(load_token(&storage).unwrap(), None);
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let storage = MemoryStorage::new();
        storage.set_item(TOKEN_KEY, "  ").unwrap();
        assert_eq!(load_token(&storage).unwrap(), None);
    }
}
