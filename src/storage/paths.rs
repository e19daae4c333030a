// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Storage keys and their on-disk layout.

use std::path::{Path, PathBuf};

/// Bearer token of the current session.
pub const TOKEN_KEY: &str = "@docs:token";

/// JSON array of documents whose signature checked out.
pub const VALIDATED_DOCUMENTS_KEY: &str = "@validatedDocuments";

/// JSON array of downloaded documents awaiting validation.
pub const INVALID_DOCUMENTS_KEY: &str = "@invalidDocuments";

/// JSON array of base64 document images (web platform only).
pub const WEB_IMAGES_KEY: &str = "@webImages";

/// Maps storage keys and document images to paths under a root directory.
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl StoragePaths {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one file per key.
    pub fn items_dir(&self) -> PathBuf {
        self.root.join("items")
    }

    /// File backing a storage key.
    ///
    /// Keys carry characters such as `@` and `:` that are not portable in
    /// file names, so anything outside `[A-Za-z0-9_-]` becomes `_`.
    pub fn item(&self, key: &str) -> PathBuf {
        self.items_dir().join(format!("{}.json", file_stem(key)))
    }

    /// Image file for a downloaded document under `documents_dir`.
    pub fn document_image(documents_dir: &Path, document_id: &str, document_name: &str) -> PathBuf {
        documents_dir.join(format!(
            "{}_{}.png",
            file_stem(document_id),
            file_stem(document_name)
        ))
    }
}

fn file_stem(key: &str) -> String {
    key.trim_start_matches('@')
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_sanitized_files() {
        let paths = StoragePaths::new("/tmp/wallet");
        assert_eq!(
            paths.item(TOKEN_KEY),
            PathBuf::from("/tmp/wallet/items/docs_token.json")
        );
        assert_eq!(
            paths.item(VALIDATED_DOCUMENTS_KEY),
            PathBuf::from("/tmp/wallet/items/validatedDocuments.json")
        );
        assert_eq!(
            paths.item("../escape"),
            PathBuf::from("/tmp/wallet/items/___escape.json")
        );
    }

    #[test]
    fn document_images_combine_id_and_name() {
        assert_eq!(
            StoragePaths::document_image(Path::new("/docs"), "doc-1", "My Passport"),
            PathBuf::from("/docs/doc-1_My_Passport.png")
        );
    }
}
