//! Filesystem-backed asset bucket.
//!
//! Uploaded marketing assets (covers, photos, og images) land as flat files
//! under a configured root. Names are validated by [`AssetName`] before they
//! ever reach this module, so the bucket cannot be escaped.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::fs;

use crate::models::AssetName;

/// Metadata for one stored asset
#[derive(Debug, Clone, Serialize)]
pub struct AssetInfo {
    pub name: String,
    pub size: u64,
}

/// Flat-file asset bucket rooted at a configured directory
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the bucket directory if missing
    pub async fn ensure_root(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.root).await
    }

    /// Absolute path of an asset
    pub fn path_of(&self, name: &AssetName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Write an asset, replacing any existing object of the same name
    pub async fn put(&self, name: &AssetName, bytes: &[u8]) -> std::io::Result<AssetInfo> {
        self.ensure_root().await?;
        let path = self.path_of(name);
        fs::write(&path, bytes).await?;

        Ok(AssetInfo {
            name: name.as_str().to_owned(),
            size: bytes.len() as u64,
        })
    }

    /// List stored assets in name order; subdirectories are ignored
    pub async fn list(&self) -> std::io::Result<Vec<AssetInfo>> {
        let mut infos = Vec::new();
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            // An absent bucket is just empty
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(infos),
            Err(err) => return Err(err),
        };

        while let Some(entry) = entries.next_entry().await? {
            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                infos.push(AssetInfo {
                    name,
                    size: meta.len(),
                });
            }
        }

        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    /// Delete an asset; Ok(false) when it was not there
    pub async fn delete(&self, name: &AssetName) -> std::io::Result<bool> {
        match fs::remove_file(self.path_of(name)).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> AssetName {
        AssetName::new(s).unwrap()
    }

    #[tokio::test]
    async fn put_list_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path());

        let info = store.put(&name("hero.png"), b"png bytes").await.unwrap();
        assert_eq!(info.size, 9);

        store.put(&name("cover.webp"), b"x").await.unwrap();

        let listed = store.list().await.unwrap();
        let names: Vec<_> = listed.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["cover.webp", "hero.png"]);

        assert!(store.delete(&name("hero.png")).await.unwrap());
        assert!(!store.delete(&name("hero.png")).await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn put_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path());

        store.put(&name("a.txt"), b"first").await.unwrap();
        let info = store.put(&name("a.txt"), b"second!").await.unwrap();
        assert_eq!(info.size, 7);

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].size, 7);
    }

    #[tokio::test]
    async fn missing_root_lists_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("never-created"));
        assert!(store.list().await.unwrap().is_empty());
    }
}
