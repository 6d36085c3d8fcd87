//! Filesystem storage for uploaded image artifacts.
//!
//! Decoded bytes land under `{root}/{measure_uuid}.{ext}` and are served
//! back at `/images/{filename}` by the static route.

use std::path::{Path, PathBuf};

/// Writes image artifacts under a fixed root directory.
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory artifacts are written to (and served from).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist decoded image bytes under the assigned storage name.
    ///
    /// Creates the root directory on first use.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.root.join(filename);
        tokio::fs::write(&path, bytes).await?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored image artifact");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn saves_bytes_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path().join("nested"));

        let path = store.save("abc.png", b"bytes").await.unwrap();

        assert_eq!(path, dir.path().join("nested").join("abc.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path());

        store.save("a.png", b"one").await.unwrap();
        store.save("a.png", b"two").await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.png")).unwrap(), b"two");
    }
}
