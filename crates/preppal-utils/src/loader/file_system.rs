use crate::loader::error::LoadingError;
use crate::loader::file::{File, FileMetadata};
use crate::loader::LoaderTrait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct FileSystemLoader {
    base: PathBuf,
}

impl FileSystemLoader {
    #[must_use]
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn full_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.base.join(path)
    }
}

impl LoaderTrait for FileSystemLoader {
    async fn load_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<File, LoadingError> {
        let full = self.full_path(&path);
        tracing::debug!(path = %full.display(), "loading file");
        let content = tokio::fs::read(&full).await?;
        let last_modified = tokio::fs::metadata(&full)
            .await?
            .modified()
            .ok()
            .map(DateTime::<Utc>::from);
        let metadata = FileMetadata::new(path.as_ref().to_string_lossy().to_string(), last_modified);
        Ok(File::new(metadata, content))
    }

    async fn store_file<P: AsRef<Path> + Send>(&self, path: P, content: &[u8]) -> Result<(), LoadingError> {
        let full = self.full_path(&path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tracing::debug!(path = %full.display(), size = content.len(), "storing file");
        tokio::fs::write(&full, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test(tokio::test)]
    async fn test_store_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileSystemLoader::new(dir.path().to_path_buf());

        loader.store_file("documents/a.pdf", b"content").await.unwrap();
        let file = loader.load_file("documents/a.pdf").await.unwrap();
        assert_eq!(file.content, b"content");
        assert_eq!(file.metadata.key, "documents/a.pdf");
    }

    #[test(tokio::test)]
    async fn test_load_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FileSystemLoader::new(dir.path().to_path_buf());
        assert!(loader.load_file("nope.pdf").await.is_err());
    }
}
