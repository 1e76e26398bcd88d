use crate::core::{CardSource, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

/// Card data read from a local JSON file.
#[derive(Debug, Clone)]
pub struct FileSource {
    storage: LocalStorage,
    path: String,
}

impl FileSource {
    pub fn new(path: &str) -> Self {
        Self {
            storage: LocalStorage::new(String::new()),
            path: path.to_string(),
        }
    }
}

#[async_trait]
impl CardSource for FileSource {
    fn describe(&self) -> String {
        format!("file {}", self.path)
    }

    async fn fetch(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading card file: {}", self.path);
        self.storage.read_file(&self.path).await
    }
}
