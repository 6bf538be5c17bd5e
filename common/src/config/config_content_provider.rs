use std::io::ErrorKind;
use std::sync::{Arc, Mutex, PoisonError};

use super::StorageError;

pub trait ConfigContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, StorageError>;
    fn set_config_content(&self, content: &str) -> Result<(), StorageError>;
}

pub struct FileContentConfigProvider {
    file_path: String,
}

impl FileContentConfigProvider {
    pub fn new(file_path: String) -> Self {
        Self { file_path }
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }
}

impl ConfigContentProvider for FileContentConfigProvider {
    fn get_config_content(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.file_path.as_str()) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(err)),
        }
    }

    fn set_config_content(&self, content: &str) -> Result<(), StorageError> {
        std::fs::write(self.file_path.as_str(), content)?;
        Ok(())
    }
}

/// Keeps content in memory only. Used when no persistent storage is available.
#[derive(Clone, Default)]
pub struct MemoryContentProvider {
    content: Arc<Mutex<Option<String>>>,
}

impl MemoryContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: &str) -> Self {
        Self {
            content: Arc::new(Mutex::new(Some(content.to_string()))),
        }
    }
}

impl ConfigContentProvider for MemoryContentProvider {
    fn get_config_content(&self) -> Result<Option<String>, StorageError> {
        let content = self.content.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(content.clone())
    }

    fn set_config_content(&self, content: &str) -> Result<(), StorageError> {
        let mut current = self.content.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(content.to_string());
        Ok(())
    }
}
