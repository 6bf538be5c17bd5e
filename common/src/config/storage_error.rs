#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Serialize(String),
    Deserialize(String),
    Invalid(String),
    Unavailable(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Serialize(e) => write!(f, "Failed to serialize: {}", e),
            StorageError::Deserialize(e) => write!(f, "Failed to deserialize: {}", e),
            StorageError::Invalid(e) => write!(f, "Validation error: {}", e),
            StorageError::Unavailable(e) => write!(f, "Storage unavailable: {}", e),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}
