mod config_content_provider;
mod config_manager;
mod config_serializer;
mod storage_error;
mod validate;

pub use config_content_provider::{ConfigContentProvider, FileContentConfigProvider, MemoryContentProvider};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use storage_error::StorageError;
pub use validate::Validate;
