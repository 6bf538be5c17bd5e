use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

use crate::log_warn;
use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, StorageError, Validate,
    YamlConfigSerializer,
};

pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Arc<Mutex<Option<TConfig>>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: &str) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path.to_string()),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: Arc::new(Mutex::new(None)),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn get_config(&self) -> Result<TConfig, StorageError> {
        let mut current = self.config.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(config) = current.as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config: TConfig = self.config_serializer.deserialize(&config_data)?;
        config.validate().map_err(StorageError::Invalid)?;

        *current = Some(config.clone());
        Ok(config)
    }

    /// Like `get_config`, but a broken or unreadable store yields the default.
    pub fn load_or_default(&self) -> TConfig {
        match self.get_config() {
            Ok(config) => config,
            Err(e) => {
                log_warn!("Falling back to defaults: {}", e);
                TConfig::default()
            }
        }
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), StorageError> {
        config.validate().map_err(StorageError::Invalid)?;

        let serialized_config = self.config_serializer.serialize(config)?;

        // The cache is updated even if the write fails so the session keeps its values.
        let mut current = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        *current = Some(config.clone());
        drop(current);

        self.config_content_provider
            .set_config_content(&serialized_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemoryContentProvider;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        value: u32,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self { value: 7 }
        }
    }

    impl Validate for Sample {
        fn validate(&self) -> Result<(), String> {
            if self.value > 100 {
                return Err("value must not exceed 100".to_string());
            }
            Ok(())
        }
    }

    struct UnavailableProvider;

    impl ConfigContentProvider for UnavailableProvider {
        fn get_config_content(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("no storage".to_string()))
        }

        fn set_config_content(&self, _content: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("no storage".to_string()))
        }
    }

    fn memory_manager(content: Option<&str>) -> ConfigManager<MemoryContentProvider, Sample> {
        let provider = match content {
            Some(content) => MemoryContentProvider::with_content(content),
            None => MemoryContentProvider::new(),
        };
        ConfigManager::new(provider, YamlConfigSerializer::new())
    }

    #[test]
    fn test_empty_store_returns_default() {
        let manager = memory_manager(None);
        assert_eq!(manager.get_config().unwrap(), Sample::default());
    }

    #[test]
    fn test_stored_config_is_loaded() {
        let manager = memory_manager(Some("value: 42\n"));
        assert_eq!(manager.get_config().unwrap(), Sample { value: 42 });
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let manager = memory_manager(Some("value: 500\n"));
        assert!(matches!(manager.get_config(), Err(StorageError::Invalid(_))));
        assert_eq!(manager.load_or_default(), Sample::default());
    }

    #[test]
    fn test_garbage_content_falls_back_to_default() {
        let manager = memory_manager(Some("{{{ not yaml"));
        assert!(matches!(manager.get_config(), Err(StorageError::Deserialize(_))));
        assert_eq!(manager.load_or_default(), Sample::default());
    }

    #[test]
    fn test_set_config_persists_and_caches() {
        let provider = MemoryContentProvider::new();
        let manager: ConfigManager<_, Sample> =
            ConfigManager::new(provider.clone(), YamlConfigSerializer::new());
        manager.set_config(&Sample { value: 3 }).unwrap();
        assert_eq!(manager.get_config().unwrap(), Sample { value: 3 });
        assert!(provider.get_config_content().unwrap().unwrap().contains("value: 3"));
    }

    #[test]
    fn test_set_config_rejects_invalid_values() {
        let manager = memory_manager(None);
        assert!(manager.set_config(&Sample { value: 101 }).is_err());
        assert_eq!(manager.get_config().unwrap(), Sample::default());
    }

    #[test]
    fn test_unavailable_storage_keeps_in_memory_value() {
        let manager: ConfigManager<_, Sample> =
            ConfigManager::new(UnavailableProvider, YamlConfigSerializer::new());
        assert_eq!(manager.load_or_default(), Sample::default());
        assert!(manager.set_config(&Sample { value: 9 }).is_err());
        assert_eq!(manager.get_config().unwrap(), Sample { value: 9 });
    }
}
