use serde::{Deserialize, Serialize};

use super::StorageError;

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, StorageError>;
    fn deserialize(&self, content: &str) -> Result<TConfig, StorageError>;
}

pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlConfigSerializer {
    fn default() -> Self {
        Self
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, StorageError> {
        serde_yaml_ng::to_string(config).map_err(|e| StorageError::Serialize(e.to_string()))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, StorageError> {
        serde_yaml_ng::from_str(content).map_err(|e| StorageError::Deserialize(e.to_string()))
    }
}
