use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider,
    MemoryContentConfigProvider, Validate, YamlConfigSerializer,
};

/// Bound shared by every config a manager can hold.
pub trait ManagedConfig: Clone + Default + Validate + Serialize + DeserializeOwned {}

impl<T> ManagedConfig for T where T: Clone + Default + Validate + Serialize + DeserializeOwned {}

/// Reads a config through a content provider and keeps the first valid copy it sees.
///
/// Nothing is cached while the provider has no content, so a file created later is
/// still picked up. `set_config` validates before writing and updates the cache only
/// after the provider accepted the new content.
pub struct ConfigManager<C, P = FileContentConfigProvider, S = YamlConfigSerializer> {
    provider: P,
    serializer: S,
    cached: Mutex<Option<C>>,
}

impl<C: ManagedConfig> ConfigManager<C> {
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentConfigProvider::new(file_path), YamlConfigSerializer)
    }
}

impl<C: ManagedConfig> ConfigManager<C, MemoryContentConfigProvider> {
    /// Manager over YAML text held in memory. `None` behaves like a missing file.
    pub fn from_yaml_str(content: Option<&str>) -> Self {
        Self::new(
            MemoryContentConfigProvider::new(content.map(str::to_string)),
            YamlConfigSerializer,
        )
    }
}

impl<C, P, S> ConfigManager<C, P, S>
where
    C: ManagedConfig,
    P: ConfigContentProvider,
    S: ConfigSerializer<C>,
{
    pub fn new(provider: P, serializer: S) -> Self {
        Self {
            provider,
            serializer,
            cached: Mutex::new(None),
        }
    }

    pub fn get_config(&self) -> Result<C, String> {
        let mut cached = self.lock_cache()?;
        if let Some(config) = cached.as_ref() {
            return Ok(config.clone());
        }

        let Some(content) = self.provider.get_config_content()? else {
            return Ok(C::default());
        };
        let config = validated(self.serializer.deserialize(&content)?)?;
        *cached = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &C) -> Result<(), String> {
        let config = validated(config.clone())?;
        let content = self.serializer.serialize(&config)?;

        let mut cached = self.lock_cache()?;
        self.provider.set_config_content(&content)?;
        *cached = Some(config);
        Ok(())
    }

    fn lock_cache(&self) -> Result<MutexGuard<'_, Option<C>>, String> {
        self.cached
            .lock()
            .map_err(|_| "Config cache lock poisoned".to_string())
    }
}

fn validated<C: Validate>(config: C) -> Result<C, String> {
    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;
    Ok(config)
}
