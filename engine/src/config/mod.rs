mod config_content_provider;
mod config_manager;
mod config_serializer;
mod game_config;
mod validate;

pub use config_content_provider::{
    ConfigContentProvider, FileContentConfigProvider, MemoryContentConfigProvider,
};
pub use config_manager::ConfigManager;
pub use config_serializer::{ConfigSerializer, YamlConfigSerializer};
pub use game_config::{
    GameConfig, LARGE_BOARD_MAX_NODES, LARGE_BOARD_SIZE, PlayerKind, SearchLimitsConfig,
};
pub use validate::Validate;
