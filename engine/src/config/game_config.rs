use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::tictactoe::{
    BotType, FirstPlayerMode, Player, SearchLimits, validate_board_size,
};

/// Boards from this size up get a node budget unless the config sets one.
pub const LARGE_BOARD_SIZE: usize = 8;
pub const LARGE_BOARD_MAX_NODES: u64 = 2_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Computer(BotType),
}

impl PlayerKind {
    pub fn is_human(self) -> bool {
        self == PlayerKind::Human
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimitsConfig {
    pub max_nodes: Option<u64>,
    pub time_limit_ms: Option<u64>,
}

impl Validate for SearchLimitsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_nodes == Some(0) {
            return Err("max_nodes must be positive when set".to_string());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive when set".to_string());
        }
        Ok(())
    }
}

impl From<SearchLimitsConfig> for SearchLimits {
    fn from(config: SearchLimitsConfig) -> Self {
        SearchLimits {
            max_nodes: config.max_nodes,
            time_limit: config.time_limit_ms.map(Duration::from_millis),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub board_size: usize,
    pub player_x: PlayerKind,
    pub player_o: PlayerKind,
    pub first_player: FirstPlayerMode,
    pub seed: Option<u64>,
    pub search: SearchLimitsConfig,
}

impl GameConfig {
    pub fn player_kind(&self, player: Player) -> PlayerKind {
        match player {
            Player::X => self.player_x,
            Player::O => self.player_o,
        }
    }

    /// Limits for the engine on this board. Small boards search their whole depth table
    /// unless limited explicitly.
    pub fn search_limits(&self) -> SearchLimits {
        let mut limits = SearchLimits::from(self.search);
        if limits.max_nodes.is_none() && self.board_size >= LARGE_BOARD_SIZE {
            limits.max_nodes = Some(LARGE_BOARD_MAX_NODES);
        }
        limits
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 3,
            player_x: PlayerKind::Human,
            player_o: PlayerKind::Computer(BotType::Minimax),
            first_player: FirstPlayerMode::Random,
            seed: None,
            search: SearchLimitsConfig::default(),
        }
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        validate_board_size(self.board_size)?;
        self.search.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ConfigContentProvider, ConfigManager, ConfigSerializer, FileContentConfigProvider,
        MemoryContentConfigProvider, YamlConfigSerializer,
    };

    fn get_temp_file_path() -> std::path::PathBuf {
        let random_number: u32 = rand::random();
        std::env::temp_dir().join(format!("temp_tictactoe_config_{}.yaml", random_number))
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let config = GameConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&config).unwrap();
        let deserialized: GameConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_file() {
        let config = GameConfig {
            board_size: 5,
            player_x: PlayerKind::Computer(BotType::Random),
            first_player: FirstPlayerMode::O,
            seed: Some(42),
            search: SearchLimitsConfig {
                max_nodes: None,
                time_limit_ms: Some(250),
            },
            ..GameConfig::default()
        };
        let file_path = get_temp_file_path();
        let manager = ConfigManager::from_yaml_file(file_path.clone());

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let fresh: ConfigManager<GameConfig, _, _> = ConfigManager::from_yaml_file(file_path.clone());
        assert_eq!(fresh.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_missing_content_returns_default_config() {
        let manager: ConfigManager<GameConfig, _, _> = ConfigManager::new(
            MemoryContentConfigProvider::default(),
            YamlConfigSerializer::new(),
        );
        assert_eq!(manager.get_config().unwrap(), GameConfig::default());

        let manager: ConfigManager<GameConfig, _, _> =
            ConfigManager::from_yaml_file("this_file_does_not_exist.yaml");
        assert_eq!(manager.get_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let content = r#"
            board_size: 4
            player_o: !Computer Random
            search:
              time_limit_ms: 100
        "#;
        let manager: ConfigManager<GameConfig, _> = ConfigManager::from_yaml_str(Some(content));
        let config = manager.get_config().unwrap();
        assert_eq!(config.board_size, 4);
        assert_eq!(config.player_x, PlayerKind::Human);
        assert_eq!(config.player_o, PlayerKind::Computer(BotType::Random));
        assert_eq!(config.search.max_nodes, None);
        assert_eq!(config.search.time_limit_ms, Some(100));
    }

    #[test]
    fn test_small_boards_default_to_unlimited_search() {
        for board_size in 3..LARGE_BOARD_SIZE {
            let config = GameConfig {
                board_size,
                ..GameConfig::default()
            };
            assert!(config.search_limits().is_unlimited(), "size {}", board_size);
        }
    }

    #[test]
    fn test_large_boards_default_to_node_budget() {
        for board_size in [LARGE_BOARD_SIZE, 10] {
            let config = GameConfig {
                board_size,
                ..GameConfig::default()
            };
            let limits = config.search_limits();
            assert_eq!(limits.max_nodes, Some(LARGE_BOARD_MAX_NODES));
            assert_eq!(limits.time_limit, None);
        }
    }

    #[test]
    fn test_configured_limits_win_over_board_default() {
        let search = SearchLimitsConfig {
            max_nodes: Some(5_000),
            time_limit_ms: Some(40),
        };
        for board_size in [4, 9] {
            let config = GameConfig {
                board_size,
                search,
                ..GameConfig::default()
            };
            let limits = config.search_limits();
            assert_eq!(limits.max_nodes, Some(5_000));
            assert_eq!(limits.time_limit, Some(Duration::from_millis(40)));
        }

        let timed = GameConfig {
            board_size: 9,
            search: SearchLimitsConfig {
                max_nodes: None,
                time_limit_ms: Some(40),
            },
            ..GameConfig::default()
        };
        assert_eq!(timed.search_limits().max_nodes, Some(LARGE_BOARD_MAX_NODES));
    }

    #[test]
    fn test_invalid_board_size_cant_be_read() {
        let provider = MemoryContentConfigProvider::new(Some("board_size: 11".to_string()));
        let manager: ConfigManager<GameConfig, _, _> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        let err = manager.get_config().unwrap_err();
        assert!(err.starts_with("Config validation error"), "{err}");
    }

    #[test]
    fn test_malformed_yaml_cant_be_read() {
        let provider = MemoryContentConfigProvider::new(Some("board_size: [".to_string()));
        let manager: ConfigManager<GameConfig, _, _> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        let err = manager.get_config().unwrap_err();
        assert!(err.starts_with("Failed to deserialize config"), "{err}");
    }

    #[test]
    fn test_invalid_config_is_not_saved() {
        let provider = MemoryContentConfigProvider::default();
        let manager: ConfigManager<GameConfig, _, _> =
            ConfigManager::new(provider, YamlConfigSerializer::new());
        let config = GameConfig {
            search: SearchLimitsConfig {
                max_nodes: Some(0),
                time_limit_ms: None,
            },
            ..GameConfig::default()
        };
        assert!(manager.set_config(&config).is_err());
        assert_eq!(manager.get_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn test_file_provider_round_trip() {
        let file_path = get_temp_file_path();
        let provider = FileContentConfigProvider::new(file_path.clone());
        provider.set_config_content("seed: 7\n").unwrap();
        assert_eq!(provider.get_config_content().unwrap().as_deref(), Some("seed: 7\n"));
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_search_limits_conversion() {
        let limits: SearchLimits = SearchLimitsConfig {
            max_nodes: Some(10),
            time_limit_ms: Some(1500),
        }
        .into();
        assert_eq!(limits.max_nodes, Some(10));
        assert_eq!(limits.time_limit, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn test_player_kind_lookup() {
        let config = GameConfig::default();
        assert!(config.player_kind(Player::X).is_human());
        assert_eq!(
            config.player_kind(Player::O),
            PlayerKind::Computer(BotType::Minimax)
        );
    }
}
