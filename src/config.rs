use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::warn;
use wildroot_server::ServerOptions;
use wildroot_world::PlacementConfig;

const DEFAULT_CONFIG_PATH: &str = "config/economy.toml";

/// Economy server configuration, loaded from TOML with defaults for
/// anything missing or unparsable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Seed for all server-side randomness.
    pub world_seed: u64,
    /// Maximum distance an attack reaches a node from.
    pub attack_range: f64,
    /// Ticks the headless demo loop runs for.
    pub demo_ticks: u64,
    /// Raw damage per simulated demo attack.
    pub demo_attack_damage: u32,
    /// Node placement tunables.
    pub placement: PlacementConfig,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            world_seed: 0x5eed,
            attack_range: 6.0,
            demo_ticks: 3000,
            demo_attack_damage: 25,
            placement: PlacementConfig::default(),
        }
    }
}

impl EconomyConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<EconomyConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    EconomyConfig::default()
                }
            },
            Err(err) => {
                if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Economy config not found at {}. Using defaults",
                        path.display()
                    );
                }
                EconomyConfig::default()
            }
        }
    }

    /// Server options derived from this configuration.
    pub fn server_options(&self) -> ServerOptions {
        ServerOptions {
            world_seed: self.world_seed,
            attack_range: self.attack_range,
            placement: self.placement.clone(),
        }
    }
}
