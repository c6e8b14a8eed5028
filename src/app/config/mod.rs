use std::fs;
use std::path::PathBuf;

pub mod persistence;
pub mod user;

pub use persistence::PersistentState;
pub use user::{LogConfig, UserConfig, VisualizerConfig};

pub struct AppConfig;

impl AppConfig {
    pub fn get_config_dir() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let xdg_dir = home.join(".config").join("soundvibes");

        // Ensure it exists
        if !xdg_dir.exists() {
            let _ = std::fs::create_dir_all(&xdg_dir);
        }

        xdg_dir
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    pub fn get_state_path() -> PathBuf {
        Self::get_config_dir().join("state.toml")
    }

    pub fn get_log_path() -> PathBuf {
        Self::get_config_dir().join("soundvibes.log")
    }

    /// Load both. A missing `config.toml` is written out with defaults;
    /// unreadable or malformed files fall back to defaults.
    pub fn load() -> (UserConfig, PersistentState) {
        let config_path = Self::get_config_path();
        let state_path = Self::get_state_path();

        let user_config = if config_path.exists() {
            match fs::read_to_string(&config_path) {
                Ok(content) => parse_or_default(&content, "config.toml"),
                Err(_) => UserConfig::default(),
            }
        } else {
            let c = UserConfig::default();
            if let Ok(content) = toml::to_string_pretty(&c) {
                let _ = fs::write(&config_path, content);
            }
            c
        };

        let state = match fs::read_to_string(&state_path) {
            Ok(content) => parse_or_default(&content, "state.toml"),
            Err(_) => PersistentState::default(),
        };

        (user_config, state)
    }
}

fn parse_or_default<T: serde::de::DeserializeOwned + Default>(content: &str, name: &str) -> T {
    toml::from_str(content).unwrap_or_else(|e| {
        // Logging is not up yet when config loads
        eprintln!("soundvibes: ignoring malformed {}: {}", name, e);
        T::default()
    })
}
