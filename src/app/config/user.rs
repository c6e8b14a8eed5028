use serde::{Deserialize, Serialize};

/// User-editable configuration (ReadOnly by App after load)
/// stored in `config.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Catalog document: a path or an http(s) URL
    #[serde(default = "default_catalog")]
    pub catalog: String,
    /// Base for relative track locators. Defaults to the catalog's own location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_root: Option<String>,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub visualizer: VisualizerConfig,
    #[serde(default)]
    pub logging: LogConfig,
    #[serde(default)]
    pub keys: crate::app::keys::KeyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    /// FFT window; the equalizer shows `fft_size / 2` bins
    pub fft_size: usize,
    /// Lowest bins are mostly DC and rumble, skip them when drawing
    pub bin_offset: usize,
    pub frame_interval_ms: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            fft_size: 512,
            bin_offset: 5,
            frame_interval_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `trace`, `debug`, `info`, `warn` or `error`. `RUST_LOG` wins when set.
    pub level: String,
    /// Log file path. Defaults to `soundvibes.log` in the config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

fn default_catalog() -> String {
    "./data/songsData.json".to_string()
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_tick_interval() -> u64 {
    50
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            media_root: None,
            poll_interval_ms: default_poll_interval(),
            tick_interval_ms: default_tick_interval(),
            visualizer: VisualizerConfig::default(),
            logging: LogConfig::default(),
            keys: crate::app::keys::KeyConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert_eq!(config.catalog, "./data/songsData.json");
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.visualizer.fft_size, 512);
        assert_eq!(config.visualizer.bin_offset, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config: UserConfig = toml::from_str(
            r#"
            catalog = "https://example.com/songs.json"

            [visualizer]
            fft_size = 1024

            [keys]
            quit = "Q"
            "#,
        )
        .unwrap();
        assert_eq!(config.catalog, "https://example.com/songs.json");
        assert_eq!(config.visualizer.fft_size, 1024);
        assert_eq!(config.visualizer.frame_interval_ms, 16);
        assert_eq!(config.keys.quit, "Q");
        assert_eq!(config.keys.stop, "s");
    }

    #[test]
    fn test_default_round_trips_through_toml() {
        let text = toml::to_string_pretty(&UserConfig::default()).unwrap();
        let back: UserConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.catalog, UserConfig::default().catalog);
    }
}
