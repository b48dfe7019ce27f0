use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::wheel::SpinVariant;

// Bundled copy of config.toml, written next to the executable when the
// external file is missing.
const DEFAULT_CONFIG: &str = include_str!("../../config.toml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub wheel: WheelConfig,
    pub ui: UiConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub app_name: String,
    pub refresh_rate_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WheelConfig {
    pub variant: String,
}

impl WheelConfig {
    pub fn spin_variant(&self) -> SpinVariant {
        SpinVariant::from_str(&self.variant).unwrap_or_else(|| {
            log::warn!(
                "Unknown wheel variant {:?}, using {}",
                self.variant,
                SpinVariant::default().as_str()
            );
            SpinVariant::default()
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    pub mouse_support: bool,
    #[serde(default = "default_true")]
    pub haptics: bool,
    pub spin_key: String,
    pub quit_key: String,
    #[serde(default = "default_button_label")]
    pub button_label: String,
}

fn default_true() -> bool {
    true
}

fn default_button_label() -> String {
    "Spin".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeConfig {
    pub dark: DarkTheme,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DarkTheme {
    pub background: String,
    pub foreground: String,
    pub wheel_color: String,
    pub pointer_color: String,
    pub label_color: String,
    pub button_color: String,
    pub button_text_color: String,
    pub selection_color: String,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config file")
    }

    pub fn bundled() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG).context("Failed to parse bundled default config")
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;

        Ok(())
    }

    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Ok(config) => Ok(config),
            Err(load_err) => {
                log::warn!(
                    "Falling back to bundled default config: {}. A new config will be written to {:?} if possible.",
                    load_err,
                    path.as_ref()
                );

                let default_config = Self::bundled()?;

                if let Err(save_err) = default_config.save(path.as_ref()) {
                    log::warn!("Failed to write default config: {}", save_err);
                }

                Ok(default_config)
            }
        }
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<Config>>,
    config_path: std::path::PathBuf,
}

impl ConfigManager {
    pub fn new(config: Config, config_path: std::path::PathBuf) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    /// Shared handle that the watcher swaps on reload.
    pub fn get_config(&self) -> Arc<RwLock<Config>> {
        Arc::clone(&self.config)
    }

    pub fn watch(self: Arc<Self>) -> Result<()> {
        use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
        use std::sync::mpsc::channel;

        let (tx, rx) = channel::<Result<Event, notify::Error>>();

        let mut watcher = RecommendedWatcher::new(tx, notify::Config::default())
            .context("Failed to create file watcher")?;

        watcher
            .watch(self.config_path.as_ref(), RecursiveMode::NonRecursive)
            .context("Failed to watch config file")?;

        let config = Arc::clone(&self.config);
        let config_path = self.config_path.clone();

        std::thread::spawn(move || {
            // Keep watcher alive
            let _watcher = watcher;

            loop {
                match rx.recv() {
                    Ok(Ok(event)) => {
                        use notify::EventKind;
                        if let EventKind::Modify(_) | EventKind::Create(_) = event.kind {
                            // Editors write in several steps
                            std::thread::sleep(std::time::Duration::from_millis(100));

                            match Config::load(&config_path) {
                                Ok(new_config) => {
                                    *config.write() = new_config;
                                    log::info!("Configuration reloaded successfully");
                                }
                                Err(e) => {
                                    log::error!("Failed to reload config: {}", e);
                                }
                            }
                        }
                    }
                    Ok(Err(e)) => {
                        log::error!("Watch error: {:?}", e);
                    }
                    Err(e) => {
                        log::error!("Channel error: {:?}", e);
                        break;
                    }
                }
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_config_parses() {
        let config = Config::bundled().expect("bundled config");
        assert_eq!(config.general.app_name, "Genre Wheel");
        assert_eq!(config.wheel.spin_variant(), SpinVariant::Decelerating);
        assert!(config.ui.haptics);
        assert_eq!(config.ui.spin_key, "space");
    }

    #[test]
    fn unknown_variant_falls_back_to_default() {
        let wheel = WheelConfig {
            variant: "wobbly".to_string(),
        };
        assert_eq!(wheel.spin_variant(), SpinVariant::default());

        let wheel = WheelConfig {
            variant: "Simple".to_string(),
        };
        assert_eq!(wheel.spin_variant(), SpinVariant::Simple);
    }

    #[test]
    fn optional_ui_fields_have_defaults() {
        let content = r##"
[general]
app_name = "Wheel"
refresh_rate_ms = 33

[wheel]
variant = "simple"

[ui]
mouse_support = false
spin_key = "s"
quit_key = "q"

[theme.dark]
background = "#000000"
foreground = "#FFFFFF"
wheel_color = "#FFFFFF"
pointer_color = "#FF0000"
label_color = "#FFFF00"
button_color = "#0000FF"
button_text_color = "#FFFFFF"
selection_color = "#00FF00"
"##;
        let config = Config::parse(content).expect("parse ok");
        assert!(config.ui.haptics);
        assert_eq!(config.ui.button_label, "Spin");
        assert_eq!(config.general.refresh_rate_ms, 33);
    }

    #[test]
    fn missing_section_is_an_error() {
        assert!(Config::parse("[general]\napp_name = \"x\"\nrefresh_rate_ms = 1\n").is_err());
    }
}
