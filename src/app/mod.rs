pub mod config;
pub mod state;

pub use config::{Config, ConfigManager};
pub use state::AppState;

use anyhow::{Context, Result};
use crossterm::event::Event as CrosstermEvent;
use ratatui::layout::Rect;
use std::env;
use std::sync::Arc;
use std::time::Instant;

use crate::wheel::Wheel;

pub struct App {
    pub state: AppState,
    /// Holds the hot-reload watcher's manager for the life of the app.
    pub _config_manager: Option<Arc<ConfigManager>>,
}

impl App {
    pub async fn new(viewport: Rect) -> Result<Self> {
        let mut config_path = env::current_exe()?;
        config_path.set_file_name("config.toml");

        let config = Config::load_or_default(&config_path)?;

        let config_manager = ConfigManager::new(config, config_path);

        if let Err(e) = config_manager.clone().watch() {
            log::warn!("Failed to start config hot reload: {}", e);
        } else {
            log::info!("Config hot reload enabled");
        }

        let wheel = Wheel::genres().context("Invalid genre wheel layout")?;
        log::info!(
            "Wheel ready: {} labels, {:.2} degree slices",
            wheel.len(),
            wheel.slice_width()
        );

        let state = AppState::new(config_manager.get_config(), wheel, viewport);

        Ok(Self {
            state,
            _config_manager: Some(config_manager),
        })
    }

    pub async fn handle_event(&mut self, event: CrosstermEvent) -> Result<bool> {
        self.state.handle_event(event).await
    }

    pub fn handle_tick(&mut self) {
        self.state.handle_tick(Instant::now());
    }
}
