use anyhow::Result;
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::Instant;

use super::Config;
use crate::haptics::{self, Haptics};
use crate::ui;
use crate::wheel::{SpinController, SpinOutcome, Wheel};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub spinner: SpinController,
    /// Last known terminal size, used to hit-test mouse clicks.
    pub viewport: Rect,

    haptics: Box<dyn Haptics>,
    haptics_enabled: bool,
    variant_name: String,
    rng: StdRng,
}

impl AppState {
    pub fn new(config: Arc<RwLock<Config>>, wheel: Wheel, viewport: Rect) -> Self {
        let haptics_enabled = config.read().ui.haptics;
        Self::with_parts(
            config,
            wheel,
            viewport,
            haptics::from_config(haptics_enabled),
            StdRng::from_entropy(),
        )
    }

    pub fn with_parts(
        config: Arc<RwLock<Config>>,
        wheel: Wheel,
        viewport: Rect,
        haptics: Box<dyn Haptics>,
        rng: StdRng,
    ) -> Self {
        let (variant_name, haptics_enabled) = {
            let config = config.read();
            (config.wheel.variant.clone(), config.ui.haptics)
        };
        let variant = config.read().wheel.spin_variant();

        Self {
            config,
            spinner: SpinController::new(wheel, variant),
            viewport,
            haptics,
            haptics_enabled,
            variant_name,
            rng,
        }
    }

    pub async fn handle_event(&mut self, event: CrosstermEvent) -> Result<bool> {
        match event {
            CrosstermEvent::Key(key_event) => self.handle_key_event(key_event).await,
            CrosstermEvent::Mouse(mouse_event) => self.handle_mouse_event(mouse_event).await,
            CrosstermEvent::Resize(width, height) => {
                self.viewport = Rect::new(0, 0, width, height);
                Ok(true)
            }
            _ => Ok(true),
        }
    }

    async fn handle_key_event(&mut self, key: KeyEvent) -> Result<bool> {
        if key.kind == KeyEventKind::Release {
            return Ok(true);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(false);
        }

        let (spin_key, quit_key) = {
            let config = self.config.read();
            (
                parse_key(&config.ui.spin_key),
                parse_key(&config.ui.quit_key),
            )
        };

        if Some(key.code) == quit_key || key.code == KeyCode::Esc {
            return Ok(false);
        }

        if Some(key.code) == spin_key || key.code == KeyCode::Enter {
            self.spin(Instant::now());
        }

        Ok(true)
    }

    async fn handle_mouse_event(&mut self, mouse: MouseEvent) -> Result<bool> {
        if !self.config.read().ui.mouse_support {
            return Ok(true);
        }

        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            let button = ui::layout(self.viewport).button;
            if contains(button, mouse.column, mouse.row) {
                self.spin(Instant::now());
            }
        }

        Ok(true)
    }

    pub fn spin(&mut self, now: Instant) -> SpinOutcome {
        let outcome = self.spinner.trigger(now, &mut self.rng);
        if let SpinOutcome::Started { .. } = outcome {
            self.haptics.pulse();
        }
        outcome
    }

    pub fn handle_tick(&mut self, now: Instant) {
        self.apply_config_changes();
        self.spinner.tick(now);
    }

    fn apply_config_changes(&mut self) {
        let config = self.config.read();

        if config.wheel.variant != self.variant_name {
            self.variant_name = config.wheel.variant.clone();
            self.spinner.set_variant(config.wheel.spin_variant());
        }

        if config.ui.haptics != self.haptics_enabled {
            self.haptics_enabled = config.ui.haptics;
            self.haptics = haptics::from_config(self.haptics_enabled);
            log::info!(
                "Haptics {}",
                if self.haptics_enabled { "enabled" } else { "disabled" }
            );
        }
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

pub fn parse_key(name: &str) -> Option<KeyCode> {
    let name = name.trim();
    match name.to_lowercase().as_str() {
        "space" => Some(KeyCode::Char(' ')),
        "enter" | "return" => Some(KeyCode::Enter),
        "tab" => Some(KeyCode::Tab),
        "esc" | "escape" => Some(KeyCode::Esc),
        lower => {
            if let Some(number) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                return Some(KeyCode::F(number));
            }
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}
