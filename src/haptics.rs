use std::io::{self, Write};

#[cfg(test)]
use mockall::automock;

/// Fire-and-forget tactile feedback for a spin.
#[cfg_attr(test, automock)]
pub trait Haptics: Send {
    fn pulse(&self);
}

/// Rings the terminal bell, the closest thing a terminal has to a buzz.
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn pulse(&self) {
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            log::debug!("Bell failed: {}", e);
        }
    }
}

pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn pulse(&self) {}
}

pub fn from_config(enabled: bool) -> Box<dyn Haptics> {
    if enabled {
        Box::new(TerminalBell)
    } else {
        Box::new(NoHaptics)
    }
}
