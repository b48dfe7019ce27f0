use chrono::{DateTime, Local};
use rand::Rng;
use std::time::{Duration, Instant};

use super::{Animation, Easing, Wheel, FULL_TURN};

/// Ten full turns on top of the random delta so every spin is visible.
pub const EXTRA_ROTATION: f64 = 10.0 * FULL_TURN;
pub const PRESS_DURATION: Duration = Duration::from_millis(300);
pub const REVEAL_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinVariant {
    Simple,
    #[default]
    Decelerating,
}

impl SpinVariant {
    /// Shared by the wheel animation and the moment the label resolves.
    pub fn duration(self) -> Duration {
        match self {
            SpinVariant::Simple => Duration::from_secs(1),
            SpinVariant::Decelerating => Duration::from_secs(3),
        }
    }

    pub fn easing(self) -> Easing {
        match self {
            SpinVariant::Simple => Easing::EaseInOut,
            SpinVariant::Decelerating => Easing::EaseOut,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SpinVariant::Simple => "simple",
            SpinVariant::Decelerating => "decelerating",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" => Some(SpinVariant::Simple),
            "decelerating" => Some(SpinVariant::Decelerating),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinPhase {
    Idle,
    /// The wheel is animating towards `final_rotation`, captured at trigger time.
    Spinning { final_rotation: f64 },
    /// The resolved label is being revealed.
    Settling { resolved: usize },
}

impl SpinPhase {
    pub fn as_str(&self) -> &str {
        match self {
            SpinPhase::Idle => "idle",
            SpinPhase::Spinning { .. } => "spinning",
            SpinPhase::Settling { .. } => "settling",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpinOutcome {
    Started { delta: f64, final_rotation: f64 },
    /// A spin is already in flight; the trigger was dropped.
    Ignored,
}

/// Owns the wheel's rotation and selection and drives one spin at a time.
pub struct SpinController {
    wheel: Wheel,
    variant: SpinVariant,
    phase: SpinPhase,
    rotation: f64,
    animation: Option<Animation>,
    reveal: Option<Animation>,
    pressed_until: Option<Instant>,
    selection: Option<usize>,
    settled_at: Option<DateTime<Local>>,
    spins: u64,
}

impl SpinController {
    pub fn new(wheel: Wheel, variant: SpinVariant) -> Self {
        Self {
            wheel,
            variant,
            phase: SpinPhase::Idle,
            rotation: 0.0,
            animation: None,
            reveal: None,
            pressed_until: None,
            selection: None,
            settled_at: None,
            spins: 0,
        }
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn variant(&self) -> SpinVariant {
        self.variant
    }

    /// Takes effect from the next spin; an animation in flight keeps its timing.
    pub fn set_variant(&mut self, variant: SpinVariant) {
        if variant != self.variant {
            log::info!("Spin variant changed to {}", variant.as_str());
            self.variant = variant;
        }
    }

    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SpinPhase::Idle
    }

    /// Accumulated rotation target in degrees; never normalized.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn displayed_rotation(&self, now: Instant) -> f64 {
        self.animation
            .as_ref()
            .map(|animation| animation.value_at(now))
            .unwrap_or(self.rotation)
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.and_then(|index| self.wheel.label(index))
    }

    pub fn selection_index(&self) -> Option<usize> {
        self.selection
    }

    pub fn settled_at(&self) -> Option<DateTime<Local>> {
        self.settled_at
    }

    pub fn spins(&self) -> u64 {
        self.spins
    }

    pub fn is_pressed(&self, now: Instant) -> bool {
        self.pressed_until.is_some_and(|until| now < until)
    }

    /// 0.0 right after a label resolves, 1.0 once fully shown.
    pub fn reveal_progress(&self, now: Instant) -> f64 {
        self.reveal
            .as_ref()
            .map(|reveal| reveal.value_at(now))
            .unwrap_or(1.0)
    }

    pub fn trigger<R: Rng>(&mut self, now: Instant, rng: &mut R) -> SpinOutcome {
        if !self.is_idle() {
            log::debug!("Spin ignored while {}", self.phase.as_str());
            return SpinOutcome::Ignored;
        }

        let delta = rng.gen_range(0.0..FULL_TURN);
        let from = self.displayed_rotation(now);
        self.rotation += delta + EXTRA_ROTATION;
        let final_rotation = self.rotation;

        self.pressed_until = Some(now + PRESS_DURATION);
        self.animation = Some(Animation::new(
            from,
            final_rotation,
            now,
            self.variant.duration(),
            self.variant.easing(),
        ));
        self.phase = SpinPhase::Spinning { final_rotation };
        self.spins += 1;

        log::info!(
            "Spin #{} started: delta {:.2}, target {:.2}",
            self.spins,
            delta,
            final_rotation
        );

        SpinOutcome::Started {
            delta,
            final_rotation,
        }
    }

    /// Advances the state machine. Returns the label index when a spin settles.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        match self.phase {
            SpinPhase::Idle => None,
            SpinPhase::Spinning { final_rotation } => {
                let finished = self
                    .animation
                    .as_ref()
                    .map_or(true, |animation| animation.is_finished(now));
                if !finished {
                    return None;
                }

                let resolved = self.wheel.resolve_index(final_rotation);
                self.animation = None;
                self.selection = Some(resolved);
                self.settled_at = Some(Local::now());
                self.reveal = Some(Animation::new(
                    0.0,
                    1.0,
                    now,
                    REVEAL_DURATION,
                    Easing::EaseOut,
                ));
                self.phase = SpinPhase::Settling { resolved };

                log::info!(
                    "Spin #{} settled on {:?} at {:.2}",
                    self.spins,
                    self.wheel.label(resolved).unwrap_or_default(),
                    final_rotation
                );

                Some(resolved)
            }
            SpinPhase::Settling { .. } => {
                if self.reveal.as_ref().map_or(true, |r| r.is_finished(now)) {
                    self.reveal = None;
                    self.phase = SpinPhase::Idle;
                }
                None
            }
        }
    }
}
