pub mod easing;
pub mod spin;

pub use easing::{Animation, Easing};
pub use spin::{SpinController, SpinOutcome, SpinPhase, SpinVariant};

use thiserror::Error;

pub const FULL_TURN: f64 = 360.0;

pub const GENRES: [&str; 7] = [
    "Action",
    "Adventure",
    "Comedy",
    "Drama",
    "Fantasy",
    "Horror",
    "Romance",
];

/// Label distance from the centre, in units of a 150-radius wheel.
pub const GENRE_RADII: [f64; 7] = [100.0, 90.0, 90.0, 90.0, 90.0, 90.0, 90.0];

/// Per-label text rotation added on top of the counter-rotation.
pub const GENRE_TEXT_ANGLES: [f64; 7] = [-180.0, -75.0, 30.0, -230.0, -130.0, -30.0, 80.0];

pub const ANGLE_OFFSET: f64 = 0.0;
pub const REFERENCE_RADIUS: f64 = 150.0;

#[derive(Debug, Error, PartialEq)]
pub enum WheelError {
    #[error("wheel needs at least one label")]
    Empty,
    #[error("expected {expected} radius overrides, got {actual}")]
    RadiusCountMismatch { expected: usize, actual: usize },
    #[error("expected {expected} text angle overrides, got {actual}")]
    AngleCountMismatch { expected: usize, actual: usize },
}

/// Immutable label layout of the wheel.
///
/// Angles are in degrees, measured clockwise in the wheel's own frame with
/// 0 at the pointer when the wheel is at rest. Label `i` owns the slice
/// `[i * w, (i + 1) * w)` where `w = 360 / N`.
#[derive(Debug, Clone)]
pub struct Wheel {
    labels: Vec<String>,
    radii: Vec<f64>,
    text_angles: Vec<f64>,
}

impl Wheel {
    pub fn new(
        labels: Vec<String>,
        radii: Vec<f64>,
        text_angles: Vec<f64>,
    ) -> Result<Self, WheelError> {
        if labels.is_empty() {
            return Err(WheelError::Empty);
        }
        if radii.len() != labels.len() {
            return Err(WheelError::RadiusCountMismatch {
                expected: labels.len(),
                actual: radii.len(),
            });
        }
        if text_angles.len() != labels.len() {
            return Err(WheelError::AngleCountMismatch {
                expected: labels.len(),
                actual: text_angles.len(),
            });
        }

        Ok(Self {
            labels,
            radii,
            text_angles,
        })
    }

    pub fn genres() -> Result<Self, WheelError> {
        Self::new(
            GENRES.iter().map(|g| g.to_string()).collect(),
            GENRE_RADII.to_vec(),
            GENRE_TEXT_ANGLES.to_vec(),
        )
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn slice_width(&self) -> f64 {
        FULL_TURN / self.labels.len() as f64
    }

    pub fn base_angle(&self, index: usize) -> f64 {
        ANGLE_OFFSET + index as f64 * self.slice_width()
    }

    /// Index of the label whose slice sits under the pointer.
    pub fn resolve_index(&self, rotation: f64) -> usize {
        let normalized = rotation.rem_euclid(FULL_TURN);
        let width = self.slice_width();
        let last = self.labels.len() - 1;
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        let mut index = ((normalized / width).floor() as usize).min(last);

        // The division can land one slice off right at a boundary; compare
        // against the same products the spokes are drawn at.
        if index < last && (index + 1) as f64 * width <= normalized {
            index += 1;
        } else if index > 0 && index as f64 * width > normalized {
            index -= 1;
        }
        index
    }

    pub fn resolve(&self, rotation: f64) -> &str {
        &self.labels[self.resolve_index(rotation)]
    }

    pub fn placements(&self) -> impl Iterator<Item = LabelPlacement<'_>> + '_ {
        let width = self.slice_width();
        self.labels.iter().enumerate().map(move |(index, label)| {
            let base_angle = self.base_angle(index);
            LabelPlacement {
                index,
                label,
                base_angle,
                anchor_angle: base_angle + width / 2.0,
                radius: self.radii[index] / REFERENCE_RADIUS,
                text_angle: -base_angle + self.text_angles[index],
            }
        })
    }
}

/// Where one label is drawn, in the wheel's frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement<'a> {
    pub index: usize,
    pub label: &'a str,
    /// Start of the label's slice.
    pub base_angle: f64,
    /// Slice centre; the text is drawn here so the label under the pointer
    /// is the one `Wheel::resolve` returns.
    pub anchor_angle: f64,
    /// Fraction of the wheel radius.
    pub radius: f64,
    pub text_angle: f64,
}

impl LabelPlacement<'_> {
    /// Clockwise angle from the pointer once the wheel is turned by `rotation`.
    pub fn screen_angle(&self, rotation: f64) -> f64 {
        (self.anchor_angle - rotation).rem_euclid(FULL_TURN)
    }

    /// Offset from the wheel centre on a unit wheel, y pointing up.
    pub fn offset(&self, rotation: f64) -> (f64, f64) {
        let angle = self.screen_angle(rotation).to_radians();
        (self.radius * angle.sin(), self.radius * angle.cos())
    }

    /// Text orientation on screen: the label's own angle plus the wheel turn.
    pub fn screen_text_angle(&self, rotation: f64) -> f64 {
        (self.text_angle - rotation).rem_euclid(FULL_TURN)
    }

    /// Whether the rotated text is closer to horizontal than vertical.
    pub fn reads_horizontally(&self, rotation: f64) -> bool {
        let half_turn = self.screen_text_angle(rotation).rem_euclid(180.0);
        !(45.0..135.0).contains(&half_turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres() -> Wheel {
        Wheel::genres().expect("genre wheel")
    }

    #[test]
    fn rejects_mismatched_overrides() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(
            Wheel::new(labels.clone(), vec![1.0], vec![0.0, 0.0]).unwrap_err(),
            WheelError::RadiusCountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            Wheel::new(labels, vec![1.0, 1.0], vec![0.0, 0.0, 0.0]).unwrap_err(),
            WheelError::AngleCountMismatch {
                expected: 2,
                actual: 3
            }
        );
        assert_eq!(
            Wheel::new(Vec::new(), Vec::new(), Vec::new()).unwrap_err(),
            WheelError::Empty
        );
    }

    #[test]
    fn resolves_known_angles() {
        let wheel = genres();
        assert_eq!(wheel.resolve(0.0), "Action");
        assert_eq!(wheel.resolve(51.0), "Action");
        assert_eq!(wheel.resolve(52.0), "Adventure");
        assert_eq!(wheel.resolve(360.0), "Action");
        assert_eq!(wheel.resolve(359.999), "Romance");
        assert_eq!(wheel.resolve(3600.0 + 180.0), "Drama");
    }

    #[test]
    fn resolution_is_periodic() {
        let wheel = genres();
        let mut rotation = 0.0;
        while rotation < 360.0 {
            let expected = wheel.resolve_index(rotation);
            for turns in 1..=12 {
                let shifted = rotation + FULL_TURN * turns as f64;
                assert_eq!(wheel.resolve_index(shifted), expected, "rotation {rotation}");
            }
            rotation += 0.37;
        }
    }

    #[test]
    fn resolved_index_owns_the_slice() {
        let wheel = genres();
        let width = wheel.slice_width();
        let mut rotation = 0.0;
        while rotation < 1080.0 {
            let index = wheel.resolve_index(rotation);
            let normalized = rotation.rem_euclid(FULL_TURN);
            assert!(index as f64 * width <= normalized, "rotation {rotation}");
            assert!(normalized < (index + 1) as f64 * width, "rotation {rotation}");
            rotation += 0.5;
        }
    }

    #[test]
    fn boundaries_belong_to_the_next_slice() {
        let wheel = genres();
        let width = wheel.slice_width();
        for index in 0..wheel.len() {
            let boundary = index as f64 * width;
            assert_eq!(wheel.base_angle(index), boundary);
            assert_eq!(wheel.resolve_index(boundary), index, "boundary {boundary}");
            if index > 0 {
                let just_before = f64::from_bits(boundary.to_bits() - 1);
                assert_eq!(wheel.resolve_index(just_before), index - 1, "below {boundary}");
            }
        }
    }

    #[test]
    fn boundaries_resolve_exactly_after_many_turns() {
        let wheel = genres();
        let width = wheel.slice_width();
        for index in 0..wheel.len() {
            for turns in 1..=200 {
                let rotation = index as f64 * width + FULL_TURN * turns as f64;
                let neighbours = [
                    f64::from_bits(rotation.to_bits() - 1),
                    rotation,
                    f64::from_bits(rotation.to_bits() + 1),
                ];
                for rotation in neighbours {
                    let normalized = rotation.rem_euclid(FULL_TURN);
                    let resolved = wheel.resolve_index(rotation);
                    assert!(
                        resolved as f64 * width <= normalized
                            && normalized < (resolved + 1) as f64 * width,
                        "rotation {rotation} resolved to {resolved}"
                    );
                }
            }
        }
    }

    #[test]
    fn slices_are_equally_likely() {
        let wheel = genres();
        let mut counts = vec![0usize; wheel.len()];
        let steps = 360_000;
        for step in 0..steps {
            let rotation = step as f64 * FULL_TURN / steps as f64;
            counts[wheel.resolve_index(rotation)] += 1;
        }
        let expected = steps / wheel.len();
        for count in counts {
            assert!(count.abs_diff(expected) <= 2, "count {count} vs {expected}");
        }
    }

    #[test]
    fn label_under_pointer_matches_resolution() {
        let wheel = genres();
        let half_slice = wheel.slice_width() / 2.0;
        let mut rotation = 0.25;
        while rotation < 720.0 {
            let resolved = wheel.resolve_index(rotation);
            let nearest = wheel
                .placements()
                .min_by(|a, b| {
                    pointer_distance(a.screen_angle(rotation))
                        .total_cmp(&pointer_distance(b.screen_angle(rotation)))
                })
                .expect("labels");
            assert_eq!(nearest.index, resolved, "rotation {rotation}");
            assert!(pointer_distance(nearest.screen_angle(rotation)) <= half_slice);
            rotation += 1.5;
        }
    }

    fn pointer_distance(angle: f64) -> f64 {
        angle.min(FULL_TURN - angle)
    }

    #[test]
    fn placements_follow_overrides() {
        let wheel = genres();
        let placements: Vec<_> = wheel.placements().collect();
        assert_eq!(placements.len(), 7);

        assert_eq!(placements[0].label, "Action");
        assert_eq!(placements[0].base_angle, 0.0);
        assert!((placements[0].radius - 100.0 / 150.0).abs() < 1e-12);
        assert_eq!(placements[0].text_angle, -180.0);

        let third = &placements[2];
        assert!((third.base_angle - 2.0 * 360.0 / 7.0).abs() < 1e-9);
        assert!((third.text_angle - (-third.base_angle + 30.0)).abs() < 1e-9);
        assert!((third.radius - 0.6).abs() < 1e-12);
    }

    #[test]
    fn offset_puts_anchor_at_top_when_aligned() {
        let wheel = genres();
        let placement = wheel.placements().nth(3).expect("drama");
        let (x, y) = placement.offset(placement.anchor_angle);
        assert!(x.abs() < 1e-9);
        assert!((y - placement.radius).abs() < 1e-9);

        let (x, y) = placement.offset(placement.anchor_angle - 90.0);
        assert!((x - placement.radius).abs() < 1e-9);
        assert!(y.abs() < 1e-9);
    }

    #[test]
    fn text_orientation_switches_with_rotation() {
        let wheel = genres();
        let action = wheel.placements().next().expect("action");
        // -180 is upside-down but still horizontal
        assert!(action.reads_horizontally(0.0));
        assert!(!action.reads_horizontally(90.0));
        assert!(action.reads_horizontally(180.0));
    }
}
