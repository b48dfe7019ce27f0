pub mod readout;
pub mod spin_button;
pub mod wheel;

pub use readout::Readout;
pub use spin_button::SpinButton;
pub use wheel::{WheelColors, WheelView};
