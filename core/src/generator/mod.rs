pub mod control;
pub mod noise;
pub mod signal;

pub use control::NoiseControl;
pub use noise::GaussianNoise;
pub use signal::{Block, SignalGenerator};
