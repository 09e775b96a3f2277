//! Numerical core for the noisy-waveform simulation platform.
//!
//! A [`SignalGenerator`] produces consecutive fixed-length blocks of a
//! sinusoid, optionally corrupted with Gaussian noise, together with the
//! centered periodogram of each block. Presentation concerns (timers, windows,
//! HTTP) live in the driver crate; this crate only does the math.

pub mod generator;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod telemetry;

pub use generator::{NoiseControl, SignalGenerator};
pub use interface::SpectrumFrame;
pub use prelude::{GeneratorConfig, GeneratorError, GeneratorResult};
