pub mod fft;
pub mod stats;

pub use fft::{centered_frequencies, fft_frequencies, fft_shift, FftHelper};
pub use stats::StatsHelper;
