use crate::math::stats::StatsHelper;
use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};
use std::sync::Arc;

/// Helper that wraps the `rustfft` planner for reuse across blocks.
pub struct FftHelper {
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
    size: usize,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex64::zero(); fft.get_inplace_scratch_len()];
        Self { fft, scratch, size }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Forward transform of a real sequence, zero-padded or truncated to the
    /// planned length.
    pub fn forward(&mut self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .map(|&value| Complex64::new(value, 0.0))
            .collect();
        buffer.resize(self.size, Complex64::zero());

        if self.size > 0 {
            self.fft.process_with_scratch(&mut buffer, &mut self.scratch);
        }
        buffer
    }

    /// Periodogram in dB, `10 * log10(|X|^2 / N)`, with the zero-frequency bin
    /// moved to the center.
    pub fn periodogram_db(&mut self, input: &[f64]) -> Vec<f64> {
        let n = self.size as f64;
        let mut psd: Vec<f64> = self
            .forward(input)
            .iter()
            .map(|bin| StatsHelper::power_db(bin.norm_sqr() / n))
            .collect();
        fft_shift(&mut psd);
        psd
    }
}

/// Moves the zero-frequency entry to the center (`n / 2`), matching the usual
/// `fftshift` layout for both even and odd lengths.
pub fn fft_shift<T>(data: &mut [T]) {
    let half = data.len() / 2;
    data.rotate_right(half);
}

/// Bin frequencies in natural FFT order: non-negative first, then negative.
pub fn fft_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    let positive = (n + 1) / 2;
    (0..n)
        .map(|i| {
            let signed = if i < positive {
                i as f64
            } else {
                i as f64 - n as f64
            };
            signed * sample_rate / n as f64
        })
        .collect()
}

/// Bin frequencies in the same centered layout as [`FftHelper::periodogram_db`].
pub fn centered_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    let mut freqs = fft_frequencies(n, sample_rate);
    fft_shift(&mut freqs);
    freqs
}
