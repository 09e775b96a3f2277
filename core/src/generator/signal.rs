use crate::generator::control::NoiseControl;
use crate::generator::noise::GaussianNoise;
use crate::interface::SpectrumFrame;
use crate::math::fft::{centered_frequencies, FftHelper};
use crate::math::stats::StatsHelper;
use crate::prelude::{GeneratorConfig, GeneratorResult};
use crate::telemetry::{LogManager, MetricsRecorder};
use ndarray::Array1;
use std::f64::consts::PI;
use std::sync::Arc;

/// `(samples, psd_db, freq_axis)`, each `block_size` long.
pub type Block = (Vec<f64>, Vec<f64>, Vec<f64>);

/// Produces consecutive blocks of a noisy sinusoid and their periodograms.
///
/// Each call samples `block_size` points starting at the current time cursor
/// and then moves the cursor past them, so consecutive blocks tile the
/// underlying waveform without gaps or overlap. The noise level is read once
/// per block from a [`NoiseControl`] that other threads may update.
pub struct SignalGenerator {
    config: GeneratorConfig,
    fft: FftHelper,
    freq_axis: Vec<f64>,
    noise: GaussianNoise,
    noise_sigma: NoiseControl,
    blocks: u64,
    logger: LogManager,
    metrics: Arc<MetricsRecorder>,
}

impl SignalGenerator {
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        config.validate()?;

        let fft = FftHelper::new(config.block_size);
        let freq_axis = centered_frequencies(config.block_size, config.sample_rate);
        let noise = GaussianNoise::new(config.seed);
        let metrics = Arc::new(MetricsRecorder::new());
        let noise_sigma = NoiseControl::new(config.noise_sigma, metrics.clone())?;
        let logger = LogManager::new("generator");
        logger.record(&format!(
            "rate {} block {} carrier {} sigma {} seed {:?}",
            config.sample_rate,
            config.block_size,
            config.carrier_frequency,
            config.noise_sigma,
            config.seed
        ));

        Ok(Self {
            config,
            fft,
            freq_axis,
            noise,
            noise_sigma,
            blocks: 0,
            logger,
            metrics,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Simulated time of the first sample of the next block.
    pub fn time_cursor(&self) -> f64 {
        self.blocks as f64 * self.config.block_duration()
    }

    pub fn blocks_generated(&self) -> u64 {
        self.blocks
    }

    pub fn noise_sigma(&self) -> f64 {
        self.noise_sigma.get()
    }

    /// Stores a new noise level for the next block. Negative values are
    /// rejected and the previous level stays in effect.
    pub fn set_noise_sigma(&self, value: f64) -> GeneratorResult<()> {
        self.noise_sigma.set(value)
    }

    /// Handle for updating the noise level from another thread.
    pub fn noise_control(&self) -> NoiseControl {
        self.noise_sigma.clone()
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        self.metrics.clone()
    }

    pub fn generate_block(&mut self) -> Block {
        let sigma = self.noise_sigma.get();
        self.generate_with(sigma)
    }

    /// Generates the next block and packages it with its position and the
    /// noise level it was drawn with.
    pub fn next_frame(&mut self) -> SpectrumFrame {
        let block_index = self.blocks;
        let time_offset = self.time_cursor();
        let noise_sigma = self.noise_sigma.get();
        let (samples, psd_db, freq_axis) = self.generate_with(noise_sigma);

        SpectrumFrame {
            block_index,
            time_offset,
            noise_sigma,
            samples,
            psd_db,
            freq_axis,
        }
    }

    fn generate_with(&mut self, sigma: f64) -> Block {
        let start = self.time_cursor();
        let rate = self.config.sample_rate;
        let omega = 2.0 * PI * self.config.carrier_frequency;

        let time = Array1::from_shape_fn(self.config.block_size, |i| start + i as f64 / rate);
        let mut samples = time.mapv(|t| (omega * t).sin()).into_raw_vec();
        self.noise.add_to(sigma, &mut samples);

        let psd_db = self.fft.periodogram_db(&samples);

        self.logger.block(
            self.blocks,
            sigma,
            StatsHelper::rms(&samples),
            StatsHelper::argmax(&psd_db).map(|idx| self.freq_axis[idx]),
        );
        self.blocks += 1;
        self.metrics.record_block();

        (samples, psd_db, self.freq_axis.clone())
    }
}
