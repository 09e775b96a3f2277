use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use wavecore::GeneratorConfig;

/// The two canned scenarios: a clean transmitted waveform, and the same
/// waveform as received through an adjustable Gaussian noise channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Waveform,
    Noise,
}

impl Preset {
    pub fn title(self) -> &'static str {
        match self {
            Preset::Waveform => "Waveform Simulation",
            Preset::Noise => "Noise Simulation",
        }
    }

    pub fn generator_config(self) -> GeneratorConfig {
        GeneratorConfig {
            sample_rate: 50.0,
            block_size: 512,
            carrier_frequency: 1.0,
            noise_sigma: 0.0,
            seed: None,
        }
    }

    /// Whether the noise level may be changed while running.
    pub fn noise_adjustable(self) -> bool {
        matches!(self, Preset::Noise)
    }
}
