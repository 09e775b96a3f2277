use serde::{Deserialize, Serialize};

/// Fixed parameters of a signal generator plus the initial noise level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Samples produced per unit of simulated time.
    pub sample_rate: f64,
    /// Samples produced per block.
    pub block_size: usize,
    /// Frequency of the noiseless sinusoid, in the units of `sample_rate`.
    pub carrier_frequency: f64,
    /// Initial standard deviation of the additive Gaussian noise.
    pub noise_sigma: f64,
    /// Seed for the noise stream. `None` draws a seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sample_rate: 50.0,
            block_size: 512,
            carrier_frequency: 1.0,
            noise_sigma: 0.0,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Checks the construction-time constraints.
    pub fn validate(&self) -> GeneratorResult<()> {
        if !self.sample_rate.is_finite() || self.sample_rate <= 0.0 {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "sample_rate must be positive, got {}",
                self.sample_rate
            )));
        }
        if self.block_size < 1 {
            return Err(GeneratorError::InvalidConfiguration(
                "block_size must be at least 1".into(),
            ));
        }
        if !self.carrier_frequency.is_finite() {
            return Err(GeneratorError::InvalidConfiguration(format!(
                "carrier_frequency must be finite, got {}",
                self.carrier_frequency
            )));
        }
        check_noise_sigma(self.noise_sigma)
            .map_err(|err| GeneratorError::InvalidConfiguration(err.to_string()))?;
        Ok(())
    }

    /// Simulated time covered by one block.
    pub fn block_duration(&self) -> f64 {
        self.block_size as f64 / self.sample_rate
    }
}

/// Rejects noise levels that are negative or not finite.
pub fn check_noise_sigma(value: f64) -> GeneratorResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(GeneratorError::InvalidParameter(format!(
            "noise_sigma must be a non-negative number, got {}",
            value
        )))
    }
}

/// Common error type for the generator.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;
