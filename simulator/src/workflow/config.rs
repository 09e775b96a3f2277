use crate::generator::preset::Preset;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wavecore::GeneratorConfig;

/// Bounds and step of the externally adjustable noise level.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for NoiseRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 5.0,
            step: 0.1,
        }
    }
}

impl NoiseRange {
    /// Snaps `value` to the step grid, or `None` when it falls outside the
    /// range.
    pub fn snap(&self, value: f64) -> Option<f64> {
        if !value.is_finite() || value < self.min || value > self.max {
            return None;
        }
        if self.step <= 0.0 {
            return Some(value);
        }
        let steps = ((value - self.min) / self.step).round();
        // round to 12 places so 0.1 * 3 reports as 0.3
        let snapped = ((self.min + steps * self.step) * 1e12).round() / 1e12;
        Some(snapped.clamp(self.min, self.max))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub title: String,
    pub generator: GeneratorConfig,
    /// Delay between blocks.
    pub interval_ms: u64,
    /// Stop after this many blocks; 0 runs until interrupted.
    pub max_blocks: u64,
    pub noise_adjustable: bool,
    pub noise_range: NoiseRange,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Noise)
    }
}

/// Individual settings given on the command line.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub sample_rate: Option<f64>,
    pub block_size: Option<usize>,
    pub carrier_frequency: Option<f64>,
    pub noise_sigma: Option<f64>,
    pub seed: Option<u64>,
    pub interval_ms: Option<u64>,
    pub max_blocks: Option<u64>,
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_preset(preset: Preset) -> Self {
        Self {
            title: preset.title().to_string(),
            generator: preset.generator_config(),
            interval_ms: 100,
            max_blocks: 0,
            noise_adjustable: preset.noise_adjustable(),
            noise_range: NoiseRange::default(),
        }
    }

    /// Applies command-line overrides. A non-zero noise level is refused for
    /// scenarios without noise control.
    pub fn apply(&mut self, overrides: &Overrides) -> anyhow::Result<()> {
        if let Some(sigma) = overrides.noise_sigma {
            if sigma != 0.0 && !self.noise_adjustable {
                anyhow::bail!(
                    "--noise {} is not available for {}: it has no noise control",
                    sigma,
                    self.title
                );
            }
        }
        let generator = &mut self.generator;
        if let Some(rate) = overrides.sample_rate {
            generator.sample_rate = rate;
        }
        if let Some(size) = overrides.block_size {
            generator.block_size = size;
        }
        if let Some(carrier) = overrides.carrier_frequency {
            generator.carrier_frequency = carrier;
        }
        if let Some(sigma) = overrides.noise_sigma {
            generator.noise_sigma = sigma;
        }
        if overrides.seed.is_some() {
            generator.seed = overrides.seed;
        }
        if let Some(interval) = overrides.interval_ms {
            self.interval_ms = interval;
        }
        if let Some(limit) = overrides.max_blocks {
            self.max_blocks = limit;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_preset_uses_reference_cadence() {
        let cfg = WorkflowConfig::from_preset(Preset::Waveform);
        assert_eq!(cfg.interval_ms, 100);
        assert_eq!(cfg.generator.block_size, 512);
        assert!(!cfg.noise_adjustable);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(
            b"generator:\n  sample_rate: 100.0\n  block_size: 256\n  seed: 5\ninterval_ms: 20\nnoise_range:\n  max: 2.0\n",
        )
        .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.generator.block_size, 256);
        assert_eq!(cfg.generator.seed, Some(5));
        assert_eq!(cfg.generator.carrier_frequency, 1.0);
        assert_eq!(cfg.interval_ms, 20);
        assert_eq!(cfg.noise_range.max, 2.0);
        assert_eq!(cfg.noise_range.step, 0.1);
    }

    #[test]
    fn config_load_reports_path_on_error() {
        let err = WorkflowConfig::load("/nonexistent/workflow.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/workflow.yaml"));
    }

    #[test]
    fn overrides_replace_single_fields() {
        let mut cfg = WorkflowConfig::from_preset(Preset::Noise);
        cfg.apply(&Overrides {
            noise_sigma: Some(0.7),
            max_blocks: Some(3),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(cfg.generator.noise_sigma, 0.7);
        assert_eq!(cfg.max_blocks, 3);
        assert_eq!(cfg.generator.sample_rate, 50.0);
    }

    #[test]
    fn noise_override_refused_without_noise_control() {
        let mut cfg = WorkflowConfig::from_preset(Preset::Waveform);
        let err = cfg
            .apply(&Overrides {
                noise_sigma: Some(2.0),
                block_size: Some(64),
                ..Default::default()
            })
            .unwrap_err();

        assert!(err.to_string().contains("Waveform Simulation"));
        assert_eq!(cfg.generator.noise_sigma, 0.0);
        assert_eq!(cfg.generator.block_size, 512);

        cfg.apply(&Overrides {
            noise_sigma: Some(0.0),
            ..Default::default()
        })
        .unwrap();
    }

    #[test]
    fn noise_range_snaps_to_step() {
        let range = NoiseRange::default();
        assert_eq!(range.snap(0.34), Some(0.3));
        assert_eq!(range.snap(5.0), Some(5.0));
        assert_eq!(range.snap(0.0), Some(0.0));
        assert_eq!(range.snap(-0.1), None);
        assert_eq!(range.snap(5.01), None);
        assert_eq!(range.snap(f64::NAN), None);
    }
}
