use crate::math::stats::StatsHelper;
use serde::{Deserialize, Serialize};

/// One generated block as forwarded to a display: time-domain samples plus the
/// centered periodogram and its frequency axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectrumFrame {
    pub block_index: u64,
    /// Simulated time of the first sample.
    pub time_offset: f64,
    pub noise_sigma: f64,
    pub samples: Vec<f64>,
    pub psd_db: Vec<f64>,
    pub freq_axis: Vec<f64>,
}

impl SpectrumFrame {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Frequency of the strongest periodogram bin.
    pub fn peak_frequency(&self) -> Option<f64> {
        StatsHelper::argmax(&self.psd_db).and_then(|idx| self.freq_axis.get(idx).copied())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
