use log::{debug, info, warn};

/// Thin wrapper over the `log` facade for generator events.
#[derive(Clone)]
pub struct LogManager {
    source: &'static str,
}

impl LogManager {
    pub fn new(source: &'static str) -> Self {
        Self { source }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.source, message);
    }

    pub fn block(&self, index: u64, sigma: f64, rms: f64, peak_hz: Option<f64>) {
        match peak_hz {
            Some(peak) => debug!(
                "[{}] block {} sigma {:.2} rms {:.4} peak {:.4}",
                self.source, index, sigma, rms, peak
            ),
            None => debug!(
                "[{}] block {} sigma {:.2} rms {:.4}",
                self.source, index, sigma, rms
            ),
        }
    }

    pub fn rejected(&self, message: &str) {
        warn!("[{}] rejected: {}", self.source, message);
    }
}
