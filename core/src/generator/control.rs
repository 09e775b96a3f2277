use crate::prelude::{check_noise_sigma, GeneratorResult};
use crate::telemetry::{LogManager, MetricsRecorder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared noise level.
///
/// The value is stored as the bit pattern of an `f64` in one atomic word, so a
/// reader on another thread always sees either the old or the new value in
/// full. Clones share the same slot and the same rejection counter.
#[derive(Clone)]
pub struct NoiseControl {
    bits: Arc<AtomicU64>,
    metrics: Arc<MetricsRecorder>,
    logger: LogManager,
}

impl NoiseControl {
    pub fn new(initial: f64, metrics: Arc<MetricsRecorder>) -> GeneratorResult<Self> {
        let initial = check_noise_sigma(initial)?;
        Ok(Self {
            bits: Arc::new(AtomicU64::new(initial.to_bits())),
            metrics,
            logger: LogManager::new("noise"),
        })
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Publishes a new noise level. Invalid values leave the slot unchanged.
    pub fn set(&self, value: f64) -> GeneratorResult<()> {
        let value = check_noise_sigma(value).map_err(|err| {
            self.reject(&err.to_string());
            err
        })?;
        self.bits.store(value.to_bits(), Ordering::Release);
        Ok(())
    }

    /// Counts and logs an update refused before it reached the slot, e.g. by
    /// a control surface enforcing a narrower range.
    pub fn reject(&self, reason: &str) {
        self.metrics.record_rejected();
        self.logger.rejected(reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::GeneratorError;
    use std::thread;

    #[test]
    fn rejected_value_keeps_previous() {
        let metrics = Arc::new(MetricsRecorder::new());
        let control = NoiseControl::new(0.4, metrics.clone()).unwrap();
        assert!(matches!(
            control.set(-1.0),
            Err(GeneratorError::InvalidParameter(_))
        ));
        assert_eq!(control.get(), 0.4);
        assert_eq!(metrics.snapshot(), (0, 1));
    }

    #[test]
    fn reject_counts_without_touching_value() {
        let metrics = Arc::new(MetricsRecorder::new());
        let control = NoiseControl::new(1.0, metrics.clone()).unwrap();
        control.clone().reject("above range");
        assert_eq!(control.get(), 1.0);
        assert_eq!(metrics.snapshot().1, 1);
    }

    #[test]
    fn clones_share_the_value_across_threads() {
        let control = NoiseControl::new(0.0, Arc::new(MetricsRecorder::new())).unwrap();
        let writer = control.clone();

        thread::spawn(move || writer.set(2.5).unwrap())
            .join()
            .unwrap();

        assert_eq!(control.get(), 2.5);
    }
}
