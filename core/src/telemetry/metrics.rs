use std::sync::Mutex;

/// Counters shared between the generator and whatever drives it.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    blocks: u64,
    rejected: u64,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                blocks: 0,
                rejected: 0,
            }),
        }
    }

    pub fn record_block(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.blocks += 1;
        }
    }

    pub fn record_rejected(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.rejected += 1;
        }
    }

    /// `(blocks generated, parameter updates rejected)`
    pub fn snapshot(&self) -> (u64, u64) {
        if let Ok(metrics) = self.inner.lock() {
            (metrics.blocks, metrics.rejected)
        } else {
            (0, 0)
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MetricsRecorder::new();
        metrics.record_block();
        metrics.record_block();
        metrics.record_rejected();
        assert_eq!(metrics.snapshot(), (2, 1));
    }
}
