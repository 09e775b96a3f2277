use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use log::info;
use std::future::Future;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use wavecore::telemetry::MetricsRecorder;
use wavecore::{NoiseControl, SignalGenerator, SpectrumFrame};

/// Slot holding the most recent frame for readers on other threads.
pub type FrameSlot = Arc<RwLock<SpectrumFrame>>;

/// Drives a [`SignalGenerator`] at a fixed cadence and publishes each frame.
pub struct Runner {
    config: WorkflowConfig,
    generator: SignalGenerator,
    latest: FrameSlot,
    emit_json: bool,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> anyhow::Result<Self> {
        let generator = SignalGenerator::new(config.generator.clone())
            .context("building signal generator")?;
        Ok(Self {
            config,
            generator,
            latest: Arc::new(RwLock::new(SpectrumFrame::default())),
            emit_json: false,
        })
    }

    /// Also print every frame to stdout as one JSON line.
    pub fn with_json_output(mut self, enabled: bool) -> Self {
        self.emit_json = enabled;
        self
    }

    pub fn frame_slot(&self) -> FrameSlot {
        self.latest.clone()
    }

    pub fn noise_control(&self) -> NoiseControl {
        self.generator.noise_control()
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        self.generator.metrics()
    }

    /// Generates one frame and publishes it to the slot.
    pub fn step(&mut self) -> anyhow::Result<SpectrumFrame> {
        let frame = self.generator.next_frame();
        if self.emit_json {
            println!("{}", frame.to_json().context("serializing frame")?);
        }
        match self.latest.write() {
            Ok(mut guard) => *guard = frame.clone(),
            Err(_) => anyhow::bail!("frame slot poisoned"),
        }
        Ok(frame)
    }

    /// Ticks until `max_blocks` frames were produced or `shutdown` resolves.
    /// Returns the number of frames produced.
    pub async fn run<F>(&mut self, shutdown: F) -> anyhow::Result<u64>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = time::interval(Duration::from_millis(self.config.interval_ms.max(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut produced = 0u64;
        loop {
            if self.config.max_blocks > 0 && produced >= self.config.max_blocks {
                info!("reached block limit {}", self.config.max_blocks);
                break;
            }
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested after {} blocks", produced);
                    break;
                }
                _ = ticker.tick() => {
                    let frame = self.step()?;
                    info!(
                        "block {} t={:.2} sigma={:.2} peak={:?}",
                        frame.block_index,
                        frame.time_offset,
                        frame.noise_sigma,
                        frame.peak_frequency()
                    );
                    produced += 1;
                }
            }
        }

        Ok(produced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::preset::Preset;
    use crate::workflow::config::Overrides;

    fn short_config(max_blocks: u64) -> WorkflowConfig {
        let mut cfg = WorkflowConfig::from_preset(Preset::Noise);
        cfg.apply(&Overrides {
            interval_ms: Some(1),
            max_blocks: Some(max_blocks),
            seed: Some(11),
            ..Default::default()
        })
        .unwrap();
        cfg
    }

    #[test]
    fn runner_rejects_invalid_generator() {
        let mut cfg = short_config(1);
        cfg.generator.block_size = 0;
        assert!(Runner::new(cfg).is_err());
    }

    #[test]
    fn step_publishes_latest_frame() {
        let mut runner = Runner::new(short_config(1)).unwrap();
        let slot = runner.frame_slot();
        assert!(slot.read().unwrap().is_empty());

        let frame = runner.step().unwrap();
        assert_eq!(*slot.read().unwrap(), frame);
        assert_eq!(frame.samples.len(), 512);
    }

    #[tokio::test]
    async fn runner_stops_at_block_limit() {
        let mut runner = Runner::new(short_config(3)).unwrap();
        let produced = runner.run(std::future::pending::<()>()).await.unwrap();

        assert_eq!(produced, 3);
        let latest = runner.frame_slot().read().unwrap().clone();
        assert_eq!(latest.block_index, 2);
        assert!((latest.time_offset - 20.48).abs() < 1e-9);
        assert_eq!(runner.metrics().snapshot().0, 3);
    }

    #[tokio::test]
    async fn runner_stops_on_shutdown() {
        let mut runner = Runner::new(short_config(0)).unwrap();
        let produced = runner.run(async {}).await.unwrap();
        assert!(produced <= 1);
    }

    #[tokio::test]
    async fn noise_updates_reach_following_blocks() {
        let mut runner = Runner::new(short_config(1)).unwrap();
        runner.noise_control().set(1.2).unwrap();
        runner.run(std::future::pending::<()>()).await.unwrap();
        assert_eq!(runner.frame_slot().read().unwrap().noise_sigma, 1.2);
    }
}
