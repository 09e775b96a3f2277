use anyhow::Context;
use clap::Parser;
use display_bridge::server::{BridgeState, DisplayBridge};
use generator::preset::Preset;
use log::error;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::{Overrides, WorkflowConfig};
use workflow::runner::Runner;

mod display_bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Noisy waveform simulation driver")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Canned scenario used when no workflow file is given
    #[arg(long, value_enum, default_value_t = Preset::Noise)]
    preset: Preset,
    #[arg(long)]
    sample_rate: Option<f64>,
    #[arg(long)]
    block_size: Option<usize>,
    #[arg(long)]
    carrier: Option<f64>,
    /// Initial standard deviation of the Gaussian noise
    #[arg(long)]
    noise: Option<f64>,
    /// Seed the noise stream for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds between blocks
    #[arg(long)]
    interval_ms: Option<u64>,
    /// Stop after this many blocks (0 runs until Ctrl+C)
    #[arg(long)]
    blocks: Option<u64>,
    /// Print every frame to stdout as a JSON line
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Serve the latest frame and the noise control over HTTP
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long, default_value = "127.0.0.1:9000")]
    bind: SocketAddr,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut workflow_config = if let Some(path) = args.workflow.as_ref() {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_preset(args.preset)
    };
    workflow_config.apply(&Overrides {
        sample_rate: args.sample_rate,
        block_size: args.block_size,
        carrier_frequency: args.carrier,
        noise_sigma: args.noise,
        seed: args.seed,
        interval_ms: args.interval_ms,
        max_blocks: args.blocks,
    })?;

    let mut runner = Runner::new(workflow_config.clone())?.with_json_output(args.json);
    println!("Starting {}", workflow_config.title);

    let _bridge = if args.serve {
        let bridge = DisplayBridge::start(
            args.bind,
            BridgeState {
                frames: runner.frame_slot(),
                noise: runner.noise_control(),
                range: workflow_config.noise_range,
                adjustable: workflow_config.noise_adjustable,
            },
        )?;
        println!("Display bridge on http://{} (Ctrl+C to stop)", bridge.address());
        Some(bridge)
    } else {
        None
    };

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for the block loop")?;
    let produced = runtime.block_on(runner.run(async {
        if let Err(err) = signal::ctrl_c().await {
            error!("waiting for Ctrl+C: {}", err);
        }
    }))?;

    let (blocks, rejected) = runner.metrics().snapshot();
    println!(
        "{} finished -> blocks {} (total {}), rejected noise updates {}",
        workflow_config.title, produced, blocks, rejected
    );

    Ok(())
}
