use anyhow::Result;
use clap::Parser;
use muxpod::cli::{self, Cli};
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI --log-level flag takes highest precedence, then DEBUG_LEVEL/RUST_LOG,
    // then config (applied once it is loaded).
    muxpod::debug::init_log_bridge(cli.log_level.map(|level| level.to_level_filter()));

    let config = cli.load_config()?;
    muxpod::debug::apply_config_level(config.log_level);
    log::info!("Starting muxpod {}", muxpod::VERSION);

    let runtime = Runtime::new()?;
    let result = runtime.block_on(cli::run(cli, config));

    // Don't let a stuck child process hold up exit
    runtime.shutdown_timeout(std::time::Duration::from_secs(2));

    if let Err(ref e) = result {
        log::error!("muxpod failed: {e:#}");
        eprintln!("muxpod: error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
