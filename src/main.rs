use anyhow::Result;
use clap::Parser;

use tsvgrid::app;
use tsvgrid::cli::CliArgs;
use tsvgrid::config::GridConfig;

fn main() -> Result<()> {
    tsvgrid::tracing::init();

    let args = CliArgs::parse();
    let config = args.into_config().map_err(anyhow::Error::msg)?;
    let settings = GridConfig::load();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app::run(config, settings, &mut out)
}
