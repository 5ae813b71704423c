// gridcast entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Load config (copying defaults on first run)
// 3. Initialize tracing (stderr, so reports on stdout stay clean)
// 4. Load league data, render the report, print it
// 5. Deliver to Discord when asked

use clap::Parser;

use gridcast_app::cli::Cli;
use gridcast_app::config;
use gridcast_app::report::{self, RunOptions};

use anyhow::Context;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse the command line
    let cli = Cli::parse();

    // 2. Load config
    let config =
        config::load_config(cli.config_dir.as_deref()).context("failed to load configuration")?;

    // 3. Initialize tracing
    init_tracing(cli.verbose || config.league.verbose)?;
    info!(
        command = ?cli.command,
        league = %config.league.league_id,
        "gridcast starting"
    );

    // 4. Build the report
    let opts = RunOptions::from(&cli);
    let output = report::generate(&config, &opts).await?;
    println!("{output}");

    // 5. Deliver
    if opts.deliver {
        report::deliver(&config, &output).await?;
    }

    Ok(())
}

/// Initialize tracing on stderr. `RUST_LOG` takes precedence over the
/// verbosity flag.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose {
        "gridcast=debug,warn"
    } else {
        "gridcast=info,warn"
    };

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
