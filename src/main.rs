use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cobb_douglas::config::Config;
use cobb_douglas::curves::SampleGrid;
use cobb_douglas::metrics;
use cobb_douglas::optimizer::LagrangianSolver;
use cobb_douglas::policy::InputPolicy;
use cobb_douglas::scenario::MarketScenario;
use cobb_douglas::session::{self, Session};

fn init_tracing(config: &Config) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config);

    if let Some(addr) = config.metrics_addr {
        metrics::init_metrics_server(addr)?;
        info!(%addr, "metrics exporter listening");
    }

    info!("cobb-douglas v{} starting", env!("CARGO_PKG_VERSION"));

    let scenario = MarketScenario::new(
        config.initial_alpha,
        config.initial_beta,
        config.initial_p1,
        config.initial_p2,
        config.initial_m,
    )
    .context("initial scenario is outside the model domain")?;
    let grid = SampleGrid::new(config.grid_lower, config.grid_upper, config.grid_points)
        .context("invalid sample grid")?;
    let policy = InputPolicy::default().with_unit_sum(config.require_unit_sum);

    let session = Session::new(scenario, Box::new(LagrangianSolver), grid, policy)
        .context("initial scenario rejected by input policy")?;

    let (line_tx, line_rx) = mpsc::channel(config.channel_buffer);
    // Never joined: a pending stdin read must not block exit.
    let stdin = std::io::BufReader::new(std::io::stdin());
    let _reader = session::spawn_line_reader(stdin, line_tx)?;

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl-C, shutting down"),
            Err(err) => {
                warn!(error = %err, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        }
    };

    if let Err(err) = session::run(
        session,
        line_rx,
        tokio::io::stdout(),
        config.channel_buffer,
        shutdown,
    )
    .await
    {
        error!(error = %format!("{err:#}"), "session stopped");
        return Err(err);
    }

    info!("session finished");
    Ok(())
}
