use clap::{CommandFactory, Parser};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use thumbnail_worker::health;
use thumbnail_worker::types::environment::Environment;
use thumbnail_worker::worker::config::WorkerConfig;
use thumbnail_worker::worker::ThumbnailWorker;

/// Consumes object-created notifications and renders thumbnails
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Name of the queue carrying object-created notifications
    #[arg(
        short = 'n',
        long,
        env = "QUEUE_NAME",
        default_value = "generate-thumbnail"
    )]
    queue_name: String,

    /// Long-poll wait time in seconds
    #[arg(short = 't', long, env = "WAIT_TIME_SECONDS", default_value_t = 20)]
    wait_time_seconds: i32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.queue_name.trim().is_empty() {
        Cli::command().print_help()?;
        anyhow::bail!("Queue name required");
    }

    let env = Environment::from_env();
    info!("Starting thumbnail worker in {:?} environment", env);

    let config = WorkerConfig::new(cli.queue_name, cli.wait_time_seconds);

    // Create and start the worker
    match ThumbnailWorker::new(&env, config).await {
        Ok(worker) => {
            // Get shutdown token for signal handling
            let shutdown_token = worker.shutdown_token();

            // Start health check server
            let health_shutdown = shutdown_token.clone();
            tokio::spawn(async move {
                if let Err(e) = health::start_health_server(health_shutdown).await {
                    error!("Health server error: {}", e);
                }
            });

            // Spawn signal handler
            let signal_shutdown = shutdown_token.clone();
            tokio::spawn(async move {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Received Ctrl+C, initiating graceful shutdown...");
                        signal_shutdown.cancel();
                    }
                    Err(e) => {
                        error!("Failed to listen for Ctrl+C: {}", e);
                    }
                }
            });

            // Run the worker
            if let Err(e) = worker.start().await {
                error!("Worker error: {}", e);
                return Err(e);
            }
        }
        Err(e) => {
            error!("Failed to start worker: {}", e);
            return Err(e);
        }
    }

    info!("Thumbnail worker stopped");
    Ok(())
}
