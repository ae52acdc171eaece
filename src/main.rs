use clap::Parser;
use tracing_subscriber::EnvFilter;
use todos::cli::commands::Cli;
use todos::cli::handlers;
use todos::io::config_io;

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "TODOS_LOG";

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref(), &cwd)?;
    init_tracing(&config.log.level);
    handlers::dispatch(cli, &config)
}

/// Log to stderr, filtered by `TODOS_LOG` or else the configured level
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
