use clap::Parser;
use jose_cli::output::{self, OutputFormat};
use jose_cli::{execute, load_config, Cli};
use jose_jwa::AlgorithmRegistry;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    let format = cli.format.parse::<OutputFormat>().unwrap_or_else(|_| {
        eprintln!("Warning: unknown format '{}', using json", cli.format);
        OutputFormat::Json
    });

    // Initialize logging to stderr
    let level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("jose_cli={0},jose_jwa={0}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let registry = match load_config(&cli)
        .and_then(|config| Ok(AlgorithmRegistry::with_defaults(&config)?))
    {
        Ok(registry) => registry,
        Err(e) => {
            output::print_error(format, &format!("Failed to initialize: {}", e));
            std::process::exit(1);
        }
    };

    debug!(command = cli.command.name(), "running command");

    match execute(&cli.command, &registry) {
        Ok(response) => output::print_success(format, &response),
        Err(e) => {
            output::print_error(format, &e.to_string());
            std::process::exit(1);
        }
    }
}
