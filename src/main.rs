use clap::Parser;
use collar_scan::cli::{Cli, Commands};
use collar_scan::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    collar_scan::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Scan(args) => {
            tracing::info!(symbol = %args.symbol, "Starting collar scan");
            args.execute(&config).await?;
        }
        Commands::Quote(args) => {
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Data: {} (key file: {})",
                config.data.base_url,
                config.data.key_path.display()
            );
            println!(
                "  Collar: ${} x {} legs per collar, {} trading days/year",
                config.collar.contract_cost,
                config.collar.actions_per_collar,
                config.collar.trading_days_per_year
            );
            println!(
                "  Lending: {} fee split, {} shares/contract",
                config.collar.fee_split, config.collar.contract_size
            );
            println!("  Log level: {}", config.telemetry.log_level);
        }
    }

    Ok(())
}
