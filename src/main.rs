use clap::Parser;
use turbo_bot::cli::{Cli, Commands};
use turbo_bot::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration; only a missing file falls back to the bundled example
    let config = Config::load_or_default(&cli.config, include_str!("../config.toml.example"))?;
    let params = config.validate()?;

    // Initialize telemetry
    let _guard = turbo_bot::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Simulate(args) => {
            tracing::info!("Replaying outcome sequence");
            args.execute(params)?;
        }
        Commands::Classify(args) => args.execute()?,
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Broker: {} ({:?})",
                config.broker.email, config.broker.account_type
            );
            println!(
                "  Trading: timeframe={}s duration={}m payout=[{}, {}]",
                config.trading.timeframe_secs,
                config.trading.trade_duration_mins(),
                config.trading.min_payout,
                config.trading.max_payout
            );
            println!(
                "  Risk: {} stop_loss={}/{} stop_win={}/{}",
                params.policy.mode_name(),
                params.limits.stop_loss_amount,
                params.limits.stop_loss_consecutive,
                params.limits.stop_win_amount,
                params.limits.stop_win_victories
            );
            println!("  Assets: {}", params.assets.join(", "));
            println!(
                "  Feed: {} attempts, {}s apart",
                config.feed.max_attempts, config.feed.retry_delay_secs
            );
            println!("  Training log: {}", config.model.training_log.display());
        }
    }

    Ok(())
}
