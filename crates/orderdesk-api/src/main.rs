//! Orderdesk CLI entry point.
//!
//! Binary name: `odesk`
//!
//! Parses CLI arguments, validates credentials, initializes the database and
//! pipeline, then dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,orderdesk=debug",
        _ => "trace",
    };
    orderdesk_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "odesk", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (credentials, DB, pipeline)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat {
            contact,
            strategy,
            template,
            faq,
        } => {
            cli::chat::loop_runner::run_chat_loop(&state, contact, strategy, template, faq)
                .await?;
        }

        Commands::Orders { action } => match action {
            cli::orders::OrdersCommand::List { desc } => {
                cli::orders::list(&state, desc, cli.json).await?;
            }
            cli::orders::OrdersCommand::ExportJson { out } => {
                cli::orders::export_json(&state, out).await?;
            }
            cli::orders::OrdersCommand::ExportCsv { out } => {
                cli::orders::export_csv(&state, out).await?;
            }
        },

        Commands::Notify { note } => {
            cli::notify::notify_operator(&state, note.as_deref()).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    orderdesk_observe::tracing_setup::shutdown_tracing();
    Ok(())
}
