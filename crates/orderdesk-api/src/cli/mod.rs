//! CLI command definitions and dispatch for the `odesk` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod notify;
pub mod orders;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Conversational order intake with durable records and operator alerts.
#[derive(Parser)]
#[command(name = "odesk", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive order-intake chat session.
    Chat {
        /// Client contact email recorded with each exchange.
        #[arg(long, default_value = "")]
        contact: String,

        /// Assistant strategy text (defaults to the configured strategy).
        #[arg(long)]
        strategy: Option<String>,

        /// Auto-reply template name merged into the directive.
        #[arg(long)]
        template: Option<String>,

        /// Path to a FAQ file merged into the directive.
        #[arg(long)]
        faq: Option<PathBuf>,
    },

    /// View and export recorded orders.
    Orders {
        #[command(subcommand)]
        action: orders::OrdersCommand,
    },

    /// Send a manual notification to the operator.
    Notify {
        /// Optional note included in the message body.
        note: Option<String>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
