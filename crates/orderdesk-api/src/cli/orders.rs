//! Order viewing and export commands.
//!
//! All of these are pure, repeatable reads over the durable store; none of
//! them touches the pipeline or the session log.

use std::path::PathBuf;

use chrono::Utc;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use console::style;

use orderdesk_core::repository::OrderRepository;
use orderdesk_types::order::{ExchangeRecord, ScanOrder, StoredExchange};

use crate::state::AppState;

#[derive(clap::Subcommand)]
pub enum OrdersCommand {
    /// Show recorded orders.
    #[command(alias = "ls")]
    List {
        /// Newest first.
        #[arg(long)]
        desc: bool,
    },

    /// Export all orders to a JSON array.
    ExportJson {
        /// Output path (defaults to a timestamped file in the working directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Export all orders to CSV with header `timestamp,email,user,assistant`.
    ExportCsv {
        /// Output path (defaults to a timestamped file in the working directory).
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Print the order table.
pub async fn list(state: &AppState, desc: bool, json: bool) -> anyhow::Result<()> {
    let order = if desc {
        ScanOrder::IdDescending
    } else {
        ScanOrder::IdAscending
    };
    let rows = state.orders.scan_all(order).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("\n  {}\n", style("No orders recorded yet.").dim());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Timestamp", "Email", "User", "Assistant"]);

    for row in &rows {
        table.add_row(vec![
            row.id.to_string(),
            row.record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            row.record.contact.clone(),
            preview(&row.record.user_message),
            preview(&row.record.assistant_reply),
        ]);
    }

    println!("{table}");
    println!("  {}", style(format!("{} orders", rows.len())).dim());
    Ok(())
}

/// Write all orders as a pretty-printed JSON array of record objects.
pub async fn export_json(state: &AppState, out: Option<PathBuf>) -> anyhow::Result<()> {
    let records = records_in_id_order(state).await?;
    let path = out.unwrap_or_else(|| export_path("json"));

    tokio::fs::write(&path, serde_json::to_string_pretty(&records)?).await?;
    println!("  {} Saved {}", style("✓").green().bold(), path.display());
    Ok(())
}

/// Write all orders as CSV with the `timestamp,email,user,assistant` header.
pub async fn export_csv(state: &AppState, out: Option<PathBuf>) -> anyhow::Result<()> {
    let records = records_in_id_order(state).await?;
    let path = out.unwrap_or_else(|| export_path("csv"));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["timestamp", "email", "user", "assistant"])?;
    for record in &records {
        writer.write_record([
            record.timestamp.to_rfc3339(),
            record.contact.clone(),
            record.user_message.clone(),
            record.assistant_reply.clone(),
        ])?;
    }
    writer.flush()?;

    println!("  {} Saved {}", style("✓").green().bold(), path.display());
    Ok(())
}

async fn records_in_id_order(state: &AppState) -> anyhow::Result<Vec<ExchangeRecord>> {
    let rows: Vec<StoredExchange> = state.orders.scan_all(ScanOrder::IdAscending).await?;
    Ok(rows.into_iter().map(|r| r.record).collect())
}

fn export_path(extension: &str) -> PathBuf {
    PathBuf::from(format!(
        "orders_{}.{extension}",
        Utc::now().format("%Y%m%d_%H%M%S")
    ))
}

fn preview(text: &str) -> String {
    const MAX: usize = 60;
    if text.chars().count() > MAX {
        let cut: String = text.chars().take(MAX - 3).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_untouched() {
        assert_eq!(preview("hello"), "hello");
    }

    #[test]
    fn test_preview_long_text_truncated() {
        let long = "x".repeat(200);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), 60);
    }

    #[test]
    fn test_export_path_extension() {
        assert!(export_path("csv").to_string_lossy().ends_with(".csv"));
        assert!(
            export_path("json")
                .to_string_lossy()
                .starts_with("orders_")
        );
    }
}
