//! Manual operator notification command.

use console::style;

use orderdesk_types::notify::DeliveryOutcome;

use crate::state::AppState;

/// Trigger an operator notification outside any exchange.
///
/// There is no pipeline state to protect here, so the delivery outcome --
/// including failure -- is printed straight back to the caller.
pub async fn notify_operator(state: &AppState, note: Option<&str>) -> anyhow::Result<()> {
    match state.pipeline.notify_operator(note).await {
        DeliveryOutcome::Delivered => {
            println!("  {} Operator notified.", style("✓").green().bold());
        }
        DeliveryOutcome::Failed { reason } => {
            println!(
                "  {} Notification failed: {reason}",
                style("!").red().bold()
            );
        }
    }
    Ok(())
}
