//! Main chat loop orchestration.
//!
//! This is the front-end collaborator the pipeline is designed against: it
//! reads input, forwards each message through the pipeline, prints the
//! growing reply as snapshots arrive, and keeps the conversation history
//! for the next turn. FAQ file loading happens here -- the pipeline only
//! ever sees text.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context as _;
use console::style;
use futures_util::StreamExt;

use orderdesk_core::pipeline::{Turn, TurnEvent, TurnRequest};
use orderdesk_types::llm::MessageRole;
use orderdesk_types::order::ExchangeRecord;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

/// Run the interactive order-intake loop.
pub async fn run_chat_loop(
    state: &AppState,
    contact: String,
    strategy: Option<String>,
    template: Option<String>,
    faq_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let faq = match faq_path {
        Some(path) => Some(
            tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed to read FAQ file {}", path.display()))?,
        ),
        None => None,
    };
    let strategy = strategy.unwrap_or_else(|| state.config.default_strategy.clone());

    let template_names: Vec<&str> = state.pipeline.templates().names().collect();
    print_welcome_banner(&state.config.llm.model, &contact, &template_names);

    let mut history: Vec<Turn> = Vec::new();

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(name).dim()
                            );
                        }
                    }
                    continue;
                }

                let request = TurnRequest {
                    contact: contact.clone(),
                    message: text.clone(),
                    history: history.clone(),
                    strategy: strategy.clone(),
                    template: template.clone(),
                    faq: faq.clone(),
                };

                if let Some(record) = run_turn(state, request).await {
                    history.push(Turn {
                        role: MessageRole::User,
                        content: record.user_message,
                    });
                    history.push(Turn {
                        role: MessageRole::Assistant,
                        content: record.assistant_reply,
                    });
                }
                // On failure the exchange never happened; the history stays
                // untouched and the next message simply retries.
            }
        }
    }

    Ok(())
}

/// Drive one pipeline invocation, streaming the reply to the terminal.
///
/// Returns the finalized record, or `None` when the turn failed.
async fn run_turn(state: &AppState, request: TurnRequest) -> Option<ExchangeRecord> {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let start_time = Instant::now();
    let mut stream = state.pipeline.respond(request);

    let mut printed = 0usize;
    let mut first_token_received = false;
    let mut completed: Option<ExchangeRecord> = None;

    while let Some(item) = stream.next().await {
        match item {
            Ok(TurnEvent::Snapshot { reply }) => {
                if !first_token_received {
                    spinner.finish_and_clear();
                    first_token_received = true;
                    print!("\n  {} ", style("Assistant >").cyan().bold());
                    let _ = std::io::stdout().flush();
                }
                // Snapshots carry the whole reply; print only the unseen tail.
                print!("{}", &reply[printed..]);
                let _ = std::io::stdout().flush();
                printed = reply.len();
            }
            Ok(TurnEvent::Completed { record }) => {
                completed = Some(record);
            }
            Err(e) => {
                spinner.finish_and_clear();
                eprintln!("\n  {} {e}", style("!").red().bold());
                eprintln!("  {}", style("Type a message to retry, /exit to quit.").dim());
                return None;
            }
        }
    }
    if !first_token_received {
        spinner.finish_and_clear();
    }

    let record = completed?;
    let elapsed = start_time.elapsed().as_millis() as u64;
    println!();
    println!(
        "  {} {} {} {:.1}s",
        style("|").dim(),
        style(&state.config.llm.model).dim(),
        style("\u{00b7}").dim(),
        elapsed as f64 / 1000.0,
    );
    println!();
    Some(record)
}
