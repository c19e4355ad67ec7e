//! Slash commands available inside the chat loop.

use console::style;

/// Parsed chat command.
#[derive(Debug, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    Clear,
    Exit,
    Unknown(String),
}

/// Parse a line into a chat command, or `None` for an ordinary message.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let command = trimmed.split_whitespace().next().unwrap_or(trimmed);
    Some(match command {
        "/help" => ChatCommand::Help,
        "/clear" => ChatCommand::Clear,
        "/exit" | "/quit" => ChatCommand::Exit,
        other => ChatCommand::Unknown(other.to_string()),
    })
}

/// Print the in-chat help text.
pub fn print_help() {
    println!();
    println!("  {}", style("Commands").bold());
    println!("  {}  show this help", style("/help ").cyan());
    println!("  {}  clear the screen", style("/clear").cyan());
    println!("  {}  end the session", style("/exit ").cyan());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_message_is_not_a_command() {
        assert!(parse("hello there").is_none());
    }

    #[test]
    fn test_known_commands() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/clear"), Some(ChatCommand::Clear));
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_unknown_command_is_reported() {
        assert_eq!(
            parse("/frobnicate now"),
            Some(ChatCommand::Unknown("/frobnicate".to_string()))
        );
    }
}
