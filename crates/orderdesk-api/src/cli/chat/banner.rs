//! Welcome banner for the chat session.

use console::style;

/// Print the session header: model, contact, and available templates.
pub fn print_welcome_banner(model: &str, contact: &str, template_names: &[&str]) {
    println!();
    println!("  {}", style("Orderdesk intake session").cyan().bold());
    println!("  {} {}", style("model:").dim(), model);
    if contact.is_empty() {
        println!("  {} {}", style("contact:").dim(), style("anonymous").dim());
    } else {
        println!("  {} {contact}", style("contact:").dim());
    }
    if !template_names.is_empty() {
        println!(
            "  {} {}",
            style("templates:").dim(),
            template_names.join(", ")
        );
    }
    println!("  {}", style("Type /help for commands, Ctrl+D to exit.").dim());
    println!();
}
