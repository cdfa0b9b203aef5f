use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// Returns the standard theme used for interactive prompts
pub fn dialoguer_theme() -> ColorfulTheme {
    ColorfulTheme {
        active_item_style: Style::new().cyan().bold(),
        active_item_prefix: style("❯".to_string()).cyan().bold(),
        inactive_item_prefix: style(" ".to_string()),
        prompt_style: Style::new().bold(),
        prompt_prefix: style("?".to_string()).yellow().bold(),
        success_prefix: style("✔".to_string()).green().bold(),
        error_prefix: style("✖".to_string()).red().bold(),
        hint_style: Style::new().dim(),
        values_style: Style::new().cyan(),
        ..Default::default()
    }
}

/// Prints a section heading surrounded by blank lines
pub(crate) fn heading(title: &str) {
    println!();
    println!("  {}", style(title).cyan().bold().underlined());
    println!();
}

pub(crate) fn success(message: impl std::fmt::Display) {
    println!("  {} {}", style("✓").green().bold(), message);
}

pub(crate) fn note(message: impl std::fmt::Display) {
    println!("  {}", style(message).magenta().dim());
}
