//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::Settings;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SEED: Emoji<'_, '_> = Emoji("🌱 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("ezr").cyan().bold(),
        style("less data, better answers").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: Option<&Path>, settings: &Settings) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    if let Some(input) = input {
        println!("    │  {} Input:  {:<39}│", FOLDER, truncate_path(input, 38));
    }
    println!(
        "    │  {} Seed:   {:<39}│",
        SEED,
        style(settings.seed).yellow()
    );
    println!(
        "    │  {} Bins: {:<4} Budget: {:<3}+{:<3} Leaf: {:<10}│",
        CHART,
        style(settings.bins).yellow(),
        style(settings.budget0).yellow(),
        style(settings.budget).yellow(),
        style(settings.leaf).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(title: &str) {
    println!();
    println!(
        "    {} {}",
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!("    {} {}", ROCKET, style("Done!").green().bold());
    println!();
}

/// Print a labeled number, highlighted
pub fn print_score(label: &str, value: f64) {
    println!(
        "      {} {}",
        label,
        style(format!("{:.3}", value)).yellow().bold()
    );
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len + 3 - max_len).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_tail() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("data/cars/auto93.csv", 10), "...o93.csv");
    }
}
