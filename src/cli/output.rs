//! Colored terminal output helpers shared by every screen.

use colored::{Color, Colorize};

use crate::currency::format_brl;
use crate::domain::Category;

pub fn section(title: &str) {
    println!("\n{}", format!("=== {} ===", title).bold());
}

pub fn info(message: &str) {
    println!("{}", message);
}

pub fn success(message: &str) {
    println!("{}", message.bright_green());
}

pub fn warning(message: &str) {
    println!("{}", message.bright_yellow());
}

pub fn error(message: &str) {
    eprintln!("{}", message.bright_red());
}

/// Renders an amount as `R$ 4.804,80`, green when non-negative and red
/// otherwise.
pub fn money(value: f64) -> String {
    let rendered = format!("R$ {}", format_brl(value));
    if value >= 0.0 {
        rendered.bright_green().to_string()
    } else {
        rendered.bright_red().to_string()
    }
}

/// Category label tinted with its display metadata color. Unmapped color
/// names fall back to plain white.
pub fn category_chip(category: Category) -> String {
    category
        .label()
        .color(terminal_color(category.meta().color))
        .to_string()
}

fn terminal_color(name: &str) -> Color {
    match name {
        "green" => Color::Green,
        "blue" => Color::Blue,
        "yellow" => Color::Yellow,
        "cyan" => Color::Cyan,
        "magenta" => Color::Magenta,
        "purple" => Color::BrightMagenta,
        "bright yellow" => Color::BrightYellow,
        _ => Color::White,
    }
}

/// A proportional text bar for the report charts.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let filled = ((value / max) * width as f64).round().max(1.0) as usize;
    "█".repeat(filled.min(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_and_clamps() {
        assert_eq!(bar(50.0, 100.0, 10).chars().count(), 5);
        assert_eq!(bar(100.0, 100.0, 10).chars().count(), 10);
        assert_eq!(bar(0.0, 100.0, 10), "");
        assert_eq!(bar(10.0, 0.0, 10), "");
        // Tiny but non-zero values still show one cell.
        assert_eq!(bar(0.1, 100.0, 10).chars().count(), 1);
    }
}
