//! Locale-aware money rendering. The app assumes a single implicit
//! currency presented in the Brazilian convention; the symbol is left to
//! callers.

use serde::{Deserialize, Serialize};

/// Separator pair used when rendering amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Locale {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Locale {
    /// Brazilian Portuguese convention: `.` for thousands, `,` for cents.
    pub fn pt_br() -> Self {
        Self {
            decimal_separator: ',',
            grouping_separator: '.',
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::pt_br()
    }
}

/// Renders an amount with two fixed decimal places and digit grouping.
pub fn format_amount(locale: &Locale, value: f64) -> String {
    let mut body = format!("{:.2}", value);
    if locale.decimal_separator != '.' {
        if let Some(pos) = body.find('.') {
            body.replace_range(pos..=pos, &locale.decimal_separator.to_string());
        }
    }
    match body.find(locale.decimal_separator) {
        Some(pos) => {
            let grouped = group_integer_part(&body[..pos], locale.grouping_separator);
            format!("{}{}", grouped, &body[pos..])
        }
        None => group_integer_part(&body, locale.grouping_separator),
    }
}

/// Convenience wrapper for the app's default pt-BR locale.
pub fn format_brl(value: f64) -> String {
    format_amount(&Locale::pt_br(), value)
}

fn group_integer_part(int_part: &str, separator: char) -> String {
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    format!("{}{}", sign, grouped)
}
