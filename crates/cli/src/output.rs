//! Terminal output for the CLI.

use console::style;
use serde::Serialize;

/// Output handler for CLI messages.
///
/// In JSON mode only [`Output::json`] writes to stdout; everything else is
/// suppressed so the output stays machine-readable.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("i").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("!").yellow(), msg);
    }

    pub fn error(&self, msg: &str) {
        if self.json {
            let body = serde_json::json!({ "error": msg });
            eprintln!("{body}");
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Only in verbose mode.
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => self.error(&format!("cannot encode output: {e}")),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{col:width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Amounts with two decimals, dropped when whole (`1500`, `12.50`).
pub fn money(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

/// Debt cell: highlighted when something is owed.
pub fn debt_badge(debt: f64) -> String {
    if debt > 0.0 {
        style(money(debt)).red().to_string()
    } else {
        style(money(debt)).green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_drops_whole_decimals() {
        assert_eq!(money(1500.0), "1500");
        assert_eq!(money(12.5), "12.50");
        assert_eq!(money(0.0), "0");
    }

    #[test]
    fn rows_are_padded_to_width() {
        assert_eq!(format_row(&["a", "bb", "c"], &[3, 3, 3]), "a    bb   c");
    }
}
