//! Output formatting for the CLI.

use console::style;
use luckymart_commerce::cart::CartSummary;
use luckymart_commerce::catalog::{ProductOption, StockAlert};
use luckymart_commerce::loyalty::LoyaltyPoints;
use luckymart_commerce::promotion::Promotion;
use serde_json::json;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            eprintln!("{}", json!({ "warning": msg }));
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print the product selector.
    pub fn options(&self, options: &[ProductOption]) {
        if self.json {
            self.json(&options);
            return;
        }
        for option in options {
            let label = if option.disabled {
                style(format!("{} (품절)", option.label)).dim().to_string()
            } else {
                option.label.clone()
            };
            self.table_row(&[option.product_id.as_str(), label.as_str()], &[4, 0]);
        }
    }

    /// Print stock alerts, if any.
    pub fn stock_alerts(&self, alerts: &[StockAlert]) {
        if self.json {
            self.json(&alerts);
            return;
        }
        for alert in alerts {
            println!("  {}", style(alert).yellow());
        }
    }

    /// Print the cart with its total and point balance.
    pub fn cart(&self, summary: &CartSummary, points: LoyaltyPoints) {
        if self.json {
            self.json(&json!({ "summary": summary, "points": points }));
            return;
        }
        for line in &summary.lines {
            let price = format!("{} x {}", line.unit_price, line.quantity);
            let total = line.line_total.to_string();
            self.table_row(&[line.name.as_str(), price.as_str(), total.as_str()], &[8, 16, 0]);
        }
        let label = summary
            .discount_label
            .as_deref()
            .map(|l| format!(" {}", style(l).green()))
            .unwrap_or_default();
        println!(
            "{} {}{} {}",
            style("총액:").bold(),
            style(summary.total_amount).bold(),
            label,
            style(points).blue()
        );
    }

    /// Announce a promotion.
    pub fn promotion(&self, promotion: &Promotion) {
        if self.json {
            println!("{}", json!({ "promotion": promotion }));
            return;
        }
        println!("\n{} {}", style("🔔").magenta(), style(promotion).magenta().bold());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}
