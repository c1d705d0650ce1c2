//! Terminal and JSON output for `shop` commands.
//!
//! In `--json` mode human-oriented lines are suppressed, so stdout carries
//! exactly one JSON document per command.

use console::style;

/// Where command output goes and in which form.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Neutral progress or status line.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Warnings go to stderr.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Errors go to stderr, as `{"error": ...}` in JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Section title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Pretty-printed JSON document on stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Indented `key: value` line.
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

    /// Print a table header row and its rule.
    pub fn table_header(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", style(format_row(cols, widths)).bold());
        let rule: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        println!("  {}", style("-".repeat(rule)).dim());
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Pad or cut each column to its width. The last column is printed as is,
/// so it may carry styling.
fn format_row(cols: &[&str], widths: &[usize]) -> String {
    let last = cols.len().min(widths.len()).saturating_sub(1);
    cols.iter()
        .zip(widths.iter())
        .enumerate()
        .map(|(i, (col, &width))| {
            if i == last {
                col.to_string()
            } else {
                format!("{:width$}", truncate(col, width), width = width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Shorten `text` to `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// Status badge for order, inquiry, and checkout states.
pub fn status_badge(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "completed" | "delivered" | "resolved" | "confirmed" => style(status).green().to_string(),
        "pending" | "processing" | "in_progress" | "submitting" | "shipped" => {
            style(status).yellow().to_string()
        }
        "cancelled" | "returned" | "failed" => style(status).red().to_string(),
        _ => status.to_string(),
    }
}
