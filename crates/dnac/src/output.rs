//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Placeholder for fields the controller left out.
pub const MISSING: &str = "N/A";

/// Display helper applying the [`MISSING`] sentinel.
pub fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_owned()
}

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// A success line, green when color is on.
pub fn success(message: &str, color: bool) -> String {
    if color {
        format!("{} {message}", "✓".green())
    } else {
        message.to_owned()
    }
}

/// A failure line, red when color is on.
pub fn failure(message: &str, color: bool) -> String {
    if color {
        format!("{} {message}", "✗".red())
    } else {
        format!("Error: {message}")
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table, or `empty`
///   when there is nothing to show
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    empty: &str,
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table if data.is_empty() => empty.to_owned(),
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted string,
/// since single-item detail views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let result = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    result.unwrap_or_else(|e| format!("serialization failed: {e}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("serialization failed: {e}"))
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        name: &'static str,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "Name")]
        name: String,
    }

    fn row(i: &Item) -> ItemRow {
        ItemRow {
            name: i.name.to_owned(),
        }
    }

    fn id(i: &Item) -> String {
        i.name.to_owned()
    }

    #[test]
    fn empty_table_uses_message() {
        let out = render_list::<Item, ItemRow>(&OutputFormat::Table, &[], "Nothing here.", row, id);
        assert_eq!(out, "Nothing here.");
    }

    #[test]
    fn empty_json_is_an_array() {
        let out = render_list::<Item, ItemRow>(&OutputFormat::JsonCompact, &[], "x", row, id);
        assert_eq!(out, "[]");
    }

    #[test]
    fn table_has_header_and_rows() {
        let data = [Item { name: "leaf-1" }, Item { name: "leaf-2" }];
        let out = render_list(&OutputFormat::Table, &data, "", row, id);
        assert!(out.contains("Name"));
        assert!(out.find("leaf-1") < out.find("leaf-2"));
    }

    #[test]
    fn plain_is_one_id_per_line() {
        let data = [Item { name: "a" }, Item { name: "b" }];
        let out = render_list(&OutputFormat::Plain, &data, "", row, id);
        assert_eq!(out, "a\nb");
    }

    #[test]
    fn missing_values_use_sentinel() {
        assert_eq!(or_missing(None), "N/A");
        assert_eq!(or_missing(Some("up")), "up");
    }

    #[test]
    fn uncolored_failure_is_prefixed() {
        assert_eq!(failure("boom", false), "Error: boom");
        assert_eq!(success("done", false), "done");
    }
}
