//! Report formatting for sessions and the catalog.
//!
//! Pure functions: (data, OutputFormat) → String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::types::{OutputFormat, SessionSummary};

/// Format an end-of-session summary.
pub fn format_summary(summary: &SessionSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_summary_human(summary),
        OutputFormat::Json => format_json(summary),
    }
}

/// Format the color catalog.
pub fn format_catalog(catalog: &Catalog, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format_catalog_human(catalog),
        OutputFormat::Json => format_json(catalog.colors()),
    }
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_summary_human(summary: &SessionSummary) -> String {
    let mut out = String::new();

    if !summary.colors.is_empty() {
        out.push_str("=== Mastery Log ===\n");
        for row in &summary.colors {
            out.push_str(&format!(
                "  {:<12} {:<26} hits {:>3}  miss {:>3}  {:>3}%\n",
                row.id, row.name, row.correct, row.incorrect, row.accuracy
            ));
        }
        out.push('\n');
    }

    out.push_str("=== Summary ===\n");
    out.push_str(&format!("Matches:      {}\n", summary.score));
    out.push_str(&format!("Best streak:  {}\n", summary.best_streak));
    out.push_str(&format!("Colors seen:  {}\n", summary.colors.len()));
    out.push_str(&format!(
        "Accuracy:     {}% ({} hit, {} missed)\n",
        summary.accuracy, summary.total_correct, summary.total_incorrect
    ));

    out
}

fn format_catalog_human(catalog: &Catalog) -> String {
    let mut out = String::new();
    let mut current_hue = None;

    for color in catalog.colors() {
        if current_hue != Some(color.hue) {
            if current_hue.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("=== {} ===\n", color.hue));
            current_hue = Some(color.hue);
        }
        out.push_str(&format!(
            "  {:<12} {}  {}\n",
            color.id,
            color.rgb.to_hex(),
            color.name
        ));
    }

    out.push_str(&format!("\n{} colors\n", catalog.len()));
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize: {}\"}}", e))
}

// ============================================================================
// TESTS
// ============================================================================
