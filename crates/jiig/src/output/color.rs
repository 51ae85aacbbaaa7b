//! Color and styling helpers for CLI output.
//!
//! Semantic Color Theme:
//!   - Healthy:   green  (healthy nodes, dependency edges from healthy nodes)
//!   - Failed:    red    (failed nodes and the edges leaving them)
//!   - Warning:   yellow (no-data notices, skipped lines)
//!   - Reference: cyan   (node ids, the most connected node)
//!   - Muted:     dimmed (field labels, connecting tables)
//!   - Emphasis:  bold   (section headers)

use colored::Colorize;

use super::OutputConfig;

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "error" color (red) to text.
pub fn error(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.red().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply semantic "info" color (cyan) to text.
pub fn info(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.cyan().to_string()
}

/// Red for failed, green for healthy.
pub(crate) fn colorize_health(text: &str, failed: bool, config: &OutputConfig) -> String {
    if failed {
        error(text, config)
    } else {
        success(text, config)
    }
}

/// Status text, falling back to the health word when the row has none.
pub(crate) fn colorize_status(status: &str, failed: bool, config: &OutputConfig) -> String {
    let text = if status.is_empty() {
        if failed { "FAILED" } else { "HEALTHY" }
    } else {
        status
    };
    colorize_health(text, failed, config)
}

/// Get a colored health icon, with ASCII fallback support.
pub(crate) fn health_icon(failed: bool, config: &OutputConfig) -> String {
    let icon = match (config.use_ascii, failed) {
        (true, true) => "x",
        (true, false) => "+",
        (false, true) => "✗",
        (false, false) => "✓",
    };
    colorize_health(icon, failed, config)
}

/// Edge arrow, with ASCII fallback support.
pub(crate) fn arrow(config: &OutputConfig) -> &'static str {
    if config.use_ascii { "->" } else { "→" }
}

/// Apply dimmed style to text (for labels/field names).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for section headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}
