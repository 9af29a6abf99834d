//! TUI color semantics and style constants.
//!
//! Pure data, consumed by the rendering layer.
//!
//! Color semantics:
//! - Green: hits, correct matches
//! - Red: misses, destructive actions (reset)
//! - Yellow: streaks and best streak
//! - Cyan: interactive elements (keybinding hints)
//! - Dim: de-emphasized (ids, help line)
//! - Bold: important (score, option labels)

use ratatui::style::{Color, Modifier, Style};

use crate::types::Rgb;

// ============================================================================
// SEMANTIC STYLES
// ============================================================================

/// Correct match: green.
pub const STYLE_HIT: Style = Style::new().fg(Color::Green);

/// Missed match / danger: red.
pub const STYLE_MISS: Style = Style::new().fg(Color::Red);

/// Streak badge and best streak: bold yellow.
pub const STYLE_STREAK: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

/// Interactive element / keybinding hint: cyan.
pub const STYLE_INTERACTIVE: Style = Style::new().fg(Color::Cyan);

/// De-emphasized metadata: dark gray.
pub const STYLE_DIM: Style = Style::new().fg(Color::DarkGray);

/// Important text: bold.
pub const STYLE_IMPORTANT: Style = Style::new().add_modifier(Modifier::BOLD);

/// Accuracy at or above the "mastered" threshold: blue.
pub const STYLE_MASTERED: Style = Style::new().fg(Color::Blue).add_modifier(Modifier::BOLD);

// ============================================================================
// UI ELEMENT STYLES
// ============================================================================

/// Title bar / header.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Directional option label.
pub const STYLE_OPTION: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Cursor row in a list.
pub const STYLE_CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Feedback / commentary line.
pub const STYLE_FEEDBACK: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// Accuracy (percent) at which a color counts as mastered.
pub const MASTERED_ACCURACY: u32 = 70;

// ============================================================================
// SWATCHES
// ============================================================================

/// Terminal color for a swatch.
pub fn swatch_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Solid block style filled with the swatch color.
pub fn swatch_style(rgb: Rgb) -> Style {
    Style::new().bg(swatch_color(rgb)).fg(swatch_color(rgb))
}

/// Style for an accuracy figure.
pub fn accuracy_style(accuracy: u32) -> Style {
    if accuracy >= MASTERED_ACCURACY {
        STYLE_MASTERED
    } else {
        STYLE_DIM
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_styles_have_expected_colors() {
        assert_eq!(STYLE_HIT.fg, Some(Color::Green));
        assert_eq!(STYLE_MISS.fg, Some(Color::Red));
        assert_eq!(STYLE_STREAK.fg, Some(Color::Yellow));
        assert_eq!(STYLE_INTERACTIVE.fg, Some(Color::Cyan));
        assert_eq!(STYLE_DIM.fg, Some(Color::DarkGray));
    }

    #[test]
    fn important_style_is_bold() {
        assert!(STYLE_IMPORTANT.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn cursor_style_is_reversed() {
        assert!(STYLE_CURSOR.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn swatch_fills_background() {
        let style = swatch_style(Rgb(0xef, 0x44, 0x44));
        assert_eq!(style.bg, Some(Color::Rgb(0xef, 0x44, 0x44)));
    }

    #[test]
    fn accuracy_threshold() {
        assert_eq!(accuracy_style(70), STYLE_MASTERED);
        assert_eq!(accuracy_style(69), STYLE_DIM);
    }
}
