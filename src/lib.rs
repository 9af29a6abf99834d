//! chroma-swipe: a terminal color-matching game.
//!
//! A swatch is shown with four shade names around it; swiping toward the
//! right name scores a match. Distractors come from the same and
//! neighbouring hues, so the names are close calls.

pub mod catalog;
pub mod challenge;
pub mod commentary;
pub mod distractor;
pub mod game;
pub mod report;
pub mod session;
pub mod tui;
pub mod types;
