//! Pure state transitions: (Screen, Action) → Transition.
//!
//! This is the core logic of the TUI. Fully testable without a terminal.
//! Each screen defines which actions it accepts. Unhandled actions
//! return the current screen unchanged (no-op).

use log::debug;
use rand::Rng;

use crate::types::{Direction, SessionSummary};

use super::state::{Action, App, AppEvent, Effect, Screen, Transition};

/// Pure state transition function.
///
/// Given the current screen, an action, and a read-only view of the
/// session summary, produces the next transition. The effects boundary
/// interprets the result.
pub fn update(screen: Screen, action: &Action, summary: &SessionSummary) -> Transition {
    match screen {
        Screen::Playing => update_playing(action),
        Screen::Stats { cursor } => update_stats(cursor, summary.colors.len(), action),
        Screen::ConfirmReset => update_confirm(action),
    }
}

// ============================================================================
// PER-SCREEN HANDLERS
// ============================================================================

/// Playing: every direction is a swipe.
fn update_playing(action: &Action) -> Transition {
    match action {
        Action::Direction(direction) => Transition::Effect(Effect::Swipe(*direction)),
        Action::ShowStats => Transition::Screen(Screen::stats()),
        Action::ResetStats => Transition::Screen(Screen::ConfirmReset),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Playing),
    }
}

/// Stats: up/down scroll the mastery log, back returns to play.
fn update_stats(cursor: usize, len: usize, action: &Action) -> Transition {
    match action {
        Action::Direction(Direction::Up) => Transition::Screen(Screen::Stats {
            cursor: cursor.saturating_sub(1),
        }),
        Action::Direction(Direction::Down) => {
            let new_cursor = if len == 0 { 0 } else { (cursor + 1).min(len - 1) };
            Transition::Screen(Screen::Stats { cursor: new_cursor })
        }
        Action::Back | Action::ShowStats => Transition::Screen(Screen::Playing),
        Action::ResetStats => Transition::Screen(Screen::ConfirmReset),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::Stats { cursor }),
    }
}

/// Confirm: yes resets, no goes back to play.
fn update_confirm(action: &Action) -> Transition {
    match action {
        Action::ConfirmYes => Transition::Effect(Effect::ResetSession),
        Action::ConfirmNo | Action::Back => Transition::Screen(Screen::Playing),
        Action::Quit => Transition::Quit,
        _ => Transition::Screen(Screen::ConfirmReset),
    }
}

// ============================================================================
// BACKGROUND EVENTS
// ============================================================================

/// Apply an event produced off the UI thread.
///
/// Key events are routed through `map_key → update` by the loop and are
/// ignored here.
pub fn handle_background_event<R: Rng>(app: &mut App<R>, event: AppEvent) {
    match event {
        AppEvent::Commentary { ticket, text } => {
            if !app.game.apply_commentary(ticket, text) {
                debug!("commentary arrived after newer feedback");
            }
        }
        AppEvent::Key(_) => {}
    }
}

// ============================================================================
// TESTS
// ============================================================================
