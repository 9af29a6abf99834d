//! TUI state algebra: pure types, zero effects.
//!
//! These types define the entire TUI state space. The transition function
//! (`update`) and the rendering layer (`view`) both program against them.
//!
//! Design principle: Screen variants carry only per-screen transient state
//! (cursor positions). The game itself lives in App and is only mutated by
//! the effects layer.

use std::time::Instant;

use crossterm::event::KeyEvent;
use rand::Rng;

use crate::game::{Game, Ticket};
use crate::types::Direction;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Producers feed a single mpsc channel:
/// - A key reader thread sends `Key` variants
/// - Commentary worker threads send `Commentary` replies
///
/// The event loop dispatches: Key events go through `map_key → update`,
/// background events go through a separate handler.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// A commentary reply (or its fallback) for the given ticket.
    Commentary { ticket: Ticket, text: String },
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
///
/// Owns the game and the current screen.
/// The effects layer reads this to know what to render.
#[derive(Debug)]
pub struct App<R> {
    /// Current screen with its per-screen navigation state.
    pub screen: Screen,

    /// The running game. Single writer: the effects layer.
    pub game: Game<R>,

    /// While set and in the future, the view shows the miss marker.
    pub miss_flash_until: Option<Instant>,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

// ============================================================================
// SCREENS
// ============================================================================

/// The current TUI screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// The swatch with its four labeled directions.
    #[default]
    Playing,

    /// Mastery log: per-color hits, misses and accuracy.
    Stats {
        /// Focused row index.
        cursor: usize,
    },

    /// Confirmation gate before wiping the session stats.
    ConfirmReset,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
///
/// The effects layer maps key presses to Actions.
/// The transition function decides what each Action means per Screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Arrow / WASD / hjkl: a swipe while playing, cursor movement in lists.
    Direction(Direction),
    /// Open the mastery log.
    ShowStats,
    /// Leave the current screen.
    Back,
    /// Ask to reset the session (capital R, so it is never hit by accident).
    ResetStats,
    /// Confirm action (Y on confirmation screen).
    ConfirmYes,
    /// Decline action (N on confirmation screen).
    ConfirmNo,
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of a pure state transition.
///
/// The update function returns this. The effects boundary inspects it
/// to decide what to render and which side effects to execute.
#[derive(Debug, PartialEq)]
pub enum Transition {
    /// Render this screen (may be the same or a different screen).
    Screen(Screen),
    /// Quit the application.
    Quit,
    /// Execute a side effect. The effects layer handles it
    /// and updates App state accordingly.
    Effect(Effect),
}

/// Side effect requested by a pure transition.
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Resolve the current challenge with a swipe.
    Swipe(Direction),
    /// Zero the session stats, then show the mastery log.
    ResetSession,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl<R: Rng> App<R> {
    /// Create an App on the playing screen.
    pub fn new(game: Game<R>) -> Self {
        App {
            screen: Screen::Playing,
            game,
            miss_flash_until: None,
            should_quit: false,
        }
    }

    /// Whether the miss marker should be drawn at `now`.
    pub fn is_flashing(&self, now: Instant) -> bool {
        self.miss_flash_until.is_some_and(|until| now < until)
    }
}

impl Screen {
    /// Create the mastery log with the cursor at the top.
    pub fn stats() -> Self {
        Screen::Stats { cursor: 0 }
    }
}

// ============================================================================
// TESTS
// ============================================================================
