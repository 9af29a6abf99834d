//! TUI module for the interactive game.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Screen, Action, Transition)
//! - `update`: Pure transitions
//! - `view`: Pure rendering
//! - `theme`: Style constants
//! - `run`: Effects (terminal, threads, event loop)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

pub use run::run;
