//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the pure layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//! Kept minimal: all decisions live in the pure layers.
//!
//! Architecture: producer threads feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key events
//! - Commentary threads: one per request, each sends a single reply
//! The event loop consumes from the channel, dispatching to pure handlers.
//! It wakes on a short tick so the miss flash can expire without input.

use std::io;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, info};
use rand::Rng;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::commentary::{Commentator, request_encouragement};
use crate::game::{CommentaryRequest, Game};
use crate::types::{Direction, SessionSummary};

use super::state::{Action, App, AppEvent, Effect, Screen, Transition};
use super::update::{handle_background_event, update};
use super::view::render;

/// How long the miss marker stays on the swatch.
pub const MISS_FLASH: Duration = Duration::from_millis(800);

/// Upper bound on how long the loop sleeps without input.
const TICK: Duration = Duration::from_millis(100);

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        // Swipes (and list movement)
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => {
            Some(Action::Direction(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => {
            Some(Action::Direction(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => {
            Some(Action::Direction(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => {
            Some(Action::Direction(Direction::Right))
        }

        // Screens
        KeyCode::Tab | KeyCode::Char('i') => Some(Action::ShowStats),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('R') => Some(Action::ResetStats),
        KeyCode::Char('q') => Some(Action::Quit),

        // Confirm
        KeyCode::Char('Y') | KeyCode::Char('y') => Some(Action::ConfirmYes),
        KeyCode::Char('N') | KeyCode::Char('n') => Some(Action::ConfirmNo),

        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards key presses to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break; // receiver dropped, TUI is shutting down
                    }
                }
                Ok(_) => {} // ignore releases, mouse, resize, etc.
                Err(_) => break,
            }
        }
    });
}

/// Spawn a thread that asks the provider for a comment and posts the reply.
///
/// `request_encouragement` bounds the wait, so the thread always ends with
/// exactly one `Commentary` event (unless the loop is already gone).
fn spawn_commentary(
    provider: Arc<dyn Commentator>,
    request: CommentaryRequest,
    timeout: Duration,
    tx: mpsc::Sender<AppEvent>,
) {
    thread::spawn(move || {
        let text = request_encouragement(provider, request.snapshot, timeout);
        let _ = tx.send(AppEvent::Commentary {
            ticket: request.ticket,
            text,
        });
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the TUI until the player quits, returning the final session summary.
///
/// With `provider` set to None, no commentary is requested and the
/// feedback line only changes on misses.
pub fn run<R: Rng>(
    game: Game<R>,
    provider: Option<Arc<dyn Commentator>>,
) -> io::Result<SessionSummary> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(game);

    let (tx, rx) = mpsc::channel::<AppEvent>();
    spawn_key_reader(tx.clone());

    info!("session started ({} challenges queued)", app.game.queue_len());
    let result = event_loop(&mut terminal, &mut app, provider, &tx, &rx);

    restore_terminal()?;
    result?;

    let summary = app.game.summary();
    info!(
        "session ended: score {}, best streak {}, accuracy {}%",
        summary.score, summary.best_streak, summary.accuracy
    );
    Ok(summary)
}

fn event_loop<R: Rng>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<R>,
    provider: Option<Arc<dyn Commentator>>,
    tx: &mpsc::Sender<AppEvent>,
    rx: &mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    let timeout = app.game.config().commentary_timeout;

    loop {
        // Render
        terminal.draw(|frame| render(app, frame))?;

        // Check quit flag
        if app.should_quit {
            return Ok(());
        }

        // Block on next event from any producer, waking for the flash timer
        let event = match rx.recv_timeout(TICK) {
            Ok(e) => Some(e),
            Err(mpsc::RecvTimeoutError::Timeout) => None,
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        };

        match event {
            Some(AppEvent::Key(key)) => {
                if let Some(action) = map_key(key) {
                    let screen = std::mem::take(&mut app.screen);
                    let transition = update(screen, &action, &app.game.summary());

                    match transition {
                        Transition::Screen(new_screen) => {
                            app.screen = new_screen;
                        }
                        Transition::Quit => {
                            app.should_quit = true;
                        }
                        Transition::Effect(effect) => {
                            let request = handle_effect(effect, app, Instant::now());
                            if let (Some(request), Some(provider)) = (request, &provider) {
                                debug!("requesting commentary at score {}", request.snapshot.score);
                                spawn_commentary(provider.clone(), request, timeout, tx.clone());
                            }
                        }
                    }
                }
            }
            Some(background_event) => {
                handle_background_event(app, background_event);
            }
            None => {}
        }

        expire_flash(app, Instant::now());
    }
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a pure transition.
///
/// Returns the commentary request a swipe raised, if any; spawning it is
/// left to the caller.
fn handle_effect<R: Rng>(
    effect: Effect,
    app: &mut App<R>,
    now: Instant,
) -> Option<CommentaryRequest> {
    match effect {
        Effect::Swipe(direction) => {
            app.screen = Screen::Playing;
            let outcome = app.game.swipe(direction)?;
            if outcome.refilled > 0 {
                debug!("queue topped up with {} challenges", outcome.refilled);
            }
            if !outcome.correct {
                app.miss_flash_until = Some(now + MISS_FLASH);
            }
            outcome.commentary
        }
        Effect::ResetSession => {
            app.game.reset_stats();
            app.screen = Screen::stats();
            None
        }
    }
}

/// Drop the miss marker once its time is up.
fn expire_flash<R: Rng>(app: &mut App<R>, now: Instant) {
    if app.miss_flash_until.is_some() && !app.is_flashing(now) {
        app.miss_flash_until = None;
    }
}

// ============================================================================
// TESTS
// ============================================================================
