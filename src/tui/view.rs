//! Pure rendering: map App state to ratatui widget trees.
//!
//! Each screen has a dedicated render function. The main `render()`
//! dispatches based on the current Screen variant. Widget-building
//! functions are pure (state in, widgets out); the only effect is
//! Frame::render_widget() which writes to the terminal buffer.

use std::time::Instant;

use rand::Rng;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::types::{Challenge, ColorVariant, Direction, SessionSummary};

use super::state::{App, Screen};
use super::theme;

/// Streaks above this get a badge in the title bar.
const STREAK_BADGE_MIN: u32 = 2;

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the current screen to the terminal frame.
pub fn render<R: Rng>(app: &App<R>, frame: &mut Frame) {
    let area = frame.area();

    // Common layout: title bar at top, content in middle, help at bottom
    let chunks = Layout::vertical([
        Constraint::Length(1), // title
        Constraint::Min(0),    // content
        Constraint::Length(1), // help
    ])
    .split(area);

    let title = render_title(app);
    frame.render_widget(title, chunks[0]);

    let help = render_help(&app.screen);
    frame.render_widget(help, chunks[2]);

    let content_area = chunks[1];

    match &app.screen {
        Screen::Playing => render_playing(app, frame, content_area),
        Screen::Stats { cursor } => {
            render_stats(&app.game.summary(), *cursor, frame, content_area);
        }
        Screen::ConfirmReset => render_confirm(app.game.best_streak(), frame, content_area),
    }
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Title bar: app name, score and the streak badge.
fn render_title<R: Rng>(app: &App<R>) -> Paragraph<'static> {
    let section = match app.screen {
        Screen::Playing => "ChromaSwipe",
        Screen::Stats { .. } => "Mastery Log",
        Screen::ConfirmReset => "Reset Session",
    };

    let mut spans = vec![
        Span::styled(section, theme::STYLE_TITLE),
        Span::styled("  Score: ", theme::STYLE_DIM),
        Span::styled(app.game.score().to_string(), theme::STYLE_IMPORTANT),
    ];

    let streak = app.game.streak();
    if streak > STREAK_BADGE_MIN {
        spans.push(Span::styled(format!("  🔥 {}", streak), theme::STYLE_STREAK));
    }

    Paragraph::new(Line::from(spans))
}

/// Help line showing available keybindings for the current screen.
fn render_help(screen: &Screen) -> Paragraph<'static> {
    let help_text = match screen {
        Screen::Playing => "[←↑→↓/wasd/hjkl] swipe  [Tab] mastery log  [R] reset  [q] quit",
        Screen::Stats { .. } => "[j/k] move  [R] reset  [Esc] back  [q] quit",
        Screen::ConfirmReset => "[Y] yes, reset  [N] no, go back",
    };

    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

fn arrow(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "↑",
        Direction::Down => "↓",
        Direction::Left => "←",
        Direction::Right => "→",
    }
}

// ============================================================================
// SCREEN: PLAYING
// ============================================================================

fn render_playing<R: Rng>(app: &App<R>, frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(2), // up label
        Constraint::Min(5),    // left label, swatch, right label
        Constraint::Length(2), // down label
        Constraint::Length(2), // feedback
    ])
    .split(area);

    let Some(challenge) = app.game.current_challenge() else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  No challenges available.",
            theme::STYLE_DIM,
        )));
        frame.render_widget(paragraph, area);
        return;
    };

    let middle = Layout::horizontal([
        Constraint::Percentage(30),
        Constraint::Min(10),
        Constraint::Percentage(30),
    ])
    .split(chunks[1]);

    frame.render_widget(option_label(challenge, Direction::Up, Alignment::Center), chunks[0]);
    frame.render_widget(option_label(challenge, Direction::Left, Alignment::Right), middle[0]);
    let missed = app.is_flashing(Instant::now());
    render_swatch(&challenge.target, missed, frame, middle[1]);
    frame.render_widget(option_label(challenge, Direction::Right, Alignment::Left), middle[2]);
    frame.render_widget(option_label(challenge, Direction::Down, Alignment::Center), chunks[2]);

    let feedback = Paragraph::new(Line::from(Span::styled(
        app.game.feedback().to_string(),
        theme::STYLE_FEEDBACK,
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(feedback, chunks[3]);
}

/// Name of the option bound to `direction`, with its arrow.
fn option_label(
    challenge: &Challenge,
    direction: Direction,
    alignment: Alignment,
) -> Paragraph<'static> {
    let option = challenge.options.get(direction);
    let text = match direction {
        Direction::Right => format!(" {} {}", arrow(direction), option.name),
        Direction::Left => format!("{} {} ", option.name, arrow(direction)),
        Direction::Up | Direction::Down => format!("{} {}", arrow(direction), option.name),
    };

    // side labels sit level with the middle of the swatch
    let mut lines = Vec::new();
    if matches!(direction, Direction::Left | Direction::Right) {
        lines.push(Line::from(""));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(text, theme::STYLE_OPTION)));

    Paragraph::new(lines)
        .alignment(alignment)
        .wrap(Wrap { trim: true })
}

/// The target swatch. The border turns red while a miss is flashing.
fn render_swatch(target: &ColorVariant, missed: bool, frame: &mut Frame, area: Rect) {
    let frame_block = if missed {
        Block::bordered()
            .border_style(theme::STYLE_MISS)
            .title(Line::from(" ✗ miss ").style(theme::STYLE_MISS))
    } else {
        Block::bordered().border_style(theme::STYLE_DIM)
    };

    let inner = frame_block.inner(area);
    frame.render_widget(frame_block, area);
    frame.render_widget(Block::new().style(theme::swatch_style(target.rgb)), inner);
}

// ============================================================================
// SCREEN: STATS
// ============================================================================

fn render_stats(summary: &SessionSummary, cursor: usize, frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(2), // totals
        Constraint::Min(0),    // per-color rows
    ])
    .split(area);

    let totals = Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{} hit", summary.total_correct), theme::STYLE_HIT),
        Span::raw("  "),
        Span::styled(format!("{} missed", summary.total_incorrect), theme::STYLE_MISS),
        Span::raw("  "),
        Span::styled(format!("best streak {}", summary.best_streak), theme::STYLE_STREAK),
        Span::raw("  "),
        Span::styled(format!("{}%", summary.accuracy), theme::accuracy_style(summary.accuracy)),
    ]);
    frame.render_widget(Paragraph::new(totals), chunks[0]);

    let mut lines: Vec<Line> = Vec::new();

    for (i, row) in summary.colors.iter().enumerate() {
        let marker = if i == cursor { "> " } else { "  " };
        let line = Line::from(vec![
            Span::raw(format!("  {}", marker)),
            Span::styled(format!("{:<12}", row.id), theme::STYLE_DIM),
            Span::raw(format!("{:<26}", row.name)),
            Span::styled(format!("{:>3} hit ", row.correct), theme::STYLE_HIT),
            Span::styled(format!("{:>3} miss ", row.incorrect), theme::STYLE_MISS),
            Span::styled(format!("{:>4}%", row.accuracy), theme::accuracy_style(row.accuracy)),
        ]);
        lines.push(if i == cursor {
            line.style(theme::STYLE_CURSOR)
        } else {
            line
        });
    }

    if summary.colors.is_empty() {
        lines.push(Line::from(Span::styled("  (no swipes yet)", theme::STYLE_DIM)));
    }

    let visible_height = chunks[1].height as usize;
    let scroll_offset = if visible_height > 0 && cursor >= visible_height {
        cursor - visible_height + 1
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).scroll((scroll_offset as u16, 0));
    frame.render_widget(paragraph, chunks[1]);
}

// ============================================================================
// SCREEN: CONFIRM
// ============================================================================

fn render_confirm(best_streak: u32, frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Reset session stats?", theme::STYLE_MISS)),
        Line::from(""),
        Line::from("  Score, streak and the mastery log go back to zero."),
        Line::from(vec![
            Span::raw("  Your best streak of "),
            Span::styled(best_streak.to_string(), theme::STYLE_STREAK),
            Span::raw(" is kept."),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  [Y] ", theme::STYLE_INTERACTIVE),
            Span::raw("yes, reset    "),
            Span::styled("[N] ", theme::STYLE_INTERACTIVE),
            Span::raw("no, go back"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::game::{Game, INITIAL_FEEDBACK};
    use crate::types::GameConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;
    use std::time::Duration;

    fn make_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(100, 24);
        Terminal::new(backend).unwrap()
    }

    fn make_app() -> App<StdRng> {
        App::new(Game::new(
            Arc::new(Catalog::standard()),
            GameConfig::default(),
            StdRng::seed_from_u64(3),
        ))
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    fn play(app: &mut App<StdRng>, hits: usize) {
        for _ in 0..hits {
            let direction = app.game.current_challenge().unwrap().correct_direction;
            app.game.swipe(direction);
        }
    }

    #[test]
    fn playing_screen_renders_without_panic() {
        let mut terminal = make_terminal();
        let app = make_app();
        terminal
            .draw(|frame| render(&app, frame))
            .expect("render should not panic");
    }

    #[test]
    fn playing_screen_shows_feedback_and_score() {
        let mut terminal = make_terminal();
        let app = make_app();
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains(INITIAL_FEEDBACK));
        assert!(content.contains("Score: 0"));
    }

    #[test]
    fn playing_screen_colors_the_swatch() {
        let mut terminal = make_terminal();
        let app = make_app();
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let target = app.game.current_challenge().unwrap().target.rgb;
        let wanted = theme::swatch_color(target);
        let painted = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .any(|cell| cell.bg == wanted);
        assert!(painted, "swatch color should appear in the buffer");
    }

    #[test]
    fn streak_badge_appears_after_three() {
        let mut terminal = make_terminal();
        let mut app = make_app();
        play(&mut app, 2);
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(!buffer_text(&terminal).contains("🔥"));

        play(&mut app, 1);
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(buffer_text(&terminal).contains("🔥"));
    }

    #[test]
    fn miss_flash_marks_the_swatch() {
        let mut terminal = make_terminal();
        let mut app = make_app();
        app.miss_flash_until = Some(Instant::now() + Duration::from_secs(60));
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(buffer_text(&terminal).contains("miss"));
    }

    #[test]
    fn expired_flash_is_not_drawn() {
        let mut terminal = make_terminal();
        let mut app = make_app();
        // deadline already passed, but nothing has cleared it yet
        app.miss_flash_until = Some(Instant::now() - Duration::from_millis(1));
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(!buffer_text(&terminal).contains("miss"));
    }

    #[test]
    fn stats_screen_lists_played_colors() {
        let mut terminal = make_terminal();
        let mut app = make_app();
        let target = app.game.current_challenge().unwrap().target.id.clone();
        play(&mut app, 1);
        app.screen = Screen::stats();
        terminal.draw(|frame| render(&app, frame)).unwrap();

        let content = buffer_text(&terminal);
        assert!(content.contains(&target));
        assert!(content.contains("Mastery Log"));
    }

    #[test]
    fn empty_stats_screen_renders() {
        let mut terminal = make_terminal();
        let mut app = make_app();
        app.screen = Screen::stats();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(buffer_text(&terminal).contains("(no swipes yet)"));
    }

    #[test]
    fn confirm_screen_renders() {
        let mut terminal = make_terminal();
        let mut app = make_app();
        app.screen = Screen::ConfirmReset;
        terminal.draw(|frame| render(&app, frame)).unwrap();
        assert!(buffer_text(&terminal).contains("Reset session stats?"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        let app = make_app();
        terminal
            .draw(|frame| render(&app, frame))
            .expect("render should not panic");
    }
}
