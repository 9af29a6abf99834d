//! Domain types for chroma-swipe.
//!
//! Pure data: colors, directions, challenges, counters and configuration.
//! Behavior lives in the `catalog`, `challenge`, `session` and `game`
//! modules.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============================================================================
// PRIMITIVES
// ============================================================================

/// A named color family.
///
/// Declaration order is the fixed hue ordering used for adjacency:
/// neighbours in this list are "visually close" for distractor picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hue {
    Slate,
    Zinc,
    Red,
    Orange,
    Amber,
    Yellow,
    Lime,
    Green,
    Emerald,
    Teal,
    Cyan,
    Sky,
    Blue,
    Indigo,
    Violet,
    Purple,
    Fuchsia,
    Pink,
    Rose,
}

impl Hue {
    /// Every hue, in adjacency order.
    pub const ALL: [Hue; 19] = [
        Hue::Slate,
        Hue::Zinc,
        Hue::Red,
        Hue::Orange,
        Hue::Amber,
        Hue::Yellow,
        Hue::Lime,
        Hue::Green,
        Hue::Emerald,
        Hue::Teal,
        Hue::Cyan,
        Hue::Sky,
        Hue::Blue,
        Hue::Indigo,
        Hue::Violet,
        Hue::Purple,
        Hue::Fuchsia,
        Hue::Pink,
        Hue::Rose,
    ];

    /// Lowercase label, used in color ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Hue::Slate => "slate",
            Hue::Zinc => "zinc",
            Hue::Red => "red",
            Hue::Orange => "orange",
            Hue::Amber => "amber",
            Hue::Yellow => "yellow",
            Hue::Lime => "lime",
            Hue::Green => "green",
            Hue::Emerald => "emerald",
            Hue::Teal => "teal",
            Hue::Cyan => "cyan",
            Hue::Sky => "sky",
            Hue::Blue => "blue",
            Hue::Indigo => "indigo",
            Hue::Violet => "violet",
            Hue::Purple => "purple",
            Hue::Fuchsia => "fuchsia",
            Hue::Pink => "pink",
            Hue::Rose => "rose",
        }
    }

    /// Position in [`Hue::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Hues immediately before and after this one. No wrap-around:
    /// the first and last hue have a single neighbour.
    pub fn neighbours(self) -> impl Iterator<Item = Hue> {
        let i = self.index();
        let before = i.checked_sub(1).map(|j| Hue::ALL[j]);
        let after = Hue::ALL.get(i + 1).copied();
        before.into_iter().chain(after)
    }
}

impl fmt::Display for Hue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Ordinal intensity level within a hue (300 = lightest, 800 = deepest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shade(pub u16);

impl Shade {
    /// The fixed, ordered set of shades in the standard catalog.
    pub const ALL: [Shade; 6] = [
        Shade(300),
        Shade(400),
        Shade(500),
        Shade(600),
        Shade(700),
        Shade(800),
    ];
}

impl fmt::Display for Shade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 24-bit swatch color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Unpack a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// `#rrggbb` string.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

// ============================================================================
// ENUMS
// ============================================================================

/// The four swipe directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Canonical slot order: options are dealt into this sequence.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ============================================================================
// STRUCTS
// ============================================================================

/// One catalog entry: a hue at a given shade, with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorVariant {
    /// Unique id, `"{hue}-{shade}"` (e.g. `red-500`).
    pub id: String,
    /// Fancy display name shown on the option labels.
    pub name: String,
    pub hue: Hue,
    pub shade: Shade,
    /// Swatch color for rendering.
    pub rgb: Rgb,
}

/// The four answer slots of a challenge, one field per direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub up: ColorVariant,
    pub down: ColorVariant,
    pub left: ColorVariant,
    pub right: ColorVariant,
}

impl Options {
    /// The option shown at `direction`.
    pub fn get(&self, direction: Direction) -> &ColorVariant {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    /// `(direction, option)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &ColorVariant)> {
        Direction::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

/// A target swatch with four labeled directions, exactly one correct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub target: ColorVariant,
    pub options: Options,
    pub correct_direction: Direction,
}

/// Per-color hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeStats {
    pub correct: u32,
    pub incorrect: u32,
}

impl SwipeStats {
    /// Total resolved swipes for this color.
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Per-color counters keyed by color id.
pub type GameStats = BTreeMap<String, SwipeStats>;

/// Score, streaks and per-color statistics of one play session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub score: u32,
    /// Consecutive correct swipes since the last miss.
    pub streak: u32,
    /// High-water mark of `streak`. Survives session resets.
    pub best_streak: u32,
    pub stats: GameStats,
}

impl SessionState {
    /// Counters for `id`, zero if the color was never swiped.
    pub fn stats_for(&self, id: &str) -> SwipeStats {
        self.stats.get(id).copied().unwrap_or_default()
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            score: self.score,
            streak: self.streak,
            best_streak: self.best_streak,
        }
    }
}

/// The slice of session state the commentary provider sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreSnapshot {
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
}

/// One row of the mastery log: a color swiped at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSummary {
    pub id: String,
    pub name: String,
    pub correct: u32,
    pub incorrect: u32,
    /// Rounded hit rate, 0-100.
    pub accuracy: u32,
}

/// Derived view of a session for the stats screen and exit report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub score: u32,
    pub streak: u32,
    pub best_streak: u32,
    pub total_correct: u32,
    pub total_incorrect: u32,
    /// Rounded overall hit rate, 0-100.
    pub accuracy: u32,
    /// Colors with at least one swipe, in catalog order.
    pub colors: Vec<ColorSummary>,
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable pretty output.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Tunables for a play session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Refill the challenge queue when it holds fewer than this many.
    pub low_water_mark: usize,
    /// Challenges appended per refill.
    pub batch_size: usize,
    /// Challenges generated when a game starts.
    pub initial_batch: usize,
    /// Request commentary when the score reaches a multiple of this.
    /// Zero disables commentary requests.
    pub commentary_every: u32,
    /// Upper bound on a single commentary request.
    pub commentary_timeout: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            low_water_mark: 5,
            batch_size: 10,
            initial_batch: 10,
            commentary_every: 5,
            commentary_timeout: Duration::from_secs(4),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
