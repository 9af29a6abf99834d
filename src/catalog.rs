//! The color catalog: every hue at every shade, with display names.
//!
//! Built once at startup and shared read-only for the whole process.
//! A custom catalog must pass [`Catalog::new`] validation so challenge
//! generation can always find three distractors.

use std::collections::HashSet;

use thiserror::Error;

use crate::distractor;
use crate::types::{ColorVariant, Hue, Rgb, Shade};

/// Options per challenge besides the target.
pub const DISTRACTORS_PER_CHALLENGE: usize = 3;

// ============================================================================
// ERRORS
// ============================================================================

/// Why a custom catalog was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog is empty")]
    Empty,

    #[error("duplicate color id: {0}")]
    DuplicateId(String),

    #[error("{id} has only {available} similar colors, need 3")]
    NotEnoughDistractors { id: String, available: usize },
}

// ============================================================================
// NAMING
// ============================================================================

/// Fancy names per hue, "lipstick / nail polish" style.
fn hue_names(hue: Hue) -> &'static [&'static str] {
    match hue {
        Hue::Red => &["Crimson Velvet", "Scarlet Fever", "Ruby Romance", "Cherry Bomb", "Wine Not?", "Siren Song"],
        Hue::Pink => &["Bubblegum Bliss", "Fuchsia Flash", "Rose Petal", "Pink Peony", "Dusty Rose", "Cotton Candy"],
        Hue::Rose => &["Antique Rose", "Wild Berry", "Midnight Rose", "Petal Pusher", "Blush Crush"],
        Hue::Fuchsia => &["Electric Orchid", "Magenta Magic", "Barbie Dream", "Hot Gossip", "Party Pink"],
        Hue::Purple => &["Grape Expectations", "Midnight Plum", "Violet Vixen", "Amethyst Aura", "Lavender Love"],
        Hue::Violet => &["Ultra Violet", "Wisteria Whisper", "Lilac Lace", "Iris Insight", "Plum Perfect"],
        Hue::Indigo => &["Deep Sea", "Starry Night", "Ink Well", "Denim Days", "Twilight Zone"],
        Hue::Blue => &["Sapphire Soul", "Midnight Ocean", "Azure Sky", "Royal Rebel", "Electric Blue"],
        Hue::Sky => &["Cloud Nine", "Baby Blue", "Celestial", "Clear Day", "Atmosphere"],
        Hue::Cyan => &["Tropical Water", "Turquoise Treat", "Aqua Marine", "Lagoon Look", "Ice Cap"],
        Hue::Teal => &["Peacock Pride", "Oceanic", "Deep Forest", "Mermaid Tail", "Teal Temptation"],
        Hue::Emerald => &["Jade Jewel", "Luck of the Irish", "Envy Me", "Forest Green", "Hidden Valley"],
        Hue::Green => &["Minty Fresh", "Lime Light", "Grass Is Greener", "Sage Advice", "Fern Fever"],
        Hue::Lime => &["Zesty Lime", "Sour Apple", "Neon Grass", "Key Lime Pie", "Electric Eel"],
        Hue::Yellow => &["Golden Hour", "Honey Hush", "Lemon Meringue", "Mellow Yellow", "Sun Kissed"],
        Hue::Amber => &["Toasted Pecan", "Tiger Lily", "Burnt Sugar", "Caramel Candy", "Autumn Leaf"],
        Hue::Orange => &["Sunset Sizzle", "Apricot Aura", "Mandarin Mist", "Coral Castle", "Flame Thrower"],
        Hue::Slate => &["Stone Cold", "Pavement Pride", "Concrete Jungle", "Grey Ghost", "Urban Chic"],
        Hue::Zinc => &["Metal Matte", "Industrial", "Titanium", "Pewter Power", "Steel Stare"],
    }
}

/// Display name for a hue at a shade.
///
/// Pure and deterministic: the base name cycles through the hue's list by
/// hundreds digit; shades past 600 read "Deep", shades under 400 "Light".
pub fn fancy_name(hue: Hue, shade: Shade) -> String {
    let names = hue_names(hue);
    let base = names[(shade.0 as usize / 100) % names.len()];

    let suffix = if shade.0 > 600 {
        " Deep"
    } else if shade.0 < 400 {
        " Light"
    } else {
        ""
    };

    format!("{base}{suffix}")
}

/// Stable id for a hue at a shade, e.g. `red-500`.
pub fn color_id(hue: Hue, shade: Shade) -> String {
    format!("{}-{}", hue, shade)
}

// ============================================================================
// PALETTE
// ============================================================================

/// Swatch values for [`Shade::ALL`], lightest first.
fn hue_palette(hue: Hue) -> [u32; 6] {
    match hue {
        Hue::Slate => [0xcbd5e1, 0x94a3b8, 0x64748b, 0x475569, 0x334155, 0x1e293b],
        Hue::Zinc => [0xd4d4d8, 0xa1a1aa, 0x71717a, 0x52525b, 0x3f3f46, 0x27272a],
        Hue::Red => [0xfca5a5, 0xf87171, 0xef4444, 0xdc2626, 0xb91c1c, 0x991b1b],
        Hue::Orange => [0xfdba74, 0xfb923c, 0xf97316, 0xea580c, 0xc2410c, 0x9a3412],
        Hue::Amber => [0xfcd34d, 0xfbbf24, 0xf59e0b, 0xd97706, 0xb45309, 0x92400e],
        Hue::Yellow => [0xfde047, 0xfacc15, 0xeab308, 0xca8a04, 0xa16207, 0x854d0e],
        Hue::Lime => [0xbef264, 0xa3e635, 0x84cc16, 0x65a30d, 0x4d7c0f, 0x3f6212],
        Hue::Green => [0x86efac, 0x4ade80, 0x22c55e, 0x16a34a, 0x15803d, 0x166534],
        Hue::Emerald => [0x6ee7b7, 0x34d399, 0x10b981, 0x059669, 0x047857, 0x065f46],
        Hue::Teal => [0x5eead4, 0x2dd4bf, 0x14b8a6, 0x0d9488, 0x0f766e, 0x115e59],
        Hue::Cyan => [0x67e8f9, 0x22d3ee, 0x06b6d4, 0x0891b2, 0x0e7490, 0x155e75],
        Hue::Sky => [0x7dd3fc, 0x38bdf8, 0x0ea5e9, 0x0284c7, 0x0369a1, 0x075985],
        Hue::Blue => [0x93c5fd, 0x60a5fa, 0x3b82f6, 0x2563eb, 0x1d4ed8, 0x1e40af],
        Hue::Indigo => [0xa5b4fc, 0x818cf8, 0x6366f1, 0x4f46e5, 0x4338ca, 0x3730a3],
        Hue::Violet => [0xc4b5fd, 0xa78bfa, 0x8b5cf6, 0x7c3aed, 0x6d28d9, 0x5b21b6],
        Hue::Purple => [0xd8b4fe, 0xc084fc, 0xa855f7, 0x9333ea, 0x7e22ce, 0x6b21a8],
        Hue::Fuchsia => [0xf0abfc, 0xe879f9, 0xd946ef, 0xc026d3, 0xa21caf, 0x86198f],
        Hue::Pink => [0xf9a8d4, 0xf472b6, 0xec4899, 0xdb2777, 0xbe185d, 0x9d174d],
        Hue::Rose => [0xfda4af, 0xfb7185, 0xf43f5e, 0xe11d48, 0xbe123c, 0x9f1239],
    }
}

/// Swatch color for a hue at a shade. Off-table shades clamp to the
/// nearest standard one.
pub fn swatch(hue: Hue, shade: Shade) -> Rgb {
    let slot = Shade::ALL
        .iter()
        .position(|s| *s >= shade)
        .unwrap_or(Shade::ALL.len() - 1);
    Rgb::from_hex(hue_palette(hue)[slot])
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

impl ColorVariant {
    /// Build a variant with its derived id, name and swatch.
    pub fn new(hue: Hue, shade: Shade) -> Self {
        ColorVariant {
            id: color_id(hue, shade),
            name: fancy_name(hue, shade),
            hue,
            shade,
            rgb: swatch(hue, shade),
        }
    }
}

/// Every hue at every shade, hue-major, lightest shade first.
///
/// Same output on every run.
pub fn build_catalog() -> Vec<ColorVariant> {
    Hue::ALL
        .iter()
        .flat_map(|&hue| Shade::ALL.iter().map(move |&shade| ColorVariant::new(hue, shade)))
        .collect()
}

/// An immutable, validated set of color variants.
#[derive(Debug, Clone)]
pub struct Catalog {
    colors: Vec<ColorVariant>,
}

impl Catalog {
    /// The reference catalog (19 hues × 6 shades).
    pub fn standard() -> Self {
        Catalog {
            colors: build_catalog(),
        }
    }

    /// Validate a custom catalog.
    ///
    /// # Errors
    /// Rejects an empty set, duplicate ids, or any color with fewer than
    /// three eligible distractors.
    pub fn new(colors: Vec<ColorVariant>) -> Result<Self, CatalogError> {
        if colors.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for color in &colors {
            if !seen.insert(color.id.as_str()) {
                return Err(CatalogError::DuplicateId(color.id.clone()));
            }
        }

        for color in &colors {
            let available = distractor::eligible_pool(&colors, color).len();
            if available < DISTRACTORS_PER_CHALLENGE {
                return Err(CatalogError::NotEnoughDistractors {
                    id: color.id.clone(),
                    available,
                });
            }
        }

        Ok(Catalog { colors })
    }

    pub fn colors(&self) -> &[ColorVariant] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ColorVariant> {
        self.colors.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&ColorVariant> {
        self.colors.iter().find(|c| c.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_every_hue_and_shade() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), Hue::ALL.len() * Shade::ALL.len());
        assert_eq!(catalog.len(), 114);
    }

    #[test]
    fn catalog_ids_are_unique() {
        let colors = build_catalog();
        let ids: HashSet<&str> = colors.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), colors.len());
    }

    #[test]
    fn build_catalog_is_deterministic() {
        assert_eq!(build_catalog(), build_catalog());
    }

    #[test]
    fn catalog_order_is_hue_major() {
        let colors = build_catalog();
        assert_eq!(colors[0].id, "slate-300");
        assert_eq!(colors[5].id, "slate-800");
        assert_eq!(colors[6].id, "zinc-300");
        assert_eq!(colors.last().map(|c| c.id.as_str()), Some("rose-800"));
    }

    #[test]
    fn standard_catalog_passes_validation() {
        assert!(Catalog::new(build_catalog()).is_ok());
    }

    #[test]
    fn fancy_name_cycles_and_suffixes() {
        assert_eq!(fancy_name(Hue::Red, Shade(500)), "Siren Song");
        assert_eq!(fancy_name(Hue::Red, Shade(300)), "Cherry Bomb Light");
        assert_eq!(fancy_name(Hue::Red, Shade(600)), "Crimson Velvet");
        assert_eq!(fancy_name(Hue::Red, Shade(700)), "Scarlet Fever Deep");
        // five names: 500 wraps to index 0
        assert_eq!(fancy_name(Hue::Teal, Shade(500)), "Peacock Pride");
    }

    #[test]
    fn names_are_unique_within_a_hue() {
        for hue in Hue::ALL {
            let names: HashSet<String> =
                Shade::ALL.iter().map(|&s| fancy_name(hue, s)).collect();
            assert_eq!(names.len(), Shade::ALL.len(), "{hue}");
        }
    }

    #[test]
    fn swatch_uses_palette_slot() {
        assert_eq!(swatch(Hue::Red, Shade(500)).to_hex(), "#ef4444");
        assert_eq!(swatch(Hue::Blue, Shade(800)).to_hex(), "#1e40af");
    }

    #[test]
    fn find_by_id() {
        let catalog = Catalog::standard();
        let red = catalog.find("red-500").unwrap();
        assert_eq!(red.hue, Hue::Red);
        assert_eq!(red.shade, Shade(500));
        assert!(catalog.find("mauve-500").is_none());
    }

    #[test]
    fn rejects_empty_catalog() {
        assert_eq!(Catalog::new(Vec::new()).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let colors = vec![
            ColorVariant::new(Hue::Red, Shade(300)),
            ColorVariant::new(Hue::Red, Shade(300)),
        ];
        assert_eq!(
            Catalog::new(colors).unwrap_err(),
            CatalogError::DuplicateId("red-300".into())
        );
    }

    #[test]
    fn rejects_catalog_too_small_for_distractors() {
        let colors = vec![
            ColorVariant::new(Hue::Red, Shade(300)),
            ColorVariant::new(Hue::Red, Shade(400)),
            ColorVariant::new(Hue::Red, Shade(500)),
        ];
        match Catalog::new(colors) {
            Err(CatalogError::NotEnoughDistractors { available, .. }) => {
                assert_eq!(available, 2);
            }
            other => panic!("Expected NotEnoughDistractors, got {:?}", other),
        }
    }

    #[test]
    fn accepts_four_colors_of_one_hue() {
        let colors = Shade::ALL[..4]
            .iter()
            .map(|&s| ColorVariant::new(Hue::Teal, s))
            .collect();
        assert!(Catalog::new(colors).is_ok());
    }
}
