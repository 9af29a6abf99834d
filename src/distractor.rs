//! Distractor selection: wrong answers that look plausible.
//!
//! A color is a candidate distractor when it shares the target's hue or
//! its hue sits right next to the target's in the hue ordering.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::Catalog;
use crate::types::ColorVariant;

/// Every color similar enough to stand in for `target`, target excluded.
///
/// Same-hue variants first, then neighbouring hues, each in slice order.
pub fn eligible_pool<'a>(colors: &'a [ColorVariant], target: &ColorVariant) -> Vec<&'a ColorVariant> {
    let neighbours: Vec<_> = target.hue.neighbours().collect();

    let same_hue = colors
        .iter()
        .filter(|c| c.hue == target.hue && c.id != target.id);
    let adjacent = colors.iter().filter(|c| neighbours.contains(&c.hue));

    same_hue.chain(adjacent).collect()
}

/// Pick up to `count` distractors for `target`.
///
/// The eligible pool is shuffled and truncated, so the result is random
/// but never contains the target. Returns fewer than `count` colors when
/// the pool is smaller.
pub fn similar_colors<R: Rng>(
    catalog: &Catalog,
    target: &ColorVariant,
    count: usize,
    rng: &mut R,
) -> Vec<ColorVariant> {
    let mut pool = eligible_pool(catalog.colors(), target);
    pool.shuffle(rng);
    pool.into_iter().take(count).cloned().collect()
}

// ============================================================================
// TESTS
// ============================================================================
