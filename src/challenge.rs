//! Challenge generation and the replenishable challenge queue.

use std::collections::VecDeque;

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::catalog::{Catalog, DISTRACTORS_PER_CHALLENGE};
use crate::distractor::similar_colors;
use crate::types::{Challenge, ColorVariant, Direction, Options};

/// Build one challenge: a random target, three similar distractors, and a
/// random assignment of the four colors to the four directions.
///
/// Returns `None` when the target has fewer than three distractors, which
/// a validated [`Catalog`] rules out.
pub fn generate_one<R: Rng>(catalog: &Catalog, rng: &mut R) -> Option<Challenge> {
    if catalog.is_empty() {
        return None;
    }
    let target = catalog.get(rng.gen_range(0..catalog.len()))?.clone();
    let distractors = similar_colors(catalog, &target, DISTRACTORS_PER_CHALLENGE, rng);

    let mut picks: Vec<ColorVariant> = Vec::with_capacity(DISTRACTORS_PER_CHALLENGE + 1);
    picks.push(target.clone());
    picks.extend(distractors);
    picks.shuffle(rng);

    let [up, down, left, right]: [ColorVariant; 4] = match picks.try_into() {
        Ok(slots) => slots,
        Err(short) => {
            warn!(
                "skipping target {}: only {} options available",
                target.id,
                short.len()
            );
            return None;
        }
    };

    let options = Options {
        up,
        down,
        left,
        right,
    };

    let correct_direction = Direction::ALL
        .into_iter()
        .find(|&d| options.get(d).id == target.id)?;

    Some(Challenge {
        target,
        options,
        correct_direction,
    })
}

/// FIFO of pending challenges. The head is the one on screen.
#[derive(Debug, Clone, Default)]
pub struct ChallengeQueue {
    pending: VecDeque<Challenge>,
}

impl ChallengeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The challenge awaiting a swipe.
    pub fn current(&self) -> Option<&Challenge> {
        self.pending.front()
    }

    /// Remove and return the head.
    pub fn pop(&mut self) -> Option<Challenge> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Challenge> {
        self.pending.iter()
    }

    /// Append `count` independently generated challenges.
    ///
    /// Targets that cannot be completed are skipped; attempts are capped so
    /// a degenerate catalog cannot spin forever. Returns how many were added.
    pub fn extend_with<R: Rng>(&mut self, catalog: &Catalog, rng: &mut R, count: usize) -> usize {
        let max_attempts = count.saturating_mul(4);
        let mut added = 0;
        let mut attempts = 0;

        while added < count && attempts < max_attempts {
            attempts += 1;
            if let Some(challenge) = generate_one(catalog, rng) {
                self.pending.push_back(challenge);
                added += 1;
            }
        }

        added
    }

    /// Top up the queue when it holds fewer than `low_water_mark`
    /// challenges. Returns how many were appended (zero when no refill).
    pub fn refill<R: Rng>(
        &mut self,
        catalog: &Catalog,
        rng: &mut R,
        low_water_mark: usize,
        batch_size: usize,
    ) -> usize {
        if self.pending.len() >= low_water_mark {
            return 0;
        }

        let added = self.extend_with(catalog, rng, batch_size);
        debug!(
            "queue refill: +{} challenges, {} pending",
            added,
            self.pending.len()
        );
        added
    }
}

// ============================================================================
// TESTS
// ============================================================================
