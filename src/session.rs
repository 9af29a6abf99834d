//! Pure session transitions: (SessionState, SwipeEvent) → SessionState.
//!
//! Inputs are never mutated; every function returns a fresh state. The
//! game layer is the single writer that swaps the result in.

use crate::catalog::Catalog;
use crate::types::{Challenge, ColorSummary, Direction, SessionState, SessionSummary};

/// A resolved swipe: the challenge on screen and where it was thrown.
#[derive(Debug, Clone, Copy)]
pub struct SwipeEvent<'a> {
    pub challenge: &'a Challenge,
    pub direction: Direction,
}

impl SwipeEvent<'_> {
    pub fn is_correct(&self) -> bool {
        self.direction == self.challenge.correct_direction
    }
}

/// Apply one swipe.
///
/// Correct: score and streak go up, best streak follows the streak, and
/// the target's hit counter increments. Incorrect: streak drops to zero
/// and the target's miss counter increments.
pub fn apply(state: &SessionState, event: &SwipeEvent<'_>) -> SessionState {
    let mut next = state.clone();
    let counters = next
        .stats
        .entry(event.challenge.target.id.clone())
        .or_default();

    if event.is_correct() {
        counters.correct += 1;
        next.score += 1;
        next.streak += 1;
        next.best_streak = next.best_streak.max(next.streak);
    } else {
        counters.incorrect += 1;
        next.streak = 0;
    }

    next
}

/// Clear score, streak and every per-color counter.
///
/// The best streak is a high-water mark and survives the reset.
pub fn reset_session(state: &SessionState) -> SessionState {
    let mut stats = state.stats.clone();
    for counters in stats.values_mut() {
        *counters = Default::default();
    }

    SessionState {
        score: 0,
        streak: 0,
        best_streak: state.best_streak,
        stats,
    }
}

/// Rounded percentage, 0 when there is nothing to divide.
pub fn accuracy_percent(correct: u32, incorrect: u32) -> u32 {
    let total = correct + incorrect;
    if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Derive the mastery log: colors swiped at least once, in catalog order,
/// plus session totals.
pub fn summarize(state: &SessionState, catalog: &Catalog) -> SessionSummary {
    let colors: Vec<ColorSummary> = catalog
        .colors()
        .iter()
        .filter_map(|color| {
            let counters = state.stats.get(&color.id)?;
            if counters.total() == 0 {
                return None;
            }
            Some(ColorSummary {
                id: color.id.clone(),
                name: color.name.clone(),
                correct: counters.correct,
                incorrect: counters.incorrect,
                accuracy: accuracy_percent(counters.correct, counters.incorrect),
            })
        })
        .collect();

    let total_correct: u32 = state.stats.values().map(|s| s.correct).sum();
    let total_incorrect: u32 = state.stats.values().map(|s| s.incorrect).sum();

    SessionSummary {
        score: state.score,
        streak: state.streak,
        best_streak: state.best_streak,
        total_correct,
        total_incorrect,
        accuracy: accuracy_percent(total_correct, total_incorrect),
        colors,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenge::generate_one;
    use crate::types::SwipeStats;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn challenge_for(target_id: &str) -> Challenge {
        let catalog = Catalog::standard();
        let mut rng = StdRng::seed_from_u64(0);
        // re-roll until the generator lands on the wanted target
        loop {
            let challenge = generate_one(&catalog, &mut rng).unwrap();
            if challenge.target.id == target_id {
                return challenge;
            }
        }
    }

    fn wrong_direction(challenge: &Challenge) -> Direction {
        Direction::ALL
            .into_iter()
            .find(|&d| d != challenge.correct_direction)
            .unwrap()
    }

    fn hit(state: &SessionState, challenge: &Challenge) -> SessionState {
        apply(
            state,
            &SwipeEvent {
                challenge,
                direction: challenge.correct_direction,
            },
        )
    }

    fn miss(state: &SessionState, challenge: &Challenge) -> SessionState {
        apply(
            state,
            &SwipeEvent {
                challenge,
                direction: wrong_direction(challenge),
            },
        )
    }

    #[test]
    fn first_correct_swipe_on_red_500() {
        let challenge = challenge_for("red-500");
        let state = hit(&SessionState::default(), &challenge);

        assert_eq!(state.score, 1);
        assert_eq!(state.streak, 1);
        assert_eq!(state.best_streak, 1);
        assert_eq!(
            state.stats_for("red-500"),
            SwipeStats {
                correct: 1,
                incorrect: 0
            }
        );
    }

    #[test]
    fn correct_swipe_raises_best_only_past_old_best() {
        let challenge = challenge_for("blue-600");
        let state = SessionState {
            score: 10,
            streak: 2,
            best_streak: 7,
            ..Default::default()
        };

        let next = hit(&state, &challenge);
        assert_eq!(next.score, 11);
        assert_eq!(next.streak, 3);
        assert_eq!(next.best_streak, 7);
    }

    #[test]
    fn incorrect_swipe_resets_streak_only() {
        let challenge = challenge_for("teal-400");
        let state = SessionState {
            score: 6,
            streak: 4,
            best_streak: 9,
            ..Default::default()
        };

        let next = miss(&state, &challenge);
        assert_eq!(next.score, 6);
        assert_eq!(next.streak, 0);
        assert_eq!(next.best_streak, 9);
        assert_eq!(next.stats_for("teal-400").incorrect, 1);
    }

    #[test]
    fn apply_does_not_touch_input() {
        let challenge = challenge_for("lime-300");
        let state = SessionState::default();
        let _ = hit(&state, &challenge);
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn counters_track_resolved_targets() {
        let a = challenge_for("amber-500");
        let b = challenge_for("sky-700");

        let mut state = SessionState::default();
        state = hit(&state, &a);
        state = miss(&state, &a);
        state = hit(&state, &b);
        state = hit(&state, &a);

        assert_eq!(state.stats_for("amber-500").total(), 3);
        assert_eq!(state.stats_for("sky-700").total(), 1);
        assert_eq!(state.score, 3);
        assert_eq!(state.streak, 2);
        assert_eq!(state.best_streak, 2);
    }

    #[test]
    fn reset_zeroes_everything_but_best_streak() {
        let a = challenge_for("rose-800");
        let mut state = SessionState::default();
        for _ in 0..4 {
            state = hit(&state, &a);
        }
        state = miss(&state, &a);

        let reset = reset_session(&state);
        assert_eq!(reset.score, 0);
        assert_eq!(reset.streak, 0);
        assert_eq!(reset.best_streak, 4);
        assert!(reset.stats.values().all(|s| *s == SwipeStats::default()));
        assert_eq!(reset.stats_for("rose-800"), SwipeStats::default());
    }

    #[test]
    fn accuracy_rounds_and_handles_zero() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(2, 1), 67);
        assert_eq!(accuracy_percent(1, 2), 33);
        assert_eq!(accuracy_percent(5, 0), 100);
    }

    #[test]
    fn summary_lists_only_swiped_colors_in_catalog_order() {
        let catalog = Catalog::standard();
        let red = challenge_for("red-500");
        let slate = challenge_for("slate-300");

        let mut state = SessionState::default();
        state = hit(&state, &red);
        state = miss(&state, &slate);
        state = hit(&state, &slate);

        let summary = summarize(&state, &catalog);
        let ids: Vec<&str> = summary.colors.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["slate-300", "red-500"]);
        assert_eq!(summary.colors[0].accuracy, 50);
        assert_eq!(summary.colors[1].accuracy, 100);
        assert_eq!(summary.total_correct, 2);
        assert_eq!(summary.total_incorrect, 1);
        assert_eq!(summary.accuracy, 67);
    }

    #[test]
    fn summary_after_reset_is_empty() {
        let catalog = Catalog::standard();
        let red = challenge_for("red-500");
        let state = reset_session(&hit(&SessionState::default(), &red));

        let summary = summarize(&state, &catalog);
        assert!(summary.colors.is_empty());
        assert_eq!(summary.accuracy, 0);
        assert_eq!(summary.best_streak, 1);
    }
}
