//! The game: queue, session and feedback behind one single-writer handle.
//!
//! This is the contract the front end programs against. It exposes
//! read-only projections (current challenge, score, streaks, stats,
//! feedback) and accepts two events: `swipe(direction)` and
//! `reset_stats()`.

use std::sync::Arc;

use log::debug;
use rand::Rng;

use crate::catalog::Catalog;
use crate::challenge::ChallengeQueue;
use crate::commentary::is_commentary_due;
use crate::session::{self, SwipeEvent};
use crate::types::{Challenge, Direction, GameConfig, ScoreSnapshot, SessionState, SessionSummary};

/// Feedback text before the first swipe.
pub const INITIAL_FEEDBACK: &str = "Which shade name fits?";

/// Feedback text after a miss.
pub const MISS_FEEDBACK: &str = "Ouch! That was a close one.";

/// Identifies the feedback generation a commentary request was made in.
///
/// A reply is only applied if no newer feedback was written meanwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// A commentary request raised by a swipe, for the effects layer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentaryRequest {
    pub ticket: Ticket,
    pub snapshot: ScoreSnapshot,
}

/// What a swipe did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeOutcome {
    pub correct: bool,
    /// The challenge that was resolved.
    pub challenge: Challenge,
    /// Challenges generated by the refill this swipe triggered.
    pub refilled: usize,
    /// Set on every `commentary_every`-th correct match.
    pub commentary: Option<CommentaryRequest>,
}

/// Single "latest feedback text" slot with a generation counter.
#[derive(Debug, Clone)]
struct Feedback {
    text: String,
    generation: u64,
}

impl Feedback {
    fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.generation += 1;
    }
}

/// One play session over a shared catalog.
#[derive(Debug)]
pub struct Game<R> {
    catalog: Arc<Catalog>,
    config: GameConfig,
    session: SessionState,
    queue: ChallengeQueue,
    feedback: Feedback,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Start a game with a freshly generated batch of challenges.
    pub fn new(catalog: Arc<Catalog>, config: GameConfig, mut rng: R) -> Self {
        let mut queue = ChallengeQueue::new();
        queue.extend_with(&catalog, &mut rng, config.initial_batch);

        Game {
            catalog,
            config,
            session: SessionState::default(),
            queue,
            feedback: Feedback {
                text: INITIAL_FEEDBACK.to_string(),
                generation: 0,
            },
            rng,
        }
    }

    // ------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------

    pub fn current_challenge(&self) -> Option<&Challenge> {
        self.queue.current()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn streak(&self) -> u32 {
        self.session.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.session.best_streak
    }

    pub fn feedback(&self) -> &str {
        &self.feedback.text
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn summary(&self) -> SessionSummary {
        session::summarize(&self.session, &self.catalog)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Resolve the current challenge with a swipe toward `direction`.
    ///
    /// Returns `None` (and changes nothing) when no challenge is pending.
    /// The queue is topped up first when it is below the low-water mark,
    /// so it never runs dry during play.
    pub fn swipe(&mut self, direction: Direction) -> Option<SwipeOutcome> {
        if self.queue.is_empty() {
            return None;
        }

        let refilled = self.queue.refill(
            &self.catalog,
            &mut self.rng,
            self.config.low_water_mark,
            self.config.batch_size,
        );
        let challenge = self.queue.pop()?;

        let event = SwipeEvent {
            challenge: &challenge,
            direction,
        };
        let correct = event.is_correct();
        self.session = session::apply(&self.session, &event);

        let commentary = if correct {
            is_commentary_due(self.session.score, self.config.commentary_every).then(|| {
                CommentaryRequest {
                    ticket: Ticket(self.feedback.generation),
                    snapshot: self.session.snapshot(),
                }
            })
        } else {
            self.feedback.set(MISS_FEEDBACK);
            None
        };

        debug!(
            "swipe {} on {}: {} (score {}, streak {})",
            direction,
            challenge.target.id,
            if correct { "hit" } else { "miss" },
            self.session.score,
            self.session.streak
        );

        Some(SwipeOutcome {
            correct,
            challenge,
            refilled,
            commentary,
        })
    }

    /// Zero score, streak and per-color stats. Best streak, the queue and
    /// the feedback line are kept.
    pub fn reset_stats(&mut self) {
        self.session = session::reset_session(&self.session);
        debug!("session reset (best streak {})", self.session.best_streak);
    }

    /// Deliver a commentary reply.
    ///
    /// Applied only when the feedback slot has not changed since the
    /// request was made; returns whether the text was shown.
    pub fn apply_commentary(&mut self, ticket: Ticket, text: impl Into<String>) -> bool {
        if ticket != Ticket(self.feedback.generation) {
            debug!("dropping stale commentary");
            return false;
        }
        self.feedback.set(text);
        true
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SwipeStats;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn new_game(seed: u64) -> Game<StdRng> {
        Game::new(
            Arc::new(Catalog::standard()),
            GameConfig::default(),
            StdRng::seed_from_u64(seed),
        )
    }

    fn correct(game: &Game<StdRng>) -> Direction {
        game.current_challenge().unwrap().correct_direction
    }

    fn wrong(game: &Game<StdRng>) -> Direction {
        let right = correct(game);
        Direction::ALL.into_iter().find(|&d| d != right).unwrap()
    }

    #[test]
    fn new_game_starts_with_initial_batch() {
        let game = new_game(1);
        assert_eq!(game.queue_len(), 10);
        assert!(game.current_challenge().is_some());
        assert_eq!(game.score(), 0);
        assert_eq!(game.feedback(), INITIAL_FEEDBACK);
    }

    #[test]
    fn correct_swipe_scores_target() {
        let mut game = new_game(2);
        let target = game.current_challenge().unwrap().target.id.clone();

        let outcome = game.swipe(correct(&game)).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.challenge.target.id, target);
        assert_eq!(game.score(), 1);
        assert_eq!(game.streak(), 1);
        assert_eq!(game.best_streak(), 1);
        assert_eq!(
            game.session().stats_for(&target),
            SwipeStats {
                correct: 1,
                incorrect: 0
            }
        );
    }

    #[test]
    fn miss_sets_feedback_and_breaks_streak() {
        let mut game = new_game(3);
        game.swipe(correct(&game));
        game.swipe(correct(&game));
        let outcome = game.swipe(wrong(&game)).unwrap();

        assert!(!outcome.correct);
        assert_eq!(game.score(), 2);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.best_streak(), 2);
        assert_eq!(game.feedback(), MISS_FEEDBACK);
    }

    #[test]
    fn fifth_match_requests_commentary_once() {
        let mut game = new_game(4);
        for _ in 0..4 {
            let outcome = game.swipe(correct(&game)).unwrap();
            assert!(outcome.commentary.is_none());
        }
        assert_eq!((game.score(), game.streak(), game.best_streak()), (4, 4, 4));

        let outcome = game.swipe(correct(&game)).unwrap();
        let request = outcome.commentary.expect("5th match asks for commentary");
        assert_eq!(
            request.snapshot,
            ScoreSnapshot {
                score: 5,
                streak: 5,
                best_streak: 5
            }
        );

        let outcome = game.swipe(correct(&game)).unwrap();
        assert!(outcome.commentary.is_none());
    }

    #[test]
    fn misses_never_request_commentary() {
        let mut game = new_game(5);
        for _ in 0..4 {
            game.swipe(correct(&game));
        }
        let outcome = game.swipe(wrong(&game)).unwrap();
        assert!(outcome.commentary.is_none());
    }

    #[test]
    fn queue_of_four_refills_to_thirteen() {
        let mut game = new_game(6);
        // 10 → 4 without crossing the low-water check (it fires below 5)
        for _ in 0..6 {
            let outcome = game.swipe(correct(&game)).unwrap();
            assert_eq!(outcome.refilled, 0);
        }
        assert_eq!(game.queue_len(), 4);

        let outcome = game.swipe(correct(&game)).unwrap();
        assert_eq!(outcome.refilled, 10);
        assert_eq!(game.queue_len(), 13);
    }

    #[test]
    fn long_session_never_runs_dry() {
        let mut game = new_game(7);
        for i in 0..300 {
            let direction = if i % 3 == 0 { wrong(&game) } else { correct(&game) };
            assert!(game.swipe(direction).is_some());
        }
        assert!(game.queue_len() >= 4);
    }

    #[test]
    fn swipe_on_empty_queue_is_noop() {
        let config = GameConfig {
            initial_batch: 0,
            ..Default::default()
        };
        let mut game = Game::new(Arc::new(Catalog::standard()), config, StdRng::seed_from_u64(8));

        assert!(game.current_challenge().is_none());
        assert!(game.swipe(Direction::Up).is_none());
        assert_eq!(game.session(), &SessionState::default());
    }

    #[test]
    fn reset_keeps_best_streak_and_queue() {
        let mut game = new_game(9);
        for _ in 0..3 {
            game.swipe(correct(&game));
        }
        game.swipe(wrong(&game));
        let queued = game.queue_len();

        game.reset_stats();
        assert_eq!(game.score(), 0);
        assert_eq!(game.streak(), 0);
        assert_eq!(game.best_streak(), 3);
        assert!(game.session().stats.values().all(|s| s.total() == 0));
        assert_eq!(game.queue_len(), queued);
        assert_eq!(game.feedback(), MISS_FEEDBACK);
    }

    #[test]
    fn commentary_applies_when_fresh() {
        let mut game = new_game(10);
        let mut request = None;
        for _ in 0..5 {
            request = game.swipe(correct(&game)).unwrap().commentary.or(request);
        }
        let request = request.unwrap();

        assert!(game.apply_commentary(request.ticket, "Sharp eyes!"));
        assert_eq!(game.feedback(), "Sharp eyes!");
    }

    #[test]
    fn stale_commentary_is_dropped() {
        let mut game = new_game(11);
        let mut request = None;
        for _ in 0..5 {
            request = game.swipe(correct(&game)).unwrap().commentary.or(request);
        }
        let request = request.unwrap();

        // a miss lands before the reply does
        game.swipe(wrong(&game));
        assert!(!game.apply_commentary(request.ticket, "Sharp eyes!"));
        assert_eq!(game.feedback(), MISS_FEEDBACK);
    }

    #[test]
    fn stats_totals_match_resolved_targets() {
        let mut game = new_game(12);
        let mut resolved = std::collections::BTreeMap::<String, u32>::new();
        for i in 0..60 {
            let direction = if i % 4 == 0 { wrong(&game) } else { correct(&game) };
            let outcome = game.swipe(direction).unwrap();
            *resolved.entry(outcome.challenge.target.id).or_default() += 1;
        }
        for (id, count) in resolved {
            assert_eq!(game.session().stats_for(&id).total(), count, "{id}");
        }
    }

    #[test]
    fn summary_reflects_session() {
        let mut game = new_game(13);
        game.swipe(correct(&game));
        game.swipe(wrong(&game));

        let summary = game.summary();
        assert_eq!(summary.total_correct, 1);
        assert_eq!(summary.total_incorrect, 1);
        assert_eq!(summary.accuracy, 50);
    }
}
