//! Flavor commentary: a short encouraging line every few matches.
//!
//! Providers may be slow or broken. [`request_encouragement`] bounds the
//! wait and always hands back something printable, so the player never
//! sees an error from this module.

use std::io::{self, Read, Write};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;
use wait_timeout::ChildExt;

use crate::types::ScoreSnapshot;

/// Shown when a provider fails or runs out of time.
pub const FALLBACK_COMMENT: &str = "Focus on the colors! You got this!";

/// Shown when a provider answers with nothing.
pub const EMPTY_COMMENT: &str = "Keep swiping, you're doing great!";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("failed to run commentary command: {0}")]
    Spawn(#[source] io::Error),

    #[error("commentary command exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("commentary output is not UTF-8")]
    NotUtf8,

    #[error("commentary request encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("no reply within {0:?}")]
    TimedOut(Duration),

    #[error("commentary worker stopped without replying")]
    Disconnected,

    #[error("commentary output reader panicked")]
    ReaderPanicked,
}

// ============================================================================
// PROVIDERS
// ============================================================================

/// Something that can turn a score into a one-liner.
///
/// Called from a worker thread, so implementations must be `Send + Sync`.
pub trait Commentator: Send + Sync {
    fn encouragement(&self, snapshot: &ScoreSnapshot) -> Result<String, CommentaryError>;
}

/// Instructions handed to a text-generation backend.
pub fn build_prompt(snapshot: &ScoreSnapshot) -> String {
    format!(
        "You are an enthusiastic game commentator for a color swiping game called ChromaSwipe.\n\
         Current stats:\n\
         - Score: {}\n\
         - Current streak: {}\n\
         - Best streak: {}\n\
         \n\
         Write a very short, punchy, encouraging comment (max 10 words) to motivate the player.\n\
         Use a playful, high-energy tone. If they have a high streak, mention their focus.\n\
         If they just started, welcome them.",
        snapshot.score, snapshot.streak, snapshot.best_streak
    )
}

/// Offline commentator. Picks a canned line from the snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalCommentator;

impl Commentator for LocalCommentator {
    fn encouragement(&self, snapshot: &ScoreSnapshot) -> Result<String, CommentaryError> {
        let line = if snapshot.streak >= 15 {
            format!("{} in a row! Laser focus, swatch master!", snapshot.streak)
        } else if snapshot.streak >= 10 {
            "Double-digit streak! Your eyes are on fire!".to_string()
        } else if snapshot.score <= 5 {
            "Welcome to the boutique! Great first picks!".to_string()
        } else if snapshot.streak > 0 && snapshot.streak == snapshot.best_streak {
            format!("New personal best: {}! Keep it rolling!", snapshot.streak)
        } else {
            format!("{} matches and counting. Shade sniper!", snapshot.score)
        };
        Ok(line)
    }
}

/// Body written to a command provider's stdin.
#[derive(Debug, Serialize)]
struct CommandRequest<'a> {
    score: u32,
    streak: u32,
    best_streak: u32,
    prompt: &'a str,
}

/// Runs an external program (typically an LLM CLI) per request.
///
/// The program receives one JSON object on stdin
/// (`score`, `streak`, `best_streak`, `prompt`) and its trimmed stdout
/// becomes the comment. A program still running at `deadline` is killed
/// and reaped.
#[derive(Debug, Clone)]
pub struct CommandCommentator {
    pub program: String,
    pub args: Vec<String>,
    pub deadline: Duration,
}

/// Deadline used until [`CommandCommentator::with_deadline`] says otherwise.
pub const DEFAULT_COMMAND_DEADLINE: Duration = Duration::from_secs(4);

impl CommandCommentator {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            deadline: DEFAULT_COMMAND_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Drain a child pipe on its own thread.
fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_reader(handle: JoinHandle<io::Result<Vec<u8>>>) -> Result<Vec<u8>, CommentaryError> {
    handle
        .join()
        .map_err(|_| CommentaryError::ReaderPanicked)?
        .map_err(CommentaryError::Spawn)
}

/// Kill a child that overran its deadline and collect its exit status.
fn kill_and_reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        debug!("commentary kill: {}", e);
    }
    if let Err(e) = child.wait() {
        debug!("commentary reap: {}", e);
    }
}

impl Commentator for CommandCommentator {
    fn encouragement(&self, snapshot: &ScoreSnapshot) -> Result<String, CommentaryError> {
        let prompt = build_prompt(snapshot);
        let body = serde_json::to_vec(&CommandRequest {
            score: snapshot.score,
            streak: snapshot.streak,
            best_streak: snapshot.best_streak,
            prompt: &prompt,
        })?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(CommentaryError::Spawn)?;

        // pipes drain concurrently with the stdin write
        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        if let Some(mut stdin) = child.stdin.take() {
            thread::spawn(move || {
                // A program that ignores stdin may close it early; its
                // stdout still decides the outcome.
                if let Err(e) = stdin.write_all(&body) {
                    debug!("commentary stdin write: {}", e);
                }
            });
        }

        let status = match child.wait_timeout(self.deadline) {
            Ok(Some(status)) => status,
            Ok(None) => {
                kill_and_reap(&mut child);
                return Err(CommentaryError::TimedOut(self.deadline));
            }
            Err(e) => {
                kill_and_reap(&mut child);
                return Err(CommentaryError::Spawn(e));
            }
        };

        let stdout = join_reader(stdout)?;
        let stderr = join_reader(stderr)?;

        if !status.success() {
            return Err(CommentaryError::Failed {
                status: status.to_string(),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(stdout).map_err(|_| CommentaryError::NotUtf8)?;
        Ok(text.trim().to_string())
    }
}

// ============================================================================
// BOUNDED REQUESTS
// ============================================================================

/// Ask `provider` for a comment, waiting at most `timeout`.
///
/// The provider runs on its own thread; if it overruns, the thread is
/// left to finish in the background and its answer is dropped.
pub fn fetch_with_timeout(
    provider: Arc<dyn Commentator>,
    snapshot: ScoreSnapshot,
    timeout: Duration,
) -> Result<String, CommentaryError> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        // receiver may be gone after a timeout
        let _ = tx.send(provider.encouragement(&snapshot));
    });

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(mpsc::RecvTimeoutError::Timeout) => Err(CommentaryError::TimedOut(timeout)),
        Err(mpsc::RecvTimeoutError::Disconnected) => Err(CommentaryError::Disconnected),
    }
}

/// Like [`fetch_with_timeout`], but never fails: errors and timeouts
/// become [`FALLBACK_COMMENT`], blank answers become [`EMPTY_COMMENT`].
pub fn request_encouragement(
    provider: Arc<dyn Commentator>,
    snapshot: ScoreSnapshot,
    timeout: Duration,
) -> String {
    match fetch_with_timeout(provider, snapshot, timeout) {
        Ok(text) if text.trim().is_empty() => EMPTY_COMMENT.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("commentary unavailable: {}", e);
            FALLBACK_COMMENT.to_string()
        }
    }
}

/// Whether a correct swipe that brought the score to `score` should ask
/// for commentary. `every == 0` turns requests off.
pub fn is_commentary_due(score: u32, every: u32) -> bool {
    every != 0 && score != 0 && score % every == 0
}

// ============================================================================
// TESTS
// ============================================================================
