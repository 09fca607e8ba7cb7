//! Game-engine state for the heart-catch mini-game.
//!
//! Everything here is plain Rust with no browser dependency: the view layer
//! in `app` drives a [`Session`] from its timer and click callbacks, and the
//! native test suite drives it directly under `cargo test`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Seconds on the clock when a session starts.
pub const SESSION_SECONDS: i32 = 10;
/// Period of the heart spawn interval in milliseconds.
pub const SPAWN_PERIOD_MS: u32 = 500;
/// Period of the countdown interval in milliseconds.
pub const COUNTDOWN_PERIOD_MS: u32 = 1_000;
/// One-shot deadline after which no new hearts spawn.
pub const SPAWN_DEADLINE_MS: u32 = 10_000;
/// How long the playing view lingers after the spawn deadline before teardown.
pub const LINGER_MS: u32 = 2_000;

/// Horizontal placement band for falling hearts, percent of viewport width.
pub const HEART_LEFT_MIN_PCT: f64 = 10.0;
pub const HEART_LEFT_MAX_PCT: f64 = 90.0;
/// Fall-duration band in seconds.
pub const HEART_FALL_MIN_SECS: f64 = 1.0;
pub const HEART_FALL_MAX_SECS: f64 = 3.0;

/// Which region of the view is live. A tagged state instead of independent
/// flags, so stale combinations (e.g. "game over" with a live spawn timer)
/// are unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Greeting screen with the float layer and start button.
    Idle,
    /// Countdown running, hearts falling.
    Playing,
    /// Final-score overlay awaiting dismissal.
    GameOver,
}

/// A falling, clickable heart. `id` is unique within its session.
#[derive(Clone, Debug, PartialEq)]
pub struct Heart {
    pub id: u64,
    pub left_pct: f64,
    pub fall_secs: f64,
}

/// One timed game session: countdown clock, spawned hearts, score.
///
/// Heart ids come from a monotonic per-session counter, so two hearts can
/// never collide no matter how quickly they spawn. Placement and fall speed
/// are sampled from a seeded PCG stream; the same seed reproduces the same
/// spawn sequence.
pub struct Session {
    score: u32,
    time_left: i32,
    hearts: Vec<Heart>,
    next_heart_id: u64,
    rng: Pcg32,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Self {
            score: 0,
            time_left: SESSION_SECONDS,
            hearts: Vec::new(),
            next_heart_id: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> i32 {
        self.time_left
    }

    /// Hearts currently on screen. Entries leave this list only through
    /// [`Session::catch_heart`] or by the session being dropped — a heart
    /// that falls past the viewport uncaught simply stays until teardown.
    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    /// Add one heart with a fresh id, a uniform horizontal position in
    /// [10, 90] percent and a uniform fall duration in [1, 3] seconds.
    /// Returns a copy for the caller to render.
    pub fn spawn_heart(&mut self) -> Heart {
        let heart = Heart {
            id: self.next_heart_id,
            left_pct: self
                .rng
                .random_range(HEART_LEFT_MIN_PCT..=HEART_LEFT_MAX_PCT),
            fall_secs: self
                .rng
                .random_range(HEART_FALL_MIN_SECS..=HEART_FALL_MAX_SECS),
        };
        self.next_heart_id += 1;
        self.hearts.push(heart.clone());
        heart
    }

    /// Advance the countdown by one second. Returns `true` exactly once, on
    /// the tick that brings the clock to zero; once there, further calls are
    /// no-ops and the clock never goes negative.
    pub fn tick_second(&mut self) -> bool {
        if self.time_left <= 0 {
            return false;
        }
        self.time_left -= 1;
        self.time_left == 0
    }

    /// Collect the heart with `id`: score +1 and the heart is removed.
    /// Unknown (already-caught) ids are a no-op, so a double click on the
    /// same heart can never double count. Returns whether a heart was caught.
    pub fn catch_heart(&mut self, id: u64) -> bool {
        let before = self.hearts.len();
        self.hearts.retain(|h| h.id != id);
        if self.hearts.len() == before {
            return false;
        }
        self.score += 1;
        true
    }
}
