// src/progress.rs

use crate::constants::*;
use crate::database;
use crate::models::{ChallengeProgress, LessonProgress, ProgressState};
use crate::repository;
use chrono::{Local, NaiveDate, Utc};
use log::{debug, info, warn};
use rusqlite::Connection;

/// Owns the learner's progress for one running app instance.
///
/// Every mutation writes the whole state back under [`STORAGE_KEY`].
/// Storage failures are logged and swallowed: the in-memory state stays
/// authoritative for the session.
pub struct ProgressStore {
    conn: Connection,
    state: ProgressState,
}

impl ProgressStore {
    /// Loads saved progress and records today's visit using the local calendar.
    pub fn open(conn: Connection) -> Self {
        Self::open_at(conn, Local::now().date_naive())
    }

    pub fn open_at(conn: Connection, today: NaiveDate) -> Self {
        if let Err(e) = database::init_db(&conn) {
            warn!("Progress storage unavailable, continuing in memory: {}", e);
        }
        let state = load_state(&conn);
        let mut store = ProgressStore { conn, state };
        store.record_visit(today);
        store
    }

    // --- Mutations ---

    pub fn complete_lesson(&mut self, lesson_id: &str, score: Option<f64>) {
        let is_new = !self
            .state
            .lessons
            .get(lesson_id)
            .is_some_and(|l| l.completed);

        self.state.lessons.insert(
            lesson_id.to_string(),
            LessonProgress {
                completed: true,
                score,
                completed_at: Some(Utc::now()),
            },
        );

        if is_new {
            self.state.total_points = self.state.total_points.saturating_add(LESSON_POINTS);
            info!(
                "Lesson {} completed: +{} points (total {})",
                lesson_id, LESSON_POINTS, self.state.total_points
            );
        } else {
            debug!("Lesson {} re-completed, no points awarded", lesson_id);
        }
        self.persist();
    }

    pub fn start_challenge(&mut self, challenge_id: &str) {
        self.state
            .challenges
            .entry(challenge_id.to_string())
            .or_default()
            .started = true;
        debug!("Challenge {} started", challenge_id);
        self.persist();
    }

    pub fn complete_challenge(&mut self, challenge_id: &str) {
        let is_new = !self
            .state
            .challenges
            .get(challenge_id)
            .is_some_and(|c| c.completed);

        self.state.challenges.insert(
            challenge_id.to_string(),
            ChallengeProgress {
                started: true,
                completed: true,
                submitted_at: Some(Utc::now()),
            },
        );

        if is_new {
            self.state.total_points = self.state.total_points.saturating_add(CHALLENGE_POINTS);
            info!(
                "Challenge {} completed: +{} points (total {})",
                challenge_id, CHALLENGE_POINTS, self.state.total_points
            );
        } else {
            debug!("Challenge {} re-submitted, no points awarded", challenge_id);
        }
        self.persist();
    }

    /// Adds practice minutes. Negative or non-finite input, or input that
    /// would push the total past the largest finite value, is rejected and
    /// leaves the state untouched.
    pub fn add_simulator_time(&mut self, minutes: f64) -> Result<(), String> {
        if !minutes.is_finite() || minutes < 0.0 {
            return Err(format!(
                "practice time must be a non-negative number of minutes, got {}",
                minutes
            ));
        }
        let total = self.state.simulator_practice_time + minutes;
        if !total.is_finite() {
            return Err(format!(
                "practice time total would overflow: {} + {}",
                self.state.simulator_practice_time, minutes
            ));
        }
        self.state.simulator_practice_time = total;
        debug!(
            "Simulator practice +{:.1} min (total {:.1})",
            minutes, self.state.simulator_practice_time
        );
        self.persist();
        Ok(())
    }

    /// Clears everything, including the saved blob.
    pub fn reset_progress(&mut self) {
        self.state = ProgressState::default();
        if let Err(e) = repository::delete_blob(&self.conn, STORAGE_KEY) {
            warn!("Failed to erase saved progress: {}", e);
        }
        info!("Progress reset");
    }

    // --- Queries ---

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn get_lesson_progress(&self, lesson_id: &str) -> Option<&LessonProgress> {
        self.state.lessons.get(lesson_id)
    }

    pub fn get_challenge_progress(&self, challenge_id: &str) -> Option<&ChallengeProgress> {
        self.state.challenges.get(challenge_id)
    }

    pub fn get_completed_lessons_count(&self) -> usize {
        self.state.lessons.values().filter(|l| l.completed).count()
    }

    pub fn get_completed_challenges_count(&self) -> usize {
        self.state.challenges.values().filter(|c| c.completed).count()
    }

    /// Size of the lesson catalog, not of the progress map.
    pub fn get_total_lessons_count(&self) -> usize {
        TOTAL_LESSONS
    }

    /// Completed lessons as a rounded percentage of the catalog.
    pub fn get_overall_progress(&self) -> u32 {
        let completed = self.get_completed_lessons_count() as f64;
        let ratio = completed / self.get_total_lessons_count() as f64;
        (ratio * 100.0).round().clamp(0.0, 100.0) as u32
    }

    pub fn total_points(&self) -> u64 {
        self.state.total_points
    }

    pub fn streak(&self) -> u32 {
        self.state.streak
    }

    pub fn simulator_practice_time(&self) -> f64 {
        self.state.simulator_practice_time
    }

    // --- Lifecycle ---

    /// Writes the current state out again.
    pub fn flush(&self) {
        self.persist();
    }

    /// Flushes and hands the connection back, ending this store's lifetime.
    pub fn into_connection(self) -> Connection {
        self.persist();
        self.conn
    }

    // --- Internal ---

    fn record_visit(&mut self, today: NaiveDate) {
        let old_streak = self.state.streak;
        self.state.streak = next_streak(self.state.last_visit, self.state.streak, today);
        self.state.last_visit = Some(today);
        info!(
            "Visit recorded for {}: streak {} -> {}",
            today, old_streak, self.state.streak
        );
        self.persist();
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.state) {
            Ok(b) => b,
            Err(e) => {
                warn!("Failed to serialize progress: {}", e);
                return;
            }
        };
        if let Err(e) = repository::put_blob(&self.conn, STORAGE_KEY, &blob) {
            warn!("Failed to save progress, keeping it in memory only: {}", e);
        }
    }
}

/// Reads the saved blob. Anything missing or malformed yields the empty state.
fn load_state(conn: &Connection) -> ProgressState {
    match repository::get_blob(conn, STORAGE_KEY) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Saved progress is malformed, starting fresh: {}", e);
            ProgressState::default()
        }),
        Ok(None) => {
            info!("No saved progress found, starting fresh");
            ProgressState::default()
        }
        Err(e) => {
            warn!("Failed to read saved progress, starting fresh: {}", e);
            ProgressState::default()
        }
    }
}

/// Calendar-day streak rule: same day keeps it, yesterday extends it,
/// anything else (first visit, a gap, a future date) starts over at 1.
fn next_streak(last_visit: Option<NaiveDate>, streak: u32, today: NaiveDate) -> u32 {
    match last_visit {
        Some(last) if last == today => streak.max(1),
        Some(last) if Some(last) == today.pred_opt() => streak.saturating_add(1),
        _ => 1,
    }
}
