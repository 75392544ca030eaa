//! Quiz session management for spaced repetition practice.
//! Builds the question queue from the scheduler and persists every answer as it happens.

use super::UserProgress;
use super::sm2::PERFECT_SCORE;
use crate::database::ProgressStore;
use crate::scheduler::{get_due_items, record_answer};
use chrono::{DateTime, Utc};

/// Queue for a regular session: the due items, or the whole catalog when nothing is due.
pub fn build_queue<S: AsRef<str>>(
    progress: &UserProgress,
    all_item_ids: &[S],
    now: DateTime<Utc>,
) -> Vec<String> {
    let due = get_due_items(progress, all_item_ids, now);
    if due.is_empty() {
        all_item_ids.iter().map(|id| id.as_ref().to_string()).collect()
    } else {
        due
    }
}

/// Score totals shown once a session is over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub total_score: i64,
    pub max_score: i64,
    pub question_count: usize,
    pub correct_count: usize,
}

/// Walks through a queue of items, one answer at a time.
pub struct LearningSession<S: ProgressStore> {
    store: S,
    progress: UserProgress,
    queue: Vec<String>,
    current_index: usize,
    scores: Vec<i32>,
}

impl<S: ProgressStore> LearningSession<S> {
    /// Loads saved progress and queues whatever the scheduler considers due.
    pub fn start<I: AsRef<str>>(store: S, all_item_ids: &[I], now: DateTime<Utc>) -> Self {
        let progress = store.load();
        let queue = build_queue(&progress, all_item_ids, now);
        log::info!("Starting session with {} items", queue.len());
        Self::with_progress(store, progress, queue)
    }

    /// Session over an explicit queue, e.g. every item of one category.
    pub fn start_with_queue(store: S, queue: Vec<String>) -> Self {
        let progress = store.load();
        Self::with_progress(store, progress, queue)
    }

    fn with_progress(store: S, progress: UserProgress, queue: Vec<String>) -> Self {
        Self {
            store,
            progress,
            queue,
            current_index: 0,
            scores: Vec::new(),
        }
    }

    pub fn current_item(&self) -> Option<&str> {
        self.queue.get(self.current_index).map(String::as_str)
    }

    /// Records an answer for the current item and saves the new snapshot.
    /// Returns false when the session has no current item.
    pub fn answer(&mut self, raw_score: i32, now: DateTime<Utc>) -> bool {
        let Some(item_id) = self.queue.get(self.current_index) else {
            return false;
        };

        self.progress = record_answer(&self.progress, item_id, raw_score, now);
        self.store.save(&self.progress);
        self.scores.push(raw_score);
        true
    }

    pub fn next_item(&mut self) {
        if self.current_index < self.queue.len() {
            self.current_index += 1;
        }
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.queue.len()
    }

    /// Replays the same queue from the start with a clean score sheet.
    pub fn retry(&mut self) {
        self.current_index = 0;
        self.scores.clear();
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    pub fn position_message(&self) -> String {
        format!(
            "Question {} of {}",
            (self.current_index + 1).min(self.queue.len()),
            self.queue.len()
        )
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            total_score: self.scores.iter().map(|&s| s as i64).sum(),
            max_score: self.queue.len() as i64 * PERFECT_SCORE as i64,
            question_count: self.queue.len(),
            correct_count: self.scores.iter().filter(|&&s| s == PERFECT_SCORE).count(),
        }
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
