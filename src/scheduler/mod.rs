//! Scheduling operations over a [`UserProgress`] snapshot.
//!
//! Everything here is a pure function of its inputs and the `now` it is handed: a new
//! snapshot is returned and persisting it is left to the caller.

pub mod due;
pub mod streak;

pub use due::{due_count, get_due_items};
pub use streak::{local_day, update_streak};

use crate::models::UserProgress;
use crate::models::sm2::{PERFECT_SCORE, update_card};
use chrono::{DateTime, Utc};

/// Records one answer and returns the resulting snapshot.
///
/// Unknown items get a fresh card. Only an exact score of 100 counts as correct, and the
/// streak is advanced using the local calendar day of `now`.
pub fn record_answer(
    progress: &UserProgress,
    item_id: &str,
    raw_score: i32,
    now: DateTime<Utc>,
) -> UserProgress {
    let card = progress.get_or_create(item_id);
    let updated_card = update_card(&card, raw_score, now);

    log::debug!(
        "{}: score {} -> interval {}d, ease {:.2}, repetitions {}",
        item_id,
        raw_score,
        updated_card.interval,
        updated_card.ease_factor,
        updated_card.repetitions
    );

    let mut updated = progress.clone();
    updated.cards.insert(item_id.to_string(), updated_card);
    updated.total_answered += 1;
    if raw_score == PERFECT_SCORE {
        updated.total_correct += 1;
    }

    update_streak(&updated, local_day(now))
}
