//! Due-item selection and ordering.
use crate::models::UserProgress;
use chrono::{DateTime, Utc};

/// Returns the items that should be reviewed now, highest priority first.
///
/// Items without a card come first, followed by due cards ordered by `next_review`
/// (most overdue first). Cards scheduled after `now` are left out. Ties keep the order
/// of `all_item_ids`.
pub fn get_due_items<S: AsRef<str>>(
    progress: &UserProgress,
    all_item_ids: &[S],
    now: DateTime<Utc>,
) -> Vec<String> {
    let now_ms = now.timestamp_millis();

    let mut due: Vec<(i64, &str)> = all_item_ids
        .iter()
        .map(|id| id.as_ref())
        .filter_map(|id| match progress.card(id) {
            None => Some((0, id)),
            Some(card) if card.is_due(now_ms) => Some((card.next_review, id)),
            Some(_) => None,
        })
        .collect();

    // Stable sort
    due.sort_by_key(|&(priority, _)| priority);
    due.into_iter().map(|(_, id)| id.to_string()).collect()
}

pub fn due_count<S: AsRef<str>>(
    progress: &UserProgress,
    all_item_ids: &[S],
    now: DateTime<Utc>,
) -> usize {
    let now_ms = now.timestamp_millis();
    all_item_ids
        .iter()
        .filter(|id| progress.card(id.as_ref()).is_none_or(|card| card.is_due(now_ms)))
        .count()
}
