//! SM-2 (SuperMemo 2) spaced repetition algorithm, adapted to three-level quiz scoring.
//!
//! Quiz answers are scored 0, 50 or 100 and mapped onto a fixed subset of the SM-2 grades:
//! - 100 => quality 5 (perfect)
//! - 50  => quality 3 (partial, lowest passing grade)
//! - 0   => quality 1 (fail)
//! - Passing reviews grow the interval 1 day → 3 days → previous interval × EF
//! - A failing review resets repetitions and makes the card due again immediately
//! - EF is adjusted after every review, failures included, and never falls below 1.3

use super::ReviewCard;
use super::review_card::MIN_EASE_FACTOR;
use chrono::{DateTime, Utc};

pub const MS_PER_DAY: i64 = 86_400_000;

/// Raw score that counts as a fully correct answer.
pub const PERFECT_SCORE: i32 = 100;
/// Lowest raw score that still passes.
pub const PARTIAL_SCORE: i32 = 50;

/// SM-2 quality grade derived from a raw quiz score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quality {
    Fail = 1,
    Partial = 3,
    Perfect = 5,
}

impl Quality {
    /// Quantizes a raw score: `>= 100` is perfect, `50..100` is partial, anything lower
    /// (negative values included) fails.
    pub fn from_score(raw_score: i32) -> Self {
        if raw_score >= PERFECT_SCORE {
            Quality::Perfect
        } else if raw_score >= PARTIAL_SCORE {
            Quality::Partial
        } else {
            Quality::Fail
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn is_pass(self) -> bool {
        self.value() >= 3
    }
}

/// Returns the card as it stands after answering with `raw_score` at `now`.
/// The input card is left untouched.
pub fn update_card(card: &ReviewCard, raw_score: i32, now: DateTime<Utc>) -> ReviewCard {
    let quality = Quality::from_score(raw_score);

    let (interval, repetitions) = if quality.is_pass() {
        let interval = match card.repetitions {
            0 => 1,
            1 => 3,
            // Uses the ease factor from before this review
            _ => (card.interval as f64 * card.ease_factor).round() as u32,
        };
        (interval, card.repetitions.saturating_add(1))
    } else {
        (0, 0)
    };

    let q = quality.value() as f64;
    let ease_factor =
        (card.ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02))).max(MIN_EASE_FACTOR);

    let next_review = now.timestamp_millis() + interval as i64 * MS_PER_DAY;

    ReviewCard {
        item_id: card.item_id.clone(),
        ease_factor,
        interval,
        repetitions,
        next_review,
        last_score: raw_score,
    }
}
