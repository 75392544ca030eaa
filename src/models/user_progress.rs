//! Aggregate learning state of one user on one device.
use super::ReviewCard;
use super::review_card::MIN_EASE_FACTOR;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    pub cards: HashMap<String, ReviewCard>,
    pub total_answered: u64,
    pub total_correct: u64,
    pub streak_days: u32,
    /// Local calendar day (YYYY-MM-DD) of the latest answer, empty before the first one.
    pub last_study_date: String,
}

impl UserProgress {
    pub fn card(&self, item_id: &str) -> Option<&ReviewCard> {
        self.cards.get(item_id)
    }

    /// Existing card for `item_id`, or a fresh one if the item was never answered.
    pub fn get_or_create(&self, item_id: &str) -> ReviewCard {
        self.card(item_id)
            .cloned()
            .unwrap_or_else(|| ReviewCard::new(item_id))
    }

    /// Share of fully correct answers as a rounded percentage.
    pub fn accuracy(&self) -> u32 {
        if self.total_answered == 0 {
            return 0;
        }
        (self.total_correct as f64 / self.total_answered as f64 * 100.0).round() as u32
    }

    /// Checks the invariants a loaded snapshot must satisfy.
    pub fn validate(&self) -> Result<(), String> {
        if self.total_correct > self.total_answered {
            return Err(format!(
                "total_correct ({}) exceeds total_answered ({})",
                self.total_correct, self.total_answered
            ));
        }
        for (key, card) in &self.cards {
            if key != &card.item_id {
                return Err(format!(
                    "card stored under '{}' belongs to '{}'",
                    key, card.item_id
                ));
            }
            if card.ease_factor.is_nan() || card.ease_factor < MIN_EASE_FACTOR {
                return Err(format!(
                    "card '{}' has ease factor {} below {}",
                    key, card.ease_factor, MIN_EASE_FACTOR
                ));
            }
        }
        Ok(())
    }
}
