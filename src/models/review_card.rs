//! Scheduling record kept for every learnable item (question, sequence or session).
use serde::{Deserialize, Serialize};

/// Ease factor given to a card that has never been reviewed.
pub const INITIAL_EASE_FACTOR: f64 = 2.5;
/// Ease factor never drops below this value.
pub const MIN_EASE_FACTOR: f64 = 1.3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCard {
    #[serde(alias = "questionId")]
    pub item_id: String,
    pub ease_factor: f64,
    /// Days until the next review, 0 means due immediately.
    pub interval: u32,
    pub repetitions: u32,
    /// Epoch milliseconds at which the card becomes due.
    pub next_review: i64,
    /// Raw score of the latest answer, kept for display.
    pub last_score: i32,
}

impl ReviewCard {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            repetitions: 0,
            next_review: 0,
            last_score: 0,
        }
    }

    pub fn is_due(&self, now_ms: i64) -> bool {
        self.next_review <= now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_card_defaults() {
        let card = ReviewCard::new("pick-and-roll-1");

        assert_eq!(card.item_id, "pick-and-roll-1");
        assert_eq!(card.ease_factor, 2.5);
        assert_eq!(card.interval, 0);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.next_review, 0);
        assert_eq!(card.last_score, 0);
        assert!(card.is_due(0));
    }

    #[test]
    fn test_is_due_boundary() {
        let mut card = ReviewCard::new("q1");
        card.next_review = 1_000;

        assert!(!card.is_due(999));
        assert!(card.is_due(1_000));
        assert!(card.is_due(1_001));
    }

    #[test]
    fn test_accepts_legacy_question_id_key() {
        let json = r#"{
  "questionId": "zone-1",
  "easeFactor": 2.36,
  "interval": 1,
  "repetitions": 1,
  "nextReview": 1700000000000,
  "lastScore": 50
}"#;

        let card: ReviewCard = serde_json::from_str(json).unwrap();
        assert_eq!(card.item_id, "zone-1");
        assert_eq!(card.last_score, 50);

        let written = serde_json::to_string(&card).unwrap();
        assert!(written.contains("\"itemId\":\"zone-1\""));
    }
}
