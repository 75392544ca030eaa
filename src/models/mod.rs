pub mod learning_session;
pub mod review_card;
pub mod sm2;
pub mod user_progress;

pub use learning_session::{LearningSession, SessionSummary, build_queue};
pub use review_card::ReviewCard;
pub use sm2::Quality;
pub use user_progress::UserProgress;
