pub mod config;
pub mod database;
pub mod export;
pub mod models;
pub mod scheduler;

pub use database::{ProgressStore, StoreError};
pub use models::{LearningSession, ReviewCard, SessionSummary, UserProgress};
