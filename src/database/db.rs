//! SQLite store for progress snapshots
//!
//! One row per review card in `review_cards`, the aggregate counters as `progress.*`
//! entries of the `app_state` key/value table. A save replaces the whole snapshot inside
//! a single transaction.

use super::{ProgressStore, Result, StoreError, check_invariants};
use crate::models::{ReviewCard, UserProgress};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

const KEY_TOTAL_ANSWERED: &str = "progress.total_answered";
const KEY_TOTAL_CORRECT: &str = "progress.total_correct";
const KEY_STREAK_DAYS: &str = "progress.streak_days";
const KEY_LAST_STUDY_DATE: &str = "progress.last_study_date";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) the database file and makes sure the tables exist
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        log::info!("Opened progress database '{}'", path.display());
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    pub fn with_connection(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn state_value(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn load_cards(&self) -> Result<Vec<ReviewCard>> {
        let mut stmt = self.conn.prepare(
            "SELECT item_id, ease_factor, interval_days, repetitions, next_review, last_score
             FROM review_cards",
        )?;

        let cards = stmt
            .query_map([], |row| {
                Ok(ReviewCard {
                    item_id: row.get(0)?,
                    ease_factor: row.get(1)?,
                    interval: row.get(2)?,
                    repetitions: row.get(3)?,
                    next_review: row.get(4)?,
                    last_score: row.get(5)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(cards)
    }
}

/// Creates the card and state tables if missing
fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS review_cards (
            item_id TEXT PRIMARY KEY,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            interval_days INTEGER NOT NULL DEFAULT 0,
            repetitions INTEGER NOT NULL DEFAULT 0,
            next_review INTEGER NOT NULL DEFAULT 0,
            last_score INTEGER NOT NULL DEFAULT 0
        );
        CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
}

fn parse_counter<T: std::str::FromStr>(key: &str, value: Option<String>) -> Result<T> {
    let value = value.ok_or_else(|| StoreError::CorruptState(format!("missing '{}'", key)))?;
    value
        .parse()
        .map_err(|_| StoreError::CorruptState(format!("'{}' is not a number: {:?}", key, value)))
}

impl ProgressStore for SqliteStore {
    fn try_load(&self) -> Result<Option<UserProgress>> {
        let total_answered = self.state_value(KEY_TOTAL_ANSWERED)?;
        let cards = self.load_cards()?;

        // Nothing saved yet
        if total_answered.is_none() && cards.is_empty() {
            return Ok(None);
        }

        let progress = UserProgress {
            cards: cards
                .into_iter()
                .map(|card| (card.item_id.clone(), card))
                .collect(),
            total_answered: parse_counter(KEY_TOTAL_ANSWERED, total_answered)?,
            total_correct: parse_counter(KEY_TOTAL_CORRECT, self.state_value(KEY_TOTAL_CORRECT)?)?,
            streak_days: parse_counter(KEY_STREAK_DAYS, self.state_value(KEY_STREAK_DAYS)?)?,
            last_study_date: self
                .state_value(KEY_LAST_STUDY_DATE)?
                .unwrap_or_default(),
        };

        check_invariants(progress).map(Some)
    }

    fn try_save(&self, progress: &UserProgress) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM review_cards", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO review_cards
                 (item_id, ease_factor, interval_days, repetitions, next_review, last_score)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for card in progress.cards.values() {
                stmt.execute(params![
                    card.item_id,
                    card.ease_factor,
                    card.interval,
                    card.repetitions,
                    card.next_review,
                    card.last_score
                ])?;
            }
        }

        let state = [
            (KEY_TOTAL_ANSWERED, progress.total_answered.to_string()),
            (KEY_TOTAL_CORRECT, progress.total_correct.to_string()),
            (KEY_STREAK_DAYS, progress.streak_days.to_string()),
            (KEY_LAST_STUDY_DATE, progress.last_study_date.clone()),
        ];
        for (key, value) in state {
            tx.execute(
                "INSERT INTO app_state (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
        }

        tx.commit()?;
        log::debug!("Saved progress ({} cards) to SQLite", progress.cards.len());
        Ok(())
    }
}
