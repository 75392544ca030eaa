//! JSON encoding of progress snapshots, plus export/import of backup files.

use crate::database::{Result, check_invariants};
use crate::models::UserProgress;
use std::fs;
use std::path::Path;

pub fn to_json_string(progress: &UserProgress) -> Result<String> {
    Ok(serde_json::to_string_pretty(progress)?)
}

/// Parses a snapshot and checks its invariants.
pub fn from_json_str(contents: &str) -> Result<UserProgress> {
    let progress: UserProgress = serde_json::from_str(contents)?;
    check_invariants(progress)
}

/// Exports a progress snapshot to a JSON file at the specified path.
pub fn export_json_to_path(progress: &UserProgress, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json_string(progress)?)?;
    log::info!(
        "Exported progress ({} cards) to '{}'",
        progress.cards.len(),
        path.display()
    );
    Ok(())
}

/// Imports a progress snapshot from a JSON file.
/// Returns an error if the file doesn't exist or contains an invalid snapshot.
pub fn import_json(path: impl AsRef<Path>) -> Result<UserProgress> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let progress = from_json_str(&contents)?;

    log::info!(
        "Imported progress ({} cards) from '{}'",
        progress.cards.len(),
        path.display()
    );
    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::StoreError;
    use crate::models::ReviewCard;
    use tempfile::tempdir;

    fn create_test_progress() -> UserProgress {
        let mut progress = UserProgress {
            total_answered: 12,
            total_correct: 7,
            streak_days: 3,
            last_study_date: "2025-04-02".to_string(),
            ..UserProgress::default()
        };
        for (id, interval) in [("pick-and-roll", 3), ("zone-press", 0)] {
            let card = ReviewCard {
                interval,
                repetitions: if interval == 0 { 0 } else { 2 },
                next_review: 1_743_552_000_000 + interval as i64,
                last_score: if interval == 0 { 0 } else { 100 },
                ..ReviewCard::new(id)
            };
            progress.cards.insert(id.to_string(), card);
        }
        progress
    }

    #[test]
    fn test_export_json_to_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("backup.json");

        let result = export_json_to_path(&create_test_progress(), &path);
        assert!(result.is_ok());
        assert!(path.exists(), "File should exist");
    }

    #[test]
    fn test_import_web_app_format() {
        let json_content = r#"{
  "cards": {
    "q1": {
      "questionId": "q1",
      "easeFactor": 2.6,
      "interval": 1,
      "repetitions": 1,
      "nextReview": 1700000000000,
      "lastScore": 100
    }
  },
  "totalAnswered": 1,
  "totalCorrect": 1,
  "streakDays": 1,
  "lastStudyDate": "2023-11-14"
}"#;

        let dir = tempdir().unwrap();
        let path = dir.path().join("legacy.json");
        fs::write(&path, json_content).unwrap();

        let progress = import_json(&path).unwrap();
        assert_eq!(progress.total_answered, 1);
        assert_eq!(progress.streak_days, 1);
        assert_eq!(progress.card("q1").unwrap().item_id, "q1");
        assert_eq!(progress.card("q1").unwrap().next_review, 1_700_000_000_000);
    }

    #[test]
    fn test_export_and_import_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roundtrip.json");
        let original = create_test_progress();

        export_json_to_path(&original, &path).unwrap();
        let imported = import_json(&path).unwrap();

        assert_eq!(original, imported);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = tempdir().unwrap();
        let result = import_json(dir.path().join("nonexistent_file_xyz123.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.json");
        fs::write(&path, "{ this is not valid json }").unwrap();

        let result = import_json(&path);
        assert!(matches!(result, Err(StoreError::Json(_))));
    }

    #[test]
    fn test_import_rejects_broken_invariants() {
        let result = from_json_str(r#"{"totalAnswered": 1, "totalCorrect": 5}"#);
        assert!(matches!(result, Err(StoreError::CorruptState(_))));
    }
}
