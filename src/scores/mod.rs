//! Score records as they travel between the game client, the score server,
//! and the database
mod client;
#[cfg(test)]
pub(crate) use self::client::SubmitError;
pub(crate) use self::client::{HttpScoreSink, PendingSave, ScoreClient, ScoreSink};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A finished game's result, as submitted by the client
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct NewScore {
    pub(crate) name: String,
    pub(crate) score: i32,
}

/// A row of the `scores` table
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, sqlx::FromRow)]
pub(crate) struct ScoreRecord {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) score: i32,
    pub(crate) created_at: NaiveDateTime,
}

/// Body of every failed response from the score server
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct ErrorBody {
    pub(crate) error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn record_json_shape() {
        let record = ScoreRecord {
            id: 3,
            name: String::from("Alice"),
            score: 7,
            created_at: NaiveDate::from_ymd_opt(2026, 10, 18)
                .and_then(|d| d.and_hms_milli_opt(12, 34, 56, 789))
                .unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "id": 3,
                "name": "Alice",
                "score": 7,
                "created_at": "2026-10-18T12:34:56.789",
            })
        );
    }

    #[test]
    fn new_score_requires_score() {
        assert!(serde_json::from_str::<NewScore>(r#"{"name": "Alice"}"#).is_err());
        assert!(serde_json::from_str::<NewScore>(r#"{"name": "Alice", "score": null}"#).is_err());
        assert_eq!(
            serde_json::from_str::<NewScore>(r#"{"name": "", "score": -4}"#).unwrap(),
            NewScore {
                name: String::new(),
                score: -4
            }
        );
    }
}
