//! SQLite backend for the card store
//!
//! The card collection lives as one JSON blob in the `app_state` key-value table,
//! under a namespace key. Review history goes to its own `review_log` table.

use crate::models::{Card, Grade, ReviewRecord};
use crate::store::{CardStore, Result};
use log::info;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

pub struct SqliteStore {
    conn: Connection,
    namespace: String,
}

impl SqliteStore {
    /// Opens (or creates) the database file and its tables.
    pub fn open(path: impl AsRef<Path>, namespace: &str) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        info!(
            "opened card store at {} (namespace '{}')",
            path.as_ref().display(),
            namespace
        );
        Self::with_connection(conn, namespace)
    }

    /// Private in-memory database, gone when the store is dropped.
    pub fn open_in_memory(namespace: &str) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, namespace)
    }

    fn with_connection(conn: Connection, namespace: &str) -> Result<Self> {
        init_database(&conn)?;
        Ok(Self {
            conn,
            namespace: namespace.to_string(),
        })
    }
}

/// Creates the key-value table and the review log if missing
fn init_database(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS review_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            namespace TEXT NOT NULL,
            card_id TEXT NOT NULL,
            grade TEXT NOT NULL,
            reviewed_at INTEGER NOT NULL,
            box_after INTEGER NOT NULL,
            interval_after INTEGER NOT NULL
        )",
        (),
    )?;

    Ok(())
}

impl CardStore for SqliteStore {
    fn load(&self) -> Result<Option<Vec<Card>>> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1",
                params![self.namespace],
                |row| row.get(0),
            )
            .optional()?;

        match blob {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, cards: &[Card]) -> Result<()> {
        write_cards(&self.conn, &self.namespace, cards)
    }

    fn load_reviews(&self) -> Result<Vec<ReviewRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT card_id, grade, reviewed_at, box_after, interval_after
             FROM review_log
             WHERE namespace = ?1
             ORDER BY id ASC",
        )?;

        let reviews = stmt
            .query_map(params![self.namespace], |row| {
                let grade: String = row.get(1)?;
                let grade = grade.parse::<Grade>().map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.to_string().into())
                })?;
                Ok(ReviewRecord {
                    card_id: row.get(0)?,
                    grade,
                    reviewed_at: row.get(2)?,
                    box_after: row.get(3)?,
                    interval_after: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(reviews)
    }

    fn append_review(&mut self, review: &ReviewRecord) -> Result<()> {
        insert_review(&self.conn, &self.namespace, review)
    }

    /// Writes the collection and the log entry in one transaction.
    fn commit_review(&mut self, cards: &[Card], review: &ReviewRecord) -> Result<()> {
        let tx = self.conn.transaction()?;
        write_cards(&tx, &self.namespace, cards)?;
        insert_review(&tx, &self.namespace, review)?;
        tx.commit()?;
        Ok(())
    }
}

/// Upserts the collection blob under `namespace`
fn write_cards(conn: &Connection, namespace: &str, cards: &[Card]) -> Result<()> {
    let json = serde_json::to_string(cards)?;
    conn.execute(
        "INSERT INTO app_state (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        params![namespace, json],
    )?;
    Ok(())
}

fn insert_review(conn: &Connection, namespace: &str, review: &ReviewRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO review_log (namespace, card_id, grade, reviewed_at, box_after, interval_after)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            namespace,
            review.card_id,
            review.grade.as_str(),
            review.reviewed_at,
            review.box_after,
            review.interval_after
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::Timestamp;

    const T: Timestamp = 1_704_888_000_123;

    fn sample_cards() -> Vec<Card> {
        let mut reviewed = Card::new("c2", "d1", "dziękuję", "thank you", T);
        reviewed.leitner_box = 3;
        reviewed.interval = 7;
        reviewed.due_date = T + 7 * crate::models::DAY_MS;
        reviewed.last_reviewed = T;
        reviewed.ease_factor = 2.5 - (0.1 + 0.2);
        vec![Card::new("c1", "d1", "cześć", "hello", T), reviewed]
    }

    #[test]
    fn test_fresh_database_has_no_cards() {
        let store = SqliteStore::open_in_memory("srs_cards").unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(store.load_reviews().unwrap().is_empty());
    }

    #[test]
    fn test_save_load_roundtrip_is_exact() {
        let mut store = SqliteStore::open_in_memory("srs_cards").unwrap();
        let cards = sample_cards();
        store.save(&cards).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, cards);
        assert_eq!(
            loaded[1].ease_factor.to_bits(),
            cards[1].ease_factor.to_bits()
        );
    }

    #[test]
    fn test_save_overwrites_previous_collection() {
        let mut store = SqliteStore::open_in_memory("srs_cards").unwrap();
        store.save(&sample_cards()).unwrap();
        let single = vec![Card::new("c9", "d2", "a", "b", 0)];
        store.save(&single).unwrap();

        assert_eq!(store.load().unwrap().unwrap(), single);
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.sqlite3");

        let mut a = SqliteStore::open(&path, "deck_a").unwrap();
        a.save(&sample_cards()).unwrap();

        let b = SqliteStore::open(&path, "deck_b").unwrap();
        assert!(b.load().unwrap().is_none());
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.sqlite3");
        let cards = sample_cards();
        let review = ReviewRecord {
            card_id: "c2".to_string(),
            grade: Grade::Easy,
            reviewed_at: T,
            box_after: 3,
            interval_after: 7,
        };

        {
            let mut store = SqliteStore::open(&path, "srs_cards").unwrap();
            store.save(&cards).unwrap();
            store.append_review(&review).unwrap();
        }

        let store = SqliteStore::open(&path, "srs_cards").unwrap();
        assert_eq!(store.load().unwrap().unwrap(), cards);
        assert_eq!(store.load_reviews().unwrap(), vec![review]);
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let store = SqliteStore::open_in_memory("srs_cards").unwrap();
        store
            .conn
            .execute(
                "INSERT INTO app_state (key, value) VALUES ('srs_cards', 'not json')",
                (),
            )
            .unwrap();

        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_failed_commit_leaves_cards_unchanged() {
        let mut store = SqliteStore::open_in_memory("srs_cards").unwrap();
        let cards = sample_cards();
        store.save(&cards).unwrap();
        store.conn.execute("DROP TABLE review_log", ()).unwrap();

        let mut graded = cards.clone();
        graded[0].leitner_box = 1;
        let review = ReviewRecord {
            card_id: "c1".to_string(),
            grade: Grade::Good,
            reviewed_at: T,
            box_after: 1,
            interval_after: 1,
        };

        assert!(matches!(
            store.commit_review(&graded, &review),
            Err(StoreError::Sql(_))
        ));
        assert_eq!(store.load().unwrap().unwrap(), cards);
    }

    #[test]
    fn test_commit_review_writes_both() {
        let mut store = SqliteStore::open_in_memory("srs_cards").unwrap();
        let cards = sample_cards();
        let review = ReviewRecord {
            card_id: "c2".to_string(),
            grade: Grade::Hard,
            reviewed_at: T,
            box_after: 3,
            interval_after: 7,
        };

        store.commit_review(&cards, &review).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), cards);
        assert_eq!(store.load_reviews().unwrap(), vec![review]);
    }
}
