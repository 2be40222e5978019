//! Storage port for the card collection and the review log.
//!
//! The collection is read and written whole. There is no partial write and no
//! locking, so a store must have a single writer.

use crate::error::StoreError;
use crate::models::{Card, ReviewRecord};

pub type Result<T> = std::result::Result<T, StoreError>;

pub trait CardStore {
    /// Loads the whole collection. `None` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Vec<Card>>>;

    /// Replaces the stored collection with `cards`.
    fn save(&mut self, cards: &[Card]) -> Result<()>;

    /// Review log in the order it was appended.
    fn load_reviews(&self) -> Result<Vec<ReviewRecord>>;

    fn append_review(&mut self, review: &ReviewRecord) -> Result<()>;

    /// Stores the graded collection together with its review record.
    ///
    /// On error the stored cards must be unchanged. The default writes the log
    /// entry first, so a failed append leaves the cards as they were; a failed
    /// save after it leaves an orphan log entry but no graded card.
    fn commit_review(&mut self, cards: &[Card], review: &ReviewRecord) -> Result<()> {
        self.append_review(review)?;
        self.save(cards)
    }
}

/// Keeps everything in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    cards: Option<Vec<Card>>,
    reviews: Vec<ReviewRecord>,
}

impl MemoryStore {
    /// Empty store, as if nothing was ever saved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `cards` and an empty review log.
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: Some(cards),
            reviews: Vec::new(),
        }
    }
}

impl CardStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Card>>> {
        Ok(self.cards.clone())
    }

    fn save(&mut self, cards: &[Card]) -> Result<()> {
        self.cards = Some(cards.to_vec());
        Ok(())
    }

    fn load_reviews(&self) -> Result<Vec<ReviewRecord>> {
        Ok(self.reviews.clone())
    }

    fn append_review(&mut self, review: &ReviewRecord) -> Result<()> {
        self.reviews.push(review.clone());
        Ok(())
    }
}
