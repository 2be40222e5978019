//! JSON file storage and import/export for card collections.
//! The collection is one pretty-printed JSON array; the review log sits next to it
//! in `<name>.reviews.json`.

use crate::models::{Card, ReviewRecord};
use crate::store::{CardStore, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes cards to a JSON file at the specified path.
pub fn export_cards_to_path(cards: &[Card], path: impl AsRef<Path>) -> Result<()> {
    let json_string = serde_json::to_string_pretty(cards)?;
    fs::write(path, json_string)?;
    Ok(())
}

/// Reads cards from a JSON file, clamping any box above 5.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_cards(path: impl AsRef<Path>) -> Result<Vec<Card>> {
    let contents = fs::read_to_string(path.as_ref())?;
    let mut cards: Vec<Card> = serde_json::from_str(&contents)?;
    for card in cards.iter_mut() {
        if card.clamp_box() {
            warn!("imported card '{}' had an out of range box, clamped", card.id);
        }
    }
    info!(
        "imported {} cards from '{}'",
        cards.len(),
        path.as_ref().display()
    );
    Ok(cards)
}

/// Card collection in one JSON file, review log in a sibling file.
///
/// Uses the default `commit_review`, which writes the log before the cards.
pub struct JsonFileStore {
    cards_path: PathBuf,
    reviews_path: PathBuf,
}

impl JsonFileStore {
    /// Store backed by `cards_path`; the log goes to `<stem>.reviews.json`.
    pub fn new(cards_path: impl Into<PathBuf>) -> Self {
        let cards_path = cards_path.into();
        let reviews_path = cards_path.with_extension("reviews.json");
        Self {
            cards_path,
            reviews_path,
        }
    }
}

impl CardStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Card>>> {
        if !self.cards_path.exists() {
            return Ok(None);
        }
        import_cards(&self.cards_path).map(Some)
    }

    fn save(&mut self, cards: &[Card]) -> Result<()> {
        export_cards_to_path(cards, &self.cards_path)
    }

    fn load_reviews(&self) -> Result<Vec<ReviewRecord>> {
        if !self.reviews_path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.reviews_path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn append_review(&mut self, review: &ReviewRecord) -> Result<()> {
        let mut reviews = self.load_reviews()?;
        reviews.push(review.clone());
        fs::write(&self.reviews_path, serde_json::to_string_pretty(&reviews)?)?;
        Ok(())
    }
}
