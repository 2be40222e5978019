//! Deck is a named group of cards
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub title: String,
    pub description: String,
    pub total_cards: usize,
    pub mastered_cards: usize,
}
