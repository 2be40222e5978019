//! Fixed initial decks and cards used until the first review is stored.
use crate::models::{Card, Deck, Timestamp};

const SEED_CARDS: &[(&str, &str, &str, &str)] = &[
    ("ar-1", "arabic-vocabulary", "كتاب", "book"),
    ("ar-2", "arabic-vocabulary", "قلم", "pen"),
    ("ar-3", "arabic-vocabulary", "مدرسة", "school"),
    ("ar-4", "arabic-vocabulary", "بيت", "house"),
    ("logic-1", "logic-terms", "Qiyas", "Analogical reasoning from a known case to a new one"),
    ("logic-2", "logic-terms", "Illah", "The effective cause shared by the original and new case"),
    ("logic-3", "logic-terms", "Syllogism", "An argument with two premises and a conclusion"),
    ("phys-1", "physics-basics", "Newton's second law", "F = m * a"),
    ("phys-2", "physics-basics", "Unit of power", "Watt (joule per second)"),
    ("phys-3", "physics-basics", "Speed of light", "About 299,792 km/s"),
];

/// Seed cards, all new and due at `now`.
pub fn seed_cards(now: Timestamp) -> Vec<Card> {
    SEED_CARDS
        .iter()
        .map(|(id, deck_id, front, back)| Card::new(id, deck_id, front, back, now))
        .collect()
}

/// Display metadata. The counters are not kept in sync with review state;
/// see `ReviewScheduler::deck_summaries` for live counts.
pub fn seed_decks() -> Vec<Deck> {
    vec![
        Deck {
            id: "arabic-vocabulary".to_string(),
            title: "Arabic Vocabulary".to_string(),
            description: "Everyday nouns".to_string(),
            total_cards: 4,
            mastered_cards: 0,
        },
        Deck {
            id: "logic-terms".to_string(),
            title: "Logic Terms".to_string(),
            description: "Core vocabulary of analogical reasoning".to_string(),
            total_cards: 3,
            mastered_cards: 0,
        },
        Deck {
            id: "physics-basics".to_string(),
            title: "Physics Basics".to_string(),
            description: "Laws, units and constants".to_string(),
            total_cards: 3,
            mastered_cards: 0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique() {
        let cards = seed_cards(0);
        let ids: HashSet<_> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), cards.len());
    }

    #[test]
    fn test_every_seed_card_belongs_to_a_seed_deck() {
        let decks = seed_decks();
        for card in seed_cards(0) {
            let deck = decks.iter().find(|d| d.id == card.deck_id);
            assert!(deck.is_some(), "card {} has no deck", card.id);
        }
        for deck in &decks {
            let count = seed_cards(0).iter().filter(|c| c.deck_id == deck.id).count();
            assert_eq!(deck.total_cards, count);
        }
    }
}
