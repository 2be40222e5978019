//! Review scheduler over an injected card store and clock.
//!
//! Every review is a read-modify-write of the whole collection. Until the first
//! review is saved, reads fall back to the seed set without persisting it.

use crate::clock::Clock;
use crate::error::{Result, SchedulerError};
use crate::models::{Card, Deck, Grade, ReviewRecord, ReviewStats, Timestamp, leitner};
use crate::seed;
use crate::store::CardStore;
use log::{debug, info, warn};

/// Schedules reviews for the cards held in `store`, reading time from `clock`.
pub struct ReviewScheduler<S, C> {
    store: S,
    clock: C,
}

impl<S: CardStore, C: Clock> ReviewScheduler<S, C> {
    /// Wraps a store and clock. Nothing is read until the first call.
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// The underlying store, for inspection.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The injected clock. A `ManualClock` can be advanced through it.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Stored cards, or the seed set (due at `now`) if nothing was stored yet.
    pub fn cards(&self, now: Timestamp) -> Result<Vec<Card>> {
        Ok(self
            .load_checked()?
            .unwrap_or_else(|| seed::seed_cards(now)))
    }

    /// Loads the collection with every box clamped into range.
    fn load_checked(&self) -> Result<Option<Vec<Card>>> {
        let mut stored = self.store.load()?;
        for card in stored.iter_mut().flatten() {
            if card.clamp_box() {
                warn!("card '{}' had an out of range box, clamped", card.id);
            }
        }
        Ok(stored)
    }

    /// Cards of `deck_id` with `due_date <= now`, in storage order.
    pub fn get_due_cards(&self, deck_id: &str, now: Timestamp) -> Result<Vec<Card>> {
        Ok(self
            .cards(now)?
            .into_iter()
            .filter(|card| card.deck_id == deck_id && card.is_due(now))
            .collect())
    }

    /// Grades a card, saves the collection and logs the review.
    /// An unknown id leaves the store untouched.
    pub fn process_review(&mut self, card_id: &str, grade: Grade, now: Timestamp) -> Result<Card> {
        let stored = self.load_checked()?;
        let seeding = stored.is_none();
        let mut cards = stored.unwrap_or_else(|| seed::seed_cards(now));

        let Some(card) = cards.iter_mut().find(|c| c.id == card_id) else {
            warn!("review for unknown card '{}' ignored", card_id);
            return Err(SchedulerError::NotFound(card_id.to_string()));
        };

        let updated = leitner::apply_review(card, grade, now);
        debug!(
            "card '{}' graded {}: box {} -> {}, due in {} days",
            card_id, grade, card.leitner_box, updated.leitner_box, updated.interval
        );
        *card = updated.clone();

        let review = ReviewRecord {
            card_id: updated.id.clone(),
            grade,
            reviewed_at: now,
            box_after: updated.leitner_box,
            interval_after: updated.interval,
        };
        self.store.commit_review(&cards, &review)?;
        if seeding {
            info!("seeded card store with {} cards", cards.len());
        }

        Ok(updated)
    }

    /// Totals, due and mastered counts, and the review streak as of `now`.
    pub fn get_stats(&self, now: Timestamp) -> Result<ReviewStats> {
        let cards = self.cards(now)?;
        let reviews = self.store.load_reviews()?;
        Ok(ReviewStats::compute(&cards, &reviews, now))
    }

    /// Seed decks with counters taken from the current card collection.
    pub fn deck_summaries(&self, now: Timestamp) -> Result<Vec<Deck>> {
        let cards = self.cards(now)?;
        Ok(seed::seed_decks()
            .into_iter()
            .map(|deck| {
                let (total_cards, mastered_cards) = cards
                    .iter()
                    .filter(|c| c.deck_id == deck.id)
                    .fold((0, 0), |(total, mastered), c| {
                        (total + 1, mastered + usize::from(c.is_mastered()))
                    });
                Deck {
                    total_cards,
                    mastered_cards,
                    ..deck
                }
            })
            .collect())
    }

    /// `get_due_cards` at the clock's current time.
    pub fn due_cards(&self, deck_id: &str) -> Result<Vec<Card>> {
        self.get_due_cards(deck_id, self.clock.now())
    }

    /// `process_review` at the clock's current time.
    pub fn review(&mut self, card_id: &str, grade: Grade) -> Result<Card> {
        let now = self.clock.now();
        self.process_review(card_id, grade, now)
    }

    /// `get_stats` at the clock's current time.
    pub fn stats(&self) -> Result<ReviewStats> {
        self.get_stats(self.clock.now())
    }
}
