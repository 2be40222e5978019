//! Practice session over the due cards of one deck.
//! Cards graded `again` are repeated in the next round until a round passes cleanly.

use super::{Card, Grade, Timestamp};
use crate::clock::Clock;
use crate::error::Result;
use crate::scheduler::ReviewScheduler;
use crate::store::CardStore;

/// Manages a practice session with multiple rounds.
/// Cards graded `again` are shown again in the next round.
pub struct ReviewSession {
    pub deck_id: String,
    pub cards: Vec<Card>,
    /// Indices into `cards` for the current round.
    pub current_round_cards: Vec<usize>,
    pub current_index: usize,
    pub show_answer: bool,
    pub round_number: usize,
    /// Whether each card passed in the current round.
    learned: Vec<bool>,
}

impl ReviewSession {
    /// Starts a session with every card of the deck that is due at `now`.
    pub fn start<S: CardStore, C: Clock>(
        scheduler: &ReviewScheduler<S, C>,
        deck_id: &str,
        now: Timestamp,
    ) -> Result<Self> {
        let cards = scheduler.get_due_cards(deck_id, now)?;
        Ok(Self {
            deck_id: deck_id.to_string(),
            current_round_cards: (0..cards.len()).collect(),
            learned: vec![false; cards.len()],
            cards,
            current_index: 0,
            show_answer: false,
            round_number: 1,
        })
    }

    /// Card being shown, `None` for an empty session.
    pub fn current_card(&self) -> Option<&Card> {
        self.current_round_cards
            .get(self.current_index)
            .and_then(|&idx| self.cards.get(idx))
    }

    /// Flips between showing the front and the back.
    pub fn toggle_answer(&mut self) {
        self.show_answer = !self.show_answer;
    }

    /// Grades the current card through the scheduler and moves on.
    /// Does nothing once the session is completed.
    pub fn grade_current_card<S: CardStore, C: Clock>(
        &mut self,
        scheduler: &mut ReviewScheduler<S, C>,
        grade: Grade,
        now: Timestamp,
    ) -> Result<()> {
        let Some(&idx) = self.current_round_cards.get(self.current_index) else {
            return Ok(());
        };
        if self.is_completed() {
            return Ok(());
        }

        let updated = scheduler.process_review(&self.cards[idx].id, grade, now)?;
        self.cards[idx] = updated;
        self.learned[idx] = grade != Grade::Again;
        self.next_card();
        Ok(())
    }

    fn next_card(&mut self) {
        self.show_answer = false;
        if self.current_index + 1 < self.current_round_cards.len() {
            self.current_index += 1;
        } else {
            self.start_next_round();
        }
    }

    fn start_next_round(&mut self) {
        let failed: Vec<usize> = self
            .current_round_cards
            .iter()
            .copied()
            .filter(|&idx| !self.learned[idx])
            .collect();

        // No failures: keep the finished round so is_completed() reports true
        if failed.is_empty() {
            return;
        }
        self.current_round_cards = failed;
        self.current_index = 0;
        self.round_number += 1;
    }

    /// Cards in the current round graded anything but `again`.
    pub fn learned_count(&self) -> usize {
        self.current_round_cards
            .iter()
            .filter(|&&idx| self.learned[idx])
            .count()
    }

    /// Cards in the current round.
    pub fn total_count(&self) -> usize {
        self.current_round_cards.len()
    }

    /// Cards in the current round not yet passed.
    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.learned_count()
    }

    /// Returns true when the current round is empty or every card in it passed.
    pub fn is_completed(&self) -> bool {
        self.current_round_cards.is_empty() || self.learned_count() == self.total_count()
    }

    /// Short progress label, e.g. "Round 2 (Review): 1 cards to retry".
    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} cards", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Review): {} cards to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::models::DAY_MS;
    use crate::store::MemoryStore;

    const NOW: Timestamp = 1_704_888_000_000;

    fn scheduler() -> ReviewScheduler<MemoryStore, ManualClock> {
        ReviewScheduler::new(MemoryStore::new(), ManualClock::new(NOW))
    }

    #[test]
    fn test_clean_round_completes_session() {
        let mut s = scheduler();
        let mut session = ReviewSession::start(&s, "logic-terms", NOW).unwrap();
        assert_eq!(session.total_count(), 3);
        assert_eq!(session.phase_message(), "Round 1: 3 cards");

        for _ in 0..3 {
            assert!(!session.is_completed());
            session.grade_current_card(&mut s, Grade::Good, NOW).unwrap();
        }

        assert!(session.is_completed());
        assert_eq!(session.round_number, 1);
        assert_eq!(session.remaining_count(), 0);
        assert!(s.get_due_cards("logic-terms", NOW).unwrap().is_empty());
    }

    #[test]
    fn test_failed_cards_repeat_in_next_round() {
        let mut s = scheduler();
        let mut session = ReviewSession::start(&s, "physics-basics", NOW).unwrap();

        let failed_id = session.current_card().unwrap().id.clone();
        session.grade_current_card(&mut s, Grade::Again, NOW).unwrap();
        session.grade_current_card(&mut s, Grade::Good, NOW).unwrap();
        session.grade_current_card(&mut s, Grade::Easy, NOW).unwrap();

        assert!(!session.is_completed());
        assert_eq!(session.round_number, 2);
        assert_eq!(session.total_count(), 1);
        assert_eq!(session.current_card().unwrap().id, failed_id);
        assert_eq!(session.phase_message(), "Round 2 (Review): 1 cards to retry");

        session.grade_current_card(&mut s, Grade::Hard, NOW).unwrap();
        assert!(session.is_completed());

        let failed = s.cards(NOW).unwrap().into_iter().find(|c| c.id == failed_id).unwrap();
        assert_eq!(failed.leitner_box, 1);
        assert_eq!(failed.due_date, NOW + DAY_MS);
    }

    #[test]
    fn test_grading_after_completion_is_ignored() {
        let mut s = scheduler();
        let mut session = ReviewSession::start(&s, "logic-terms", NOW).unwrap();
        for _ in 0..3 {
            session.grade_current_card(&mut s, Grade::Good, NOW).unwrap();
        }
        session.grade_current_card(&mut s, Grade::Again, NOW).unwrap();

        assert!(session.is_completed());
        assert_eq!(s.store().load_reviews().unwrap().len(), 3);
    }

    #[test]
    fn test_empty_deck_is_completed() {
        let s = scheduler();
        let session = ReviewSession::start(&s, "no-such-deck", NOW).unwrap();
        assert!(session.is_completed());
        assert!(session.current_card().is_none());
    }

    #[test]
    fn test_toggle_answer_resets_on_next_card() {
        let mut s = scheduler();
        let mut session = ReviewSession::start(&s, "logic-terms", NOW).unwrap();
        session.toggle_answer();
        assert!(session.show_answer);
        session.grade_current_card(&mut s, Grade::Good, NOW).unwrap();
        assert!(!session.show_answer);
    }
}
