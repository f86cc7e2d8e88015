//! Card supply lifecycle: generation, shuffling, dealing, drawing.
//!
//! Deck, discard pile, hands, and board chips form a closed set: no card
//! value is ever created or destroyed after `generate_deck`, only moved.
//! The top of the deck is the *end* of the vec, so drawing is a `pop`.
//!
//! Deck exhaustion is not an error. When the deck empties, the discard
//! pile is shuffled in as the new deck; when both are empty a draw
//! yields `None` and the caller proceeds with a short hand.

use serde::{Deserialize, Serialize};

use crate::core::{CardId, GameRng, GameSettings};

/// A numbered card. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Value in `[0, deck_size)`.
    pub value: u16,
    pub id: CardId,
}

/// Build the full card set: every value in `[0, deck_size)`, duplicated
/// `cards_per_number` times with distinct ids. Unshuffled.
#[must_use]
pub fn generate_deck(settings: &GameSettings) -> Vec<Card> {
    let mut deck = Vec::with_capacity(settings.total_cards());
    for value in 0..settings.deck_size {
        for copy in 0..settings.cards_per_number {
            deck.push(Card {
                value,
                id: CardId::for_card(value, copy),
            });
        }
    }
    deck
}

/// Round-robin deal: one card per player per round until everyone holds
/// `hand_size` cards or the deck runs out. The remaining deck keeps its
/// draw order.
#[must_use]
pub fn deal(deck: &mut Vec<Card>, player_count: usize, hand_size: usize) -> Vec<Vec<Card>> {
    let mut hands = vec![Vec::with_capacity(hand_size); player_count];
    for _round in 0..hand_size {
        for hand in hands.iter_mut() {
            match deck.pop() {
                Some(card) => hand.push(card),
                None => return hands,
            }
        }
    }
    hands
}

/// Draw the next card, recycling a shuffled discard pile if the deck is
/// empty. Returns `None` when both are exhausted.
pub fn draw(deck: &mut Vec<Card>, discard: &mut Vec<Card>, rng: &mut GameRng) -> Option<Card> {
    if let Some(card) = deck.pop() {
        return Some(card);
    }
    if discard.is_empty() {
        return None;
    }
    deck.append(discard);
    rng.shuffle(deck);
    deck.pop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn settings() -> GameSettings {
        GameSettings::default()
    }

    #[test]
    fn test_generate_deck_counts_and_ids() {
        let mut s = settings();
        s.cards_per_number = 2;
        let deck = generate_deck(&s);

        assert_eq!(deck.len(), 200);

        // Every value appears exactly twice, all ids distinct.
        let ids: HashSet<_> = deck.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), 200);
        for value in 0..100 {
            assert_eq!(deck.iter().filter(|c| c.value == value).count(), 2);
        }
    }

    #[test]
    fn test_deal_round_robin() {
        let mut deck = generate_deck(&settings());
        let total = deck.len();
        let hands = deal(&mut deck, 3, 5);

        assert_eq!(hands.len(), 3);
        assert!(hands.iter().all(|h| h.len() == 5));
        assert_eq!(deck.len(), total - 15);

        // Round-robin: the first round of cards went one to each player.
        let mut reference = generate_deck(&settings());
        assert_eq!(hands[0][0], reference.pop().unwrap());
        assert_eq!(hands[1][0], reference.pop().unwrap());
        assert_eq!(hands[2][0], reference.pop().unwrap());
    }

    #[test]
    fn test_deal_stops_on_exhaustion() {
        let mut s = settings();
        s.deck_size = 100;
        let mut deck: Vec<Card> = generate_deck(&s).into_iter().take(7).collect();

        let hands = deal(&mut deck, 3, 5);

        assert!(deck.is_empty());
        let dealt: usize = hands.iter().map(Vec::len).sum();
        assert_eq!(dealt, 7);
        // Short deck: earlier players in the round got the extra cards.
        assert_eq!(hands[0].len(), 3);
        assert_eq!(hands[1].len(), 2);
        assert_eq!(hands[2].len(), 2);
    }

    #[test]
    fn test_draw_recycles_discard() {
        let mut rng = GameRng::new(7);
        let mut deck: Vec<Card> = Vec::new();
        let mut discard = vec![
            Card { value: 1, id: CardId::for_card(1, 0) },
            Card { value: 2, id: CardId::for_card(2, 0) },
            Card { value: 3, id: CardId::for_card(3, 0) },
        ];

        let card = draw(&mut deck, &mut discard, &mut rng).unwrap();

        assert!(discard.is_empty());
        assert_eq!(deck.len(), 2);
        assert!([1, 2, 3].contains(&card.value));
    }

    #[test]
    fn test_draw_from_nothing_is_none_not_error() {
        let mut rng = GameRng::new(7);
        let mut deck = Vec::new();
        let mut discard = Vec::new();

        assert!(draw(&mut deck, &mut discard, &mut rng).is_none());
        // Still empty, still callable.
        assert!(draw(&mut deck, &mut discard, &mut rng).is_none());
    }

    #[test]
    fn test_conservation_across_draws_and_reshuffles() {
        let mut rng = GameRng::new(11);
        let s = settings();
        let mut deck = generate_deck(&s);
        rng.shuffle(&mut deck);
        let total = deck.len();

        let mut discard = Vec::new();
        let mut held = Vec::new();

        // Draw everything, discarding half of what we draw, then keep
        // drawing through the reshuffle.
        for i in 0..150 {
            match draw(&mut deck, &mut discard, &mut rng) {
                Some(card) => {
                    if i % 2 == 0 {
                        discard.push(card);
                    } else {
                        held.push(card);
                    }
                }
                None => break,
            }
            assert_eq!(deck.len() + discard.len() + held.len(), total);
        }
        assert_eq!(deck.len() + discard.len() + held.len(), total);
    }
}
