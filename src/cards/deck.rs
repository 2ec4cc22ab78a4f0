use super::card::Card;
use rand::seq::SliceRandom;

/// Ordered remainder of undealt cards, drawn from the front.
/// Strictly shrinks as cards are dealt. `shuffled` returns a permuted
/// copy so callers can re-derive a board from the pre-shuffle deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl Iterator for Deck {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }
}

impl Deck {
    /// all 81 cards in stable id order
    pub fn new() -> Self {
        Self((0..crate::DECK_SIZE as u8).map(Card::from).collect())
    }

    /// uniform random permutation of the remainder, input untouched
    pub fn shuffled(&self) -> Self {
        let mut cards = self.0.clone();
        cards.shuffle(&mut rand::rng());
        Self(cards)
    }

    /// deal up to n cards from the front
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        self.0.drain(..n.min(self.0.len())).collect()
    }

    /// deal exactly 3 cards, or nothing if the remainder is short
    pub fn draw3(&mut self) -> Option<[Card; 3]> {
        if self.0.len() < 3 {
            None
        } else {
            let mut drawn = self.0.drain(..3);
            Some(std::array::from_fn(|_| drawn.next().expect("drained 3")))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn full_deck_has_81_unique_cards() {
        let deck = Deck::new();
        assert_eq!(deck.len(), crate::DECK_SIZE);
        let ids = deck.clone().map(|c| c.id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), crate::DECK_SIZE);
        let tuples = deck
            .map(|c| (c.number(), c.shape(), c.color(), c.shading()))
            .collect::<HashSet<_>>();
        assert_eq!(tuples.len(), crate::DECK_SIZE);
    }

    #[test]
    fn shuffled_preserves_cards_and_input() {
        let deck = Deck::new();
        let copy = deck.clone();
        let shuffled = deck.shuffled();
        assert_eq!(deck, copy);
        assert_eq!(shuffled.len(), deck.len());
        let a = deck.map(u8::from).collect::<HashSet<_>>();
        let b = shuffled.map(u8::from).collect::<HashSet<_>>();
        assert_eq!(a, b);
    }

    #[test]
    fn deal_shrinks_from_the_front() {
        let mut deck = Deck::new();
        let board = deck.deal(12);
        assert_eq!(board.len(), 12);
        assert_eq!(deck.len(), crate::DECK_SIZE - 12);
        assert_eq!(board[0].id(), 0);
        assert_eq!(deck.draw3().map(|[c, _, _]| c.id()), Some(12));
    }

    #[test]
    fn draw3_refuses_short_remainder() {
        let mut deck = Deck::from(Deck::new().take(2).collect::<Vec<_>>());
        assert_eq!(deck.draw3(), None);
        assert_eq!(deck.len(), 2);
    }
}
