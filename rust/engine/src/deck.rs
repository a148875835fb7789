
use crate::cards::{all_ranks, all_suits, Card};
use crate::errors::DeckError;

pub const DECK_SIZE: usize = 52;

/// Builds the canonical, unshuffled 52-card deck: hearts, diamonds, clubs,
/// spades, each suit ascending from Ace to King.
pub fn build_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card::new(r, s));
        }
    }
    v
}

/// One card taken off the top of a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealtCard {
    pub card: Card,
    pub phrase: String,
    /// The deck as it stood right after this card was removed.
    pub remaining: Vec<Card>,
}

/// An ordered pile of cards. The top of the deck is the end of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    pub fn new() -> Self {
        Self {
            cards: build_deck(),
        }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes `count` cards from the top, one at a time.
    ///
    /// Fails without touching the deck when fewer than `count` cards remain.
    pub fn deal(&mut self, count: usize) -> Result<Vec<DealtCard>, DeckError> {
        if count > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: count,
                remaining: self.cards.len(),
            });
        }

        let mut dealt = Vec::with_capacity(count);
        for _ in 0..count {
            let Some(card) = self.cards.pop() else {
                break;
            };
            dealt.push(DealtCard {
                card,
                phrase: format!("Dealt Card: {card}"),
                remaining: self.cards.clone(),
            });
        }
        Ok(dealt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn canonical_order_starts_with_hearts_and_ends_with_spades() {
        let deck = build_deck();
        assert_eq!(deck[0], Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(deck[12], Card::new(Rank::King, Suit::Hearts));
        assert_eq!(deck[13], Card::new(Rank::Ace, Suit::Diamonds));
        assert_eq!(deck[51], Card::new(Rank::King, Suit::Spades));
    }

    #[test]
    fn default_deck_is_the_full_canonical_deck() {
        assert_eq!(Deck::default(), Deck::new());
        assert_eq!(Deck::default().len(), DECK_SIZE);
    }

    #[test]
    fn deal_pops_from_the_top_in_reverse_order() {
        let mut deck = Deck::new();
        let dealt = deck.deal(2).expect("deal two");

        assert_eq!(dealt[0].card, Card::new(Rank::King, Suit::Spades));
        assert_eq!(dealt[1].card, Card::new(Rank::Queen, Suit::Spades));
        assert_eq!(dealt[0].phrase, "Dealt Card: King of ♠");
        assert_eq!(dealt[0].remaining.len(), 51);
        assert_eq!(dealt[1].remaining.len(), 50);
        assert_eq!(deck.len(), 50);
    }

    #[test]
    fn deal_more_than_remaining_leaves_deck_intact() {
        let mut deck = Deck::from_cards(build_deck()[..3].to_vec());
        let err = deck.deal(4).unwrap_err();
        assert_eq!(
            err,
            DeckError::InsufficientCards {
                requested: 4,
                remaining: 3
            }
        );
        assert_eq!(deck.len(), 3);
    }

    #[test]
    fn deal_entire_deck_empties_it() {
        let mut deck = Deck::new();
        let dealt = deck.deal(DECK_SIZE).expect("deal all");
        assert_eq!(dealt.len(), DECK_SIZE);
        assert!(deck.is_empty());
        assert!(dealt.last().unwrap().remaining.is_empty());
    }
}
