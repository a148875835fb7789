use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::CardError;

/// One of the four suits of a standard 52-card deck.
///
/// On the wire a suit is its symbol (`"♡"`, `"♢"`, `"♣"`, `"♠"`).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit (♡)
    #[serde(rename = "♡")]
    Hearts,
    /// Diamonds suit (♢)
    #[serde(rename = "♢")]
    Diamonds,
    /// Clubs suit (♣)
    #[serde(rename = "♣")]
    Clubs,
    /// Spades suit (♠)
    #[serde(rename = "♠")]
    Spades,
}

impl Suit {
    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Hearts => "♡",
            Suit::Diamonds => "♢",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Face value of a card, Ace (1) through King (13).
///
/// Serialized as its numeric value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Human-readable rank name used in deal descriptions.
    pub fn name(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

impl TryFrom<u8> for Rank {
    type Error = CardError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        let rank = match v {
            1 => Rank::Ace,
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            other => return Err(CardError::InvalidRank(other)),
        };
        Ok(rank)
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.value()
    }
}

/// A single playing card. Serialized as `{"value": 1..13, "symbol": "♠"}`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "value")]
    pub rank: Rank,
    #[serde(rename = "symbol")]
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank.name(), self.suit)
    }
}

/// Suits in canonical deck order.
pub fn all_suits() -> [Suit; 4] {
    [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_serializes_as_value_and_symbol() {
        let card = Card::new(Rank::Queen, Suit::Spades);
        let json = serde_json::to_value(card).expect("serialize");
        assert_eq!(json["value"], 12);
        assert_eq!(json["symbol"], "♠");
    }

    #[test]
    fn card_deserialization_rejects_out_of_range_value() {
        let err = serde_json::from_str::<Card>(r#"{"value": 14, "symbol": "♡"}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<Card>(r#"{"value": 0, "symbol": "♡"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn card_deserialization_rejects_unknown_symbol() {
        let err = serde_json::from_str::<Card>(r#"{"value": 3, "symbol": "X"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn display_uses_rank_name_and_symbol() {
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).to_string(), "Ace of ♡");
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).to_string(), "Ten of ♣");
    }

    #[test]
    fn rank_round_trips_through_u8() {
        for rank in all_ranks() {
            assert_eq!(Rank::try_from(rank.value()).unwrap(), rank);
        }
        assert!(Rank::try_from(14).is_err());
    }
}
