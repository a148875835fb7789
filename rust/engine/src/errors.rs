use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardError {
    #[error("Invalid card value: {0} (expected 1-13)")]
    InvalidRank(u8),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Cannot deal {requested} card(s), only {remaining} remaining")]
    InsufficientCards { requested: usize, remaining: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShuffleError {
    #[error("Rejection sampling gave up after {draws} draws with {accepted} of {total} cards placed")]
    DrawLimitExceeded {
        draws: usize,
        accepted: usize,
        total: usize,
    },
    #[error("Cannot shuffle a deck holding {0} more than once")]
    DuplicateCard(Card),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Player not found: {0}")]
    PlayerNotFound(String),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Shuffle(#[from] ShuffleError),
}
