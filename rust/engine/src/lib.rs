//! # cardroom-engine: card and game state core
//!
//! Pure, synchronous building blocks for the cardroom server: the 52-card
//! model, the shuffle engine, and per-game player/deck state. Nothing here
//! knows about HTTP or locking; the web crate owns both.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and its wire shape
//! - [`deck`] - Canonical deck construction and dealing off the top
//! - [`shuffle`] - Fisher-Yates and bounded rejection-sampling shuffles
//! - [`player`] - Players, hands, and the player-count policy
//! - [`game`] - Game state with reshuffle and deal operations
//! - [`errors`] - Error types for card, deck, shuffle, and game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use cardroom_engine::deck::Deck;
//! use cardroom_engine::game::Game;
//! use cardroom_engine::shuffle::{ShuffleStrategy, Shuffler};
//!
//! let mut shuffler = Shuffler::with_seed(ShuffleStrategy::FisherYates, 42);
//! let mut game = Game::new("game-1", vec!["alice".into()], Deck::new());
//!
//! game.reshuffle(&mut shuffler).unwrap();
//! let outcome = game.deal("alice", 2).unwrap();
//! assert_eq!(outcome.hand.len(), 2);
//! assert_eq!(game.deck().len(), 50);
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod player;
pub mod shuffle;

pub use cards::{Card, Rank, Suit};
pub use deck::{build_deck, DealtCard, Deck, DECK_SIZE};
pub use errors::{CardError, DeckError, GameError, ShuffleError};
pub use game::{DealOutcome, Game, GameId, GameSnapshot, ShuffleOutcome};
pub use player::{Player, PlayerCountPolicy, PlayerId, MAX_PLAYERS};
pub use shuffle::{ShuffleStrategy, Shuffler, DEFAULT_MAX_DRAWS};
