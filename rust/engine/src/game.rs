use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::{DealtCard, Deck};
use crate::errors::GameError;
use crate::player::{Player, PlayerId};
use crate::shuffle::Shuffler;

pub type GameId = String;

/// Deck contents before and after a reshuffle, plus who is seated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShuffleOutcome {
    pub previous: Vec<Card>,
    pub current: Vec<Card>,
    pub player_ids: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealOutcome {
    pub player_id: PlayerId,
    pub hand: Vec<Card>,
    pub dealt: Vec<DealtCard>,
    pub remaining: usize,
}

/// Read-only view of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub game_id: GameId,
    pub players: Vec<Player>,
    pub deck: Vec<Card>,
    pub discarded: usize,
}

/// One game: a deck and the players it deals to.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    players: Vec<Player>,
    deck: Deck,
    discarded: usize,
}

impl Game {
    pub fn new(id: impl Into<GameId>, player_ids: Vec<PlayerId>, deck: Deck) -> Self {
        Self {
            id: id.into(),
            players: player_ids.into_iter().map(Player::new).collect(),
            deck,
            discarded: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id().to_string()).collect()
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Cards that left play because a later deal replaced the hand holding them.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Cards in the deck, in hands, and discarded. Always 52 for a game built
    /// from a full deck.
    pub fn cards_accounted_for(&self) -> usize {
        self.deck.len()
            + self.players.iter().map(|p| p.hand().len()).sum::<usize>()
            + self.discarded
    }

    /// Permutes whatever is left in the deck.
    pub fn reshuffle(&mut self, shuffler: &mut Shuffler) -> Result<ShuffleOutcome, GameError> {
        let previous = self.deck.cards().to_vec();
        let current = shuffler.shuffle(&previous)?;
        self.deck = Deck::from_cards(current.clone());

        Ok(ShuffleOutcome {
            previous,
            current,
            player_ids: self.player_ids(),
        })
    }

    /// Deals `count` cards (at least one) off the top of the deck and makes
    /// them the player's entire hand.
    pub fn deal(&mut self, player_id: &str, count: usize) -> Result<DealOutcome, GameError> {
        let count = count.max(1);
        let idx = self
            .players
            .iter()
            .position(|p| p.id() == player_id)
            .ok_or_else(|| GameError::PlayerNotFound(player_id.to_string()))?;

        let dealt = self.deck.deal(count)?;
        let hand: Vec<Card> = dealt.iter().map(|d| d.card).collect();
        let displaced = self.players[idx].replace_hand(hand.clone());
        self.discarded += displaced.len();

        Ok(DealOutcome {
            player_id: player_id.to_string(),
            hand,
            dealt,
            remaining: self.deck.len(),
        })
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_id: self.id.clone(),
            players: self.players.clone(),
            deck: self.deck.cards().to_vec(),
            discarded: self.discarded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DeckError;
    use crate::shuffle::ShuffleStrategy;

    fn two_player_game() -> Game {
        Game::new("g1", vec!["a".into(), "b".into()], Deck::new())
    }

    #[test]
    fn zero_count_deals_one_card() {
        let mut game = two_player_game();
        let outcome = game.deal("a", 0).expect("deal");
        assert_eq!(outcome.hand.len(), 1);
        assert_eq!(outcome.remaining, 51);
    }

    #[test]
    fn redeal_overwrites_and_counts_discards() {
        let mut game = two_player_game();
        game.deal("a", 3).expect("first deal");
        let outcome = game.deal("a", 2).expect("second deal");

        assert_eq!(outcome.hand.len(), 2);
        assert_eq!(game.player("a").unwrap().hand().len(), 2);
        assert_eq!(game.discarded(), 3);
        assert_eq!(game.deck().len(), 47);
        assert_eq!(game.cards_accounted_for(), 52);
    }

    #[test]
    fn unknown_player_is_reported() {
        let mut game = two_player_game();
        let err = game.deal("zz", 1).unwrap_err();
        assert_eq!(err, GameError::PlayerNotFound("zz".into()));
        assert_eq!(game.deck().len(), 52);
    }

    #[test]
    fn overdraw_keeps_hand_and_deck() {
        let mut game = two_player_game();
        game.deal("a", 50).expect("deal");
        let err = game.deal("b", 3).unwrap_err();
        assert_eq!(
            err,
            GameError::Deck(DeckError::InsufficientCards {
                requested: 3,
                remaining: 2
            })
        );
        assert_eq!(game.deck().len(), 2);
        assert!(game.player("b").unwrap().hand().is_empty());
    }

    #[test]
    fn reshuffle_reports_previous_and_current_decks() {
        let mut game = two_player_game();
        game.deal("b", 2).expect("deal");
        let mut shuffler = Shuffler::with_seed(ShuffleStrategy::FisherYates, 11);

        let outcome = game.reshuffle(&mut shuffler).expect("reshuffle");
        assert_eq!(outcome.previous.len(), 50);
        assert_eq!(outcome.current.len(), 50);
        assert_eq!(outcome.player_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(game.deck().cards(), outcome.current.as_slice());
    }
}
