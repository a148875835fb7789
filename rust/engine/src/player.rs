use crate::cards::Card;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub type PlayerId = String;

pub const MAX_PLAYERS: usize = 4;

/// A seat in a game. The hand is replaced wholesale on every deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    hand: Vec<Card>,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            hand: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Installs a new hand and returns the one it displaced.
    pub fn replace_hand(&mut self, hand: Vec<Card>) -> Vec<Card> {
        std::mem::replace(&mut self.hand, hand)
    }
}

/// How many players a new game seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerCountPolicy {
    /// Uniform over `1..=MAX_PLAYERS`.
    #[default]
    Uniform,
    /// Uniform over `0..=MAX_PLAYERS` with a draw of zero seating one player,
    /// so a single player comes up twice as often as any other count.
    ZeroFloor,
}

impl PlayerCountPolicy {
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> usize {
        match self {
            PlayerCountPolicy::Uniform => rng.random_range(1..=MAX_PLAYERS),
            PlayerCountPolicy::ZeroFloor => rng.random_range(0..=MAX_PLAYERS).max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn both_policies_stay_within_one_to_four() {
        let mut rng = ChaCha20Rng::seed_from_u64(99);
        for policy in [PlayerCountPolicy::Uniform, PlayerCountPolicy::ZeroFloor] {
            for _ in 0..500 {
                let n = policy.roll(&mut rng);
                assert!((1..=MAX_PLAYERS).contains(&n), "{policy:?} rolled {n}");
            }
        }
    }

    #[test]
    fn zero_floor_favours_a_single_player() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut counts = [0usize; MAX_PLAYERS + 1];
        for _ in 0..5_000 {
            counts[PlayerCountPolicy::ZeroFloor.roll(&mut rng)] += 1;
        }
        assert_eq!(counts[0], 0);
        assert!(counts[1] > counts[2]);
        assert!(counts[1] > counts[4]);
    }

    #[test]
    fn replace_hand_returns_previous_cards() {
        use crate::cards::{Rank, Suit};

        let mut player = Player::new("p1");
        let first = vec![Card::new(Rank::Two, Suit::Clubs)];
        assert!(player.replace_hand(first.clone()).is_empty());
        let displaced = player.replace_hand(vec![Card::new(Rank::Ace, Suit::Spades)]);
        assert_eq!(displaced, first);
        assert_eq!(player.hand().len(), 1);
    }
}
