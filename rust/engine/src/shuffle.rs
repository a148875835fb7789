//! Deck permutation.
//!
//! Two strategies are available:
//!
//! - [`ShuffleStrategy::FisherYates`] is a single-pass swap shuffle and always
//!   finishes in `n - 1` swaps. This is the default.
//! - [`ShuffleStrategy::RejectionSampling`] draws a uniform index over the
//!   whole input on every attempt and keeps the card only if it has not been
//!   placed yet. The expected number of draws for 52 cards is about 236, but
//!   there is no hard upper bound, so every run is capped by `max_draws`.
//!
//! Both strategies return a permutation of their input.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

use crate::cards::Card;
use crate::errors::ShuffleError;

pub const DEFAULT_MAX_DRAWS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShuffleStrategy {
    #[default]
    FisherYates,
    RejectionSampling { max_draws: usize },
}

/// Result of a rejection-sampling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionShuffle {
    pub cards: Vec<Card>,
    pub draws: usize,
}

pub fn fisher_yates<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut shuffled = cards.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Rejection-sampling permutation, capped at `max_draws` index draws.
pub fn rejection_sample<R: Rng + ?Sized>(
    cards: &[Card],
    rng: &mut R,
    max_draws: usize,
) -> Result<RejectionShuffle, ShuffleError> {
    let total = cards.len();
    let mut seen = HashSet::with_capacity(total);
    for card in cards {
        if !seen.insert(*card) {
            return Err(ShuffleError::DuplicateCard(*card));
        }
    }
    seen.clear();

    let mut shuffled = Vec::with_capacity(total);
    let mut draws = 0;
    while shuffled.len() < total {
        if draws == max_draws {
            return Err(ShuffleError::DrawLimitExceeded {
                draws,
                accepted: shuffled.len(),
                total,
            });
        }
        draws += 1;

        let card = cards[rng.random_range(0..total)];
        if seen.insert(card) {
            shuffled.push(card);
        }
    }

    Ok(RejectionShuffle {
        cards: shuffled,
        draws,
    })
}

/// A shuffle strategy bound to its own random source.
#[derive(Debug, Clone)]
pub struct Shuffler {
    strategy: ShuffleStrategy,
    rng: ChaCha20Rng,
}

impl Shuffler {
    pub fn new(strategy: ShuffleStrategy) -> Self {
        Self {
            strategy,
            rng: ChaCha20Rng::from_os_rng(),
        }
    }

    pub fn with_seed(strategy: ShuffleStrategy, seed: u64) -> Self {
        Self {
            strategy,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn strategy(&self) -> ShuffleStrategy {
        self.strategy
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha20Rng {
        &mut self.rng
    }

    pub fn shuffle(&mut self, cards: &[Card]) -> Result<Vec<Card>, ShuffleError> {
        match self.strategy {
            ShuffleStrategy::FisherYates => Ok(fisher_yates(cards, &mut self.rng)),
            ShuffleStrategy::RejectionSampling { max_draws } => {
                rejection_sample(cards, &mut self.rng, max_draws).map(|run| run.cards)
            }
        }
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new(ShuffleStrategy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::build_deck;

    #[test]
    fn rejection_sampling_needs_at_least_one_draw_per_card() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let run = rejection_sample(&build_deck(), &mut rng, DEFAULT_MAX_DRAWS).expect("shuffle");
        assert_eq!(run.cards.len(), 52);
        assert!(run.draws >= 52);
    }

    #[test]
    fn rejection_sampling_gives_up_at_the_draw_limit() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let err = rejection_sample(&build_deck(), &mut rng, 30).unwrap_err();
        match err {
            ShuffleError::DrawLimitExceeded {
                draws,
                accepted,
                total,
            } => {
                assert_eq!(draws, 30);
                assert!(accepted <= 30);
                assert_eq!(total, 52);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn rejection_sampling_refuses_duplicate_input() {
        let mut cards = build_deck();
        cards.push(cards[0]);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let err = rejection_sample(&cards, &mut rng, DEFAULT_MAX_DRAWS).unwrap_err();
        assert_eq!(err, ShuffleError::DuplicateCard(cards[0]));
    }

    #[test]
    fn empty_input_shuffles_to_empty_output() {
        let mut shuffler = Shuffler::with_seed(
            ShuffleStrategy::RejectionSampling { max_draws: 10 },
            3,
        );
        assert!(shuffler.shuffle(&[]).expect("shuffle").is_empty());
    }

    #[test]
    fn seeded_shufflers_agree() {
        let deck = build_deck();
        let mut a = Shuffler::with_seed(ShuffleStrategy::FisherYates, 42);
        let mut b = Shuffler::with_seed(ShuffleStrategy::FisherYates, 42);
        assert_eq!(a.shuffle(&deck).unwrap(), b.shuffle(&deck).unwrap());
    }
}
