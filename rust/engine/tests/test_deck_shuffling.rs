use std::collections::HashSet;

use cardroom_engine::cards::{all_ranks, all_suits, Card};
use cardroom_engine::deck::{build_deck, Deck, DECK_SIZE};
use cardroom_engine::shuffle::{
    fisher_yates, rejection_sample, ShuffleStrategy, Shuffler, DEFAULT_MAX_DRAWS,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn sorted(cards: &[Card]) -> Vec<Card> {
    let mut v = cards.to_vec();
    v.sort();
    v
}

#[test]
fn build_deck_has_52_unique_cards_over_4_suits_and_13_ranks() {
    let deck = build_deck();
    assert_eq!(deck.len(), DECK_SIZE);

    let unique: HashSet<Card> = deck.iter().copied().collect();
    assert_eq!(unique.len(), DECK_SIZE);

    let suits: HashSet<_> = deck.iter().map(|c| c.suit).collect();
    let ranks: HashSet<_> = deck.iter().map(|c| c.rank).collect();
    assert_eq!(suits.len(), all_suits().len());
    assert_eq!(ranks.len(), all_ranks().len());
}

#[test]
fn build_deck_is_deterministic() {
    assert_eq!(build_deck(), build_deck());
    assert_eq!(Deck::new().cards(), build_deck().as_slice());
}

#[test]
fn both_strategies_return_a_permutation() {
    let deck = build_deck();
    for seed in 0..20u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let fy = fisher_yates(&deck, &mut rng);
        assert_eq!(sorted(&fy), sorted(&deck), "fisher-yates seed {seed}");

        let rs = rejection_sample(&deck, &mut rng, DEFAULT_MAX_DRAWS).expect("rejection");
        assert_eq!(sorted(&rs.cards), sorted(&deck), "rejection seed {seed}");
    }
}

#[test]
fn partial_decks_keep_their_multiset() {
    let partial: Vec<Card> = build_deck().into_iter().step_by(3).collect();
    let mut shuffler = Shuffler::with_seed(
        ShuffleStrategy::RejectionSampling {
            max_draws: DEFAULT_MAX_DRAWS,
        },
        2024,
    );
    let shuffled = shuffler.shuffle(&partial).expect("shuffle");
    assert_eq!(shuffled.len(), partial.len());
    assert_eq!(sorted(&shuffled), sorted(&partial));
}

#[test]
fn shuffle_differs_with_different_seed() {
    let deck = build_deck();
    let mut a = Shuffler::with_seed(ShuffleStrategy::FisherYates, 1);
    let mut b = Shuffler::with_seed(ShuffleStrategy::FisherYates, 2);
    assert_ne!(
        a.shuffle(&deck).unwrap(),
        b.shuffle(&deck).unwrap(),
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn rejection_sampling_draw_count_stays_near_expectation() {
    // Coupon-collector expectation for 52 cards is ~236 draws.
    let deck = build_deck();
    let mut rng = ChaCha20Rng::seed_from_u64(314);
    let runs = 50;
    let total: usize = (0..runs)
        .map(|_| {
            rejection_sample(&deck, &mut rng, DEFAULT_MAX_DRAWS)
                .expect("shuffle")
                .draws
        })
        .sum();
    let mean = total / runs;
    assert!((120..600).contains(&mean), "mean draws {mean}");
}

#[test]
fn os_seeded_shuffler_still_permutes() {
    let deck = build_deck();
    let mut shuffler = Shuffler::default();
    assert_eq!(shuffler.strategy(), ShuffleStrategy::FisherYates);
    let shuffled = shuffler.shuffle(&deck).expect("shuffle");
    assert_eq!(sorted(&shuffled), sorted(&deck));
}
