use std::collections::HashSet;

use cardroom_engine::deck::{Deck, DECK_SIZE};
use cardroom_engine::game::Game;
use cardroom_engine::shuffle::{ShuffleStrategy, Shuffler};
use cardroom_engine::GameError;

fn seated(ids: &[&str]) -> Game {
    Game::new(
        "table-1",
        ids.iter().map(|s| s.to_string()).collect(),
        Deck::new(),
    )
}

#[test]
fn shuffle_then_deal_two_takes_the_top_of_the_new_deck() {
    let mut game = seated(&["p1", "p2", "p3"]);
    let mut shuffler = Shuffler::with_seed(ShuffleStrategy::FisherYates, 77);

    let shuffled = game.reshuffle(&mut shuffler).expect("reshuffle");
    let top_two: Vec<_> = shuffled.current.iter().rev().take(2).copied().collect();

    let outcome = game.deal(&shuffled.player_ids[0], 2).expect("deal");
    assert_eq!(outcome.hand, top_two);
    assert_eq!(game.deck().len(), 50);
    assert_eq!(outcome.remaining, 50);
}

#[test]
fn hands_across_players_never_overlap() {
    let mut game = seated(&["p1", "p2", "p3", "p4"]);
    let mut shuffler = Shuffler::with_seed(
        ShuffleStrategy::RejectionSampling { max_draws: 10_000 },
        9,
    );
    game.reshuffle(&mut shuffler).expect("reshuffle");

    for id in ["p1", "p2", "p3", "p4"] {
        game.deal(id, 5).expect("deal");
    }

    let mut seen = HashSet::new();
    for player in game.players() {
        for card in player.hand() {
            assert!(seen.insert(*card), "{card} dealt twice");
        }
    }
    for card in game.deck().cards() {
        assert!(seen.insert(*card), "{card} both dealt and in deck");
    }
    assert_eq!(seen.len(), DECK_SIZE);
}

#[test]
fn accounting_holds_through_redeals_and_reshuffles() {
    let mut game = seated(&["p1", "p2"]);
    let mut shuffler = Shuffler::with_seed(ShuffleStrategy::FisherYates, 3);

    for round in 0..5 {
        game.reshuffle(&mut shuffler).expect("reshuffle");
        game.deal("p1", 2).expect("deal p1");
        game.deal("p2", 3).expect("deal p2");
        assert_eq!(game.cards_accounted_for(), DECK_SIZE, "round {round}");
    }
    assert_eq!(game.deck().len(), DECK_SIZE - 25);
}

#[test]
fn dealing_out_the_deck_then_overdrawing_fails_cleanly() {
    let mut game = seated(&["solo"]);
    game.deal("solo", DECK_SIZE).expect("deal everything");
    assert!(game.deck().is_empty());

    let err = game.deal("solo", 0).unwrap_err();
    assert!(matches!(err, GameError::Deck(_)));
    assert_eq!(game.player("solo").unwrap().hand().len(), DECK_SIZE);
}

#[test]
fn snapshot_serializes_with_camel_case_keys() {
    let mut game = seated(&["p1"]);
    game.deal("p1", 1).expect("deal");
    let json = serde_json::to_value(game.snapshot()).expect("serialize");

    assert_eq!(json["gameId"], "table-1");
    assert_eq!(json["deck"].as_array().unwrap().len(), 51);
    assert_eq!(json["players"][0]["hand"].as_array().unwrap().len(), 1);
    assert_eq!(json["discarded"], 0);
}
