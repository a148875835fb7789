//! Fan-out of simulated games.
//!
//! Each game runs on its own task: create, shuffle through a oneshot
//! handshake, then deal once to every seated player in order. Tasks share
//! nothing but the HTTP connection pool.

use crate::client::GameClient;
use crate::error::SimError;
use cardroom_engine::{Card, GameId, PlayerId};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// What one finished simulation saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRun {
    pub ordinal: usize,
    pub game_id: GameId,
    pub hands: Vec<(PlayerId, Vec<Card>)>,
}

pub type SimHandle = JoinHandle<Result<GameRun, SimError>>;

/// Shuffles on a separate task and hands the player ids back through a
/// oneshot created for this call.
pub fn async_shuffle(
    client: GameClient,
    game_id: GameId,
) -> oneshot::Receiver<Result<Vec<PlayerId>, SimError>> {
    let (tx, rx) = oneshot::channel();
    tokio::spawn(async move {
        let result = client.shuffle(&game_id).await;
        if tx.send(result).is_err() {
            tracing::warn!(game_id = %game_id, "shuffle result dropped; caller went away");
        }
    });
    rx
}

pub async fn simulate_game(client: GameClient, ordinal: usize) -> Result<GameRun, SimError> {
    let game_id = client.create_game().await?;

    let player_ids = async_shuffle(client.clone(), game_id.clone())
        .await
        .map_err(|_| SimError::ChannelClosed)??;
    tracing::info!(
        ordinal,
        game_id = %game_id,
        active_player_ids = ?player_ids,
        "deck shuffled"
    );

    let mut hands = Vec::with_capacity(player_ids.len());
    for player_id in player_ids {
        let hand = client.deal(&game_id, &player_id).await?;
        tracing::info!(
            game_id = %game_id,
            player_id = %player_id,
            hand = %describe_hand(&hand),
            "player's current hand"
        );
        hands.push((player_id, hand));
    }

    Ok(GameRun {
        ordinal,
        game_id,
        hands,
    })
}

/// Starts `count` simulations, numbered from 1. Failures are logged by the
/// task that hit them.
pub fn launch(client: &GameClient, count: usize) -> Vec<SimHandle> {
    (1..=count)
        .map(|ordinal| {
            let client = client.clone();
            tokio::spawn(async move {
                let result = simulate_game(client, ordinal).await;
                if let Err(err) = &result {
                    tracing::error!(ordinal, error = %err, "simulation failed");
                }
                result
            })
        })
        .collect()
}

pub async fn wait_all(handles: Vec<SimHandle>) -> Vec<Result<GameRun, SimError>> {
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.unwrap_or_else(|err| Err(SimError::from(err))));
    }
    results
}

fn describe_hand(hand: &[Card]) -> String {
    let cards: Vec<String> = hand.iter().map(Card::to_string).collect();
    format!("[{}]", cards.join(", "))
}
