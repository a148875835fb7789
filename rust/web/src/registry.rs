use cardroom_engine::{
    build_deck, Deck, DealOutcome, DeckError, Game, GameError, GameId, GameSnapshot,
    PlayerCountPolicy, PlayerId, ShuffleError, ShuffleOutcome, ShuffleStrategy, Shuffler,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use thiserror::Error;
use uuid::Uuid;

/// How the registry builds new games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrySettings {
    pub strategy: ShuffleStrategy,
    pub player_policy: PlayerCountPolicy,
    /// Base seed; game `n` (0-based creation order) is seeded with `seed + n`.
    pub seed: Option<u64>,
}

/// Process-wide map of live games.
///
/// The map lock is only held long enough to insert, remove, or clone an
/// entry handle. Every read-modify-write of a game happens under that game's
/// own lock, so requests against different games never wait on each other.
#[derive(Debug)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, Arc<GameEntry>>>,
    settings: RegistrySettings,
    created: AtomicU64,
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(RegistrySettings::default())
    }
}

impl GameRegistry {
    pub fn new(settings: RegistrySettings) -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            settings,
            created: AtomicU64::new(0),
        }
    }

    pub fn create(&self) -> Result<GameId, RegistryError> {
        let id = Uuid::new_v4().to_string();
        let ordinal = self.created.fetch_add(1, Ordering::Relaxed);

        let mut shuffler = match self.settings.seed {
            Some(seed) => Shuffler::with_seed(self.settings.strategy, seed.wrapping_add(ordinal)),
            None => Shuffler::new(self.settings.strategy),
        };

        let deck = shuffler.shuffle(&build_deck())?;
        let player_count = self.settings.player_policy.roll(shuffler.rng_mut());
        let player_ids: Vec<PlayerId> = (0..player_count)
            .map(|_| Uuid::new_v4().to_string())
            .collect();

        tracing::info!(
            game_id = %id,
            players = player_count,
            strategy = ?self.settings.strategy,
            "creating new game"
        );
        tracing::debug!(game_id = %id, player_ids = ?player_ids, "players seated");

        let entry = Arc::new(GameEntry::new(
            Game::new(id.clone(), player_ids, Deck::from_cards(deck)),
            shuffler,
        ));

        let mut guard = self
            .games
            .write()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        guard.insert(id.clone(), entry);

        Ok(id)
    }

    pub fn shuffle(&self, game_id: &str) -> Result<ShuffleOutcome, RegistryError> {
        let entry = self.entry(game_id)?;
        let mut table = entry.lock()?;
        let Table { game, shuffler } = &mut *table;

        let outcome = game.reshuffle(shuffler).map_err(|err| match err {
            GameError::Shuffle(err) => RegistryError::Shuffle(err),
            other => RegistryError::Game(other),
        })?;

        tracing::info!(
            game_id = %game_id,
            cards = outcome.current.len(),
            players = outcome.player_ids.len(),
            "deck reshuffled"
        );
        Ok(outcome)
    }

    /// Deals to one player. `None` and `Some(0)` both deal a single card.
    pub fn deal(
        &self,
        game_id: &str,
        player_id: &str,
        count: Option<usize>,
    ) -> Result<DealOutcome, RegistryError> {
        let entry = self.entry(game_id)?;
        let mut table = entry.lock()?;

        let outcome = table
            .game
            .deal(player_id, count.unwrap_or(1))
            .map_err(|err| match err {
                GameError::PlayerNotFound(player_id) => RegistryError::PlayerNotFound {
                    game_id: game_id.to_string(),
                    player_id,
                },
                GameError::Deck(DeckError::InsufficientCards {
                    requested,
                    remaining,
                }) => RegistryError::InsufficientCards {
                    game_id: game_id.to_string(),
                    requested,
                    remaining,
                },
                other => RegistryError::Game(other),
            })?;
        drop(table);

        for dealt in &outcome.dealt {
            tracing::debug!(
                game_id = %game_id,
                player_id = %player_id,
                remaining = dealt.remaining.len(),
                "{}",
                dealt.phrase
            );
        }
        tracing::info!(
            game_id = %game_id,
            player_id = %player_id,
            dealt = outcome.hand.len(),
            remaining = outcome.remaining,
            "cards dealt"
        );
        Ok(outcome)
    }

    pub fn snapshot(&self, game_id: &str) -> Result<GameSnapshot, RegistryError> {
        let entry = self.entry(game_id)?;
        let table = entry.lock()?;
        Ok(table.game.snapshot())
    }

    pub fn active_games(&self) -> Vec<GameId> {
        match self.games.read() {
            Ok(guard) => guard.keys().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn remove(&self, game_id: &str) -> Result<(), RegistryError> {
        let removed = match self.games.write() {
            Ok(mut guard) => guard.remove(game_id),
            Err(_) => return Err(RegistryError::StoragePoisoned),
        };
        match removed {
            Some(_) => {
                tracing::info!(game_id = %game_id, "game removed");
                Ok(())
            }
            None => Err(RegistryError::NotFound(game_id.to_string())),
        }
    }

    fn entry(&self, game_id: &str) -> Result<Arc<GameEntry>, RegistryError> {
        let guard = self
            .games
            .read()
            .map_err(|_| RegistryError::StoragePoisoned)?;
        guard
            .get(game_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(game_id.to_string()))
    }
}

#[derive(Debug)]
struct Table {
    game: Game,
    shuffler: Shuffler,
}

#[derive(Debug)]
struct GameEntry {
    table: Mutex<Table>,
}

impl GameEntry {
    fn new(game: Game, shuffler: Shuffler) -> Self {
        Self {
            table: Mutex::new(Table { game, shuffler }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table>, RegistryError> {
        self.table
            .lock()
            .map_err(|_| RegistryError::StoragePoisoned)
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Game not found: {0}")]
    NotFound(GameId),
    #[error("Player {player_id} not found in game {game_id}")]
    PlayerNotFound { game_id: GameId, player_id: PlayerId },
    #[error("Cannot deal {requested} card(s) in game {game_id}: only {remaining} remaining")]
    InsufficientCards {
        game_id: GameId,
        requested: usize,
        remaining: usize,
    },
    #[error("Shuffle failed: {0}")]
    Shuffle(#[from] ShuffleError),
    #[error("Game error: {0}")]
    Game(GameError),
    #[error("Game storage poisoned")]
    StoragePoisoned,
}

impl crate::errors::IntoErrorResponse for RegistryError {
    fn status_code(&self) -> warp::http::StatusCode {
        use warp::http::StatusCode;
        match self {
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::PlayerNotFound { .. } => StatusCode::NOT_FOUND,
            RegistryError::InsufficientCards { .. } => StatusCode::CONFLICT,
            RegistryError::Shuffle(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistryError::Game(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RegistryError::StoragePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RegistryError::NotFound(_) => "game_not_found",
            RegistryError::PlayerNotFound { .. } => "player_not_found",
            RegistryError::InsufficientCards { .. } => "insufficient_cards",
            RegistryError::Shuffle(_) => "shuffle_failed",
            RegistryError::Game(_) => "game_error",
            RegistryError::StoragePoisoned => "registry_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            RegistryError::NotFound(id) => Some(serde_json::json!({ "game_id": id })),
            RegistryError::PlayerNotFound { game_id, player_id } => Some(serde_json::json!({
                "game_id": game_id,
                "player_id": player_id
            })),
            RegistryError::InsufficientCards {
                game_id,
                requested,
                remaining,
            } => Some(serde_json::json!({
                "game_id": game_id,
                "requested": requested,
                "remaining": remaining
            })),
            _ => None,
        }
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        use crate::errors::ErrorSeverity;
        match self {
            RegistryError::StoragePoisoned => ErrorSeverity::Critical,
            RegistryError::Shuffle(_) | RegistryError::Game(_) => ErrorSeverity::Server,
            _ => ErrorSeverity::Client,
        }
    }
}
