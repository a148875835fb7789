pub mod game;
pub mod health;

pub use game::{
    create_game, deal_cards, get_game, list_games, parse_deal_params, path_ids, shuffle_game,
    DealResponse, GameListResponse, ShuffleResponse, ShuffledState, GAME_ID_HEADER,
    NUM_TO_DEAL_FIELD,
};
pub use health::health;
