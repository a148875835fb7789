use crate::errors::{ApiError, IntoErrorResponse};
use crate::registry::GameRegistry;
use cardroom_engine::{Card, GameId, GameSnapshot, PlayerId};
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use url::form_urlencoded;
use warp::http::header::CONTENT_TYPE;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

/// Header carrying the new game id on `GET /newgame/`.
pub const GAME_ID_HEADER: &str = "x-game-id";

/// Form (or query) field holding the number of cards to deal.
pub const NUM_TO_DEAL_FIELD: &str = "numToDeal";

const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShuffledState {
    pub previous: Vec<Card>,
    pub current: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShuffleResponse {
    pub active_player_ids: Vec<PlayerId>,
    pub shuffled_state: ShuffledState,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DealResponse {
    pub hand: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameListResponse {
    pub games: Vec<GameId>,
}

/// Starts a new game.
///
/// # HTTP Method and Path
/// - **Method**: GET
/// - **Path**: `/newgame/`
///
/// # Response Format
/// - **Success (200 OK)**: plain text whose last line is the game id, plus the
///   same id in the `x-game-id` header:
/// ```text
/// Game Started!
///  Playing Game with an ID of:
///  9b2d4c1e-...
/// ```
/// - **Error (500)**: the initial shuffle failed or storage is poisoned
pub async fn create_game(registry: Arc<GameRegistry>) -> Response {
    match registry.create() {
        Ok(game_id) => {
            let body = format!("Game Started!\n Playing Game with an ID of:\n {game_id}");
            reply::with_header(body, GAME_ID_HEADER, game_id).into_response()
        }
        Err(err) => ApiError::from(err).into_http_response(),
    }
}

/// Reshuffles the remaining deck of a game.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/shuffle/{gameID}/`
///
/// # Response Format
/// - **Success (200 OK)**:
/// ```json
/// {
///   "activePlayerIds": ["uuid", "uuid"],
///   "shuffledState": { "previous": [{"value": 1, "symbol": "♡"}], "current": [...] }
/// }
/// ```
/// - **Error (400)**: `missing_identifier`
/// - **Error (404)**: `game_not_found`
/// - **Error (500)**: `shuffle_failed`, `encoding_error`
pub async fn shuffle_game(registry: Arc<GameRegistry>, game_id: String) -> Response {
    respond(shuffle_inner(&registry, &game_id))
}

fn shuffle_inner(registry: &GameRegistry, game_id: &str) -> Result<Response, ApiError> {
    let game_id = require_id(game_id, "Game ID")?;
    tracing::debug!(game_id = %game_id, "shuffle requested");

    let outcome = registry.shuffle(game_id)?;
    json_response(
        StatusCode::OK,
        &ShuffleResponse {
            active_player_ids: outcome.player_ids,
            shuffled_state: ShuffledState {
                previous: outcome.previous,
                current: outcome.current,
            },
        },
    )
}

/// Deals cards to one player, replacing their hand.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/deal/{gameID}/{playerID}/`
///
/// # Request Format
/// Optional `numToDeal` form or query field. Missing, empty, or `0` deals one
/// card. A body must be `application/x-www-form-urlencoded`.
///
/// # Response Format
/// - **Success (200 OK)**: `{"hand": [{"value": 12, "symbol": "♠"}]}`
/// - **Error (400)**: `missing_identifier`, `invalid_count`, `invalid_body`
/// - **Error (404)**: `game_not_found`, `player_not_found`
/// - **Error (409)**: `insufficient_cards`
/// - **Error (413)**: body larger than the form limit
/// - **Error (415)**: `unsupported_media_type`
pub async fn deal_cards(
    registry: Arc<GameRegistry>,
    game_id: String,
    player_id: String,
    params: Result<HashMap<String, String>, ApiError>,
) -> Response {
    respond(params.and_then(|params| deal_inner(&registry, &game_id, &player_id, &params)))
}

fn deal_inner(
    registry: &GameRegistry,
    game_id: &str,
    player_id: &str,
    params: &HashMap<String, String>,
) -> Result<Response, ApiError> {
    let game_id = require_id(game_id, "Game ID")?;
    let player_id = require_id(player_id, "Player ID")?;
    let count = parse_count(params.get(NUM_TO_DEAL_FIELD).map(String::as_str))?;
    tracing::debug!(game_id = %game_id, player_id = %player_id, count = ?count, "deal requested");

    let outcome = registry.deal(game_id, player_id, count)?;
    json_response(StatusCode::OK, &DealResponse { hand: outcome.hand })
}

pub async fn list_games(registry: Arc<GameRegistry>) -> Response {
    respond(json_response(
        StatusCode::OK,
        &GameListResponse {
            games: registry.active_games(),
        },
    ))
}

pub async fn get_game(registry: Arc<GameRegistry>, game_id: String) -> Response {
    let result = require_id(&game_id, "Game ID")
        .and_then(|id| registry.snapshot(id).map_err(ApiError::from))
        .and_then(|snapshot: GameSnapshot| json_response(StatusCode::OK, &snapshot));
    respond(result)
}

/// Splits the path after a route prefix into percent-decoded segments.
///
/// One trailing slash is allowed; every other empty segment is kept as `""`.
pub fn path_ids(tail: &str) -> Vec<String> {
    if tail.is_empty() {
        return Vec::new();
    }
    let mut segments: Vec<&str> = tail.split('/').collect();
    if segments.len() > 1 && segments.last() == Some(&"") {
        segments.pop();
    }
    segments
        .into_iter()
        .map(|segment| percent_decode_str(segment).decode_utf8_lossy().into_owned())
        .collect()
}

/// Merges the query string with a urlencoded body; body fields win.
///
/// An empty body is accepted with any content type. A non-empty body must be
/// `application/x-www-form-urlencoded` and valid UTF-8.
pub fn parse_deal_params(
    query: &str,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<HashMap<String, String>, ApiError> {
    let mut params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    if body.is_empty() {
        return Ok(params);
    }

    let media_type = content_type
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if media_type != FORM_MEDIA_TYPE {
        let shown = if media_type.is_empty() {
            "none".to_string()
        } else {
            media_type
        };
        return Err(ApiError::UnsupportedMediaType(shown));
    }

    std::str::from_utf8(body).map_err(|err| ApiError::InvalidBody(err.to_string()))?;
    params.extend(form_urlencoded::parse(body).into_owned());
    Ok(params)
}

fn require_id<'a>(raw: &'a str, field: &'static str) -> Result<&'a str, ApiError> {
    let id = raw.trim();
    if id.is_empty() {
        Err(ApiError::MissingIdentifier(field))
    } else {
        Ok(id)
    }
}

fn parse_count(raw: Option<&str>) -> Result<Option<usize>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ApiError::InvalidCount(value.to_string())),
    }
}

fn json_response<T>(status: StatusCode, body: &T) -> Result<Response, ApiError>
where
    T: Serialize,
{
    let bytes = serde_json::to_vec(body)?;
    Ok(reply::with_status(
        reply::with_header(bytes, CONTENT_TYPE, "application/json"),
        status,
    )
    .into_response())
}

fn respond(result: Result<Response, ApiError>) -> Response {
    result.unwrap_or_else(|err| err.into_http_response())
}
