//! HTTP client for the cardroom server's three game routes.

use crate::error::SimError;
use cardroom_engine::{Card, GameId, PlayerId};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Header the server sets on `GET /newgame/`.
pub const GAME_ID_HEADER: &str = "x-game-id";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShuffleReply {
    active_player_ids: Vec<PlayerId>,
}

#[derive(Debug, Clone, Deserialize)]
struct DealReply {
    hand: Vec<Card>,
}

/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct GameClient {
    http: reqwest::Client,
    base_url: String,
}

impl GameClient {
    pub fn new(base_url: &str) -> Result<Self, SimError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /newgame/`. Takes the id from the `x-game-id` header, falling
    /// back to the last line of the text body.
    pub async fn create_game(&self) -> Result<GameId, SimError> {
        let url = format!("{}/newgame/", self.base_url);
        tracing::debug!(url = %url, "requesting new game");

        let res = ensure_success(&url, self.http.get(&url).send().await?).await?;
        let from_header = res
            .headers()
            .get(GAME_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let body = res.text().await?;

        let game_id = from_header
            .or_else(|| game_id_from_body(&body))
            .ok_or(SimError::MissingGameId)?;
        tracing::info!(game_id = %game_id, "new game id");
        Ok(game_id)
    }

    /// `POST /shuffle/{game}/`, returning the seated player ids.
    pub async fn shuffle(&self, game_id: &str) -> Result<Vec<PlayerId>, SimError> {
        let url = format!("{}/shuffle/{}/", self.base_url, game_id);
        tracing::debug!(url = %url, "attempting to shuffle");

        let res = self
            .http
            .post(&url)
            .form(&[("gameID", game_id)])
            .send()
            .await?;
        let reply: ShuffleReply = decode(&url, res).await?;
        Ok(reply.active_player_ids)
    }

    /// `POST /deal/{game}/{player}/` with an empty `numToDeal`, so the
    /// server deals its default of one card.
    pub async fn deal(&self, game_id: &str, player_id: &str) -> Result<Vec<Card>, SimError> {
        let url = format!("{}/deal/{}/{}/", self.base_url, game_id, player_id);
        tracing::debug!(url = %url, "attempting to deal cards");

        let res = self
            .http
            .post(&url)
            .form(&[
                ("gameID", game_id),
                ("playerID", player_id),
                ("numToDeal", ""),
            ])
            .send()
            .await?;
        let reply: DealReply = decode(&url, res).await?;
        Ok(reply.hand)
    }
}

/// The body's last line, trimmed, or `None` if that line is blank.
pub fn game_id_from_body(body: &str) -> Option<GameId> {
    body.rsplit('\n')
        .next()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

async fn ensure_success(url: &str, res: reqwest::Response) -> Result<reqwest::Response, SimError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(SimError::Status {
        url: url.to_string(),
        status: status.as_u16(),
        body,
    })
}

async fn decode<T: DeserializeOwned>(url: &str, res: reqwest::Response) -> Result<T, SimError> {
    let res = ensure_success(url, res).await?;
    let bytes = res.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
