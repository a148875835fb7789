use crate::registry::GameRegistry;
use serde::Serialize;
use warp::reply::Json;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    active_games: usize,
}

pub fn health(registry: &GameRegistry) -> Json {
    warp::reply::json(&HealthBody {
        status: "ok",
        active_games: registry.active_games().len(),
    })
}
