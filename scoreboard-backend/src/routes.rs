use crate::AppState;
use crate::error::AppError;
use crate::validation;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;
use scoreboard_store::{NewPlayer, Player, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

#[derive(Deserialize)]
pub(crate) struct CreatePlayerRequest {
    name: String,
    country: String,
    score: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlayerResponse {
    id: u64,
    name: String,
    country: String,
    score: i64,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            name: player.name.to_string(),
            country: player.country.to_string(),
            score: player.score,
        }
    }
}

#[debug_handler]
pub(crate) async fn list_players(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let players = match state.store.list_by_rank() {
        Ok(players) => players,
        // Empty leaderboard is an empty list, not an error
        Err(StoreError::NoPlayers) => Vec::new(),
        Err(err) => return Err(err.into()),
    };

    let players: Vec<PlayerResponse> = players.into_iter().map(PlayerResponse::from).collect();
    Ok(Json(players))
}

#[debug_handler]
pub(crate) async fn player_by_rank(
    State(state): State<Arc<AppState>>,
    Path(rank): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let rank = validation::parse_rank(&rank)?;

    let player = state.store.get_by_rank(rank)?;

    Ok(Json(PlayerResponse::from(player)))
}

pub(crate) async fn random_player(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    match state.store.random() {
        Ok(player) => Ok(Json(PlayerResponse::from(player)).into_response()),
        Err(StoreError::NoPlayers) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => Err(err.into()),
    }
}

pub(crate) async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = validation::parse_player_id(&id)?;

    let player = state.store.get(id)?;

    Ok(Json(PlayerResponse::from(player)))
}

#[debug_handler]
pub(crate) async fn create_player(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreatePlayerRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    let new = NewPlayer {
        name: validation::validate_player_name(&payload.name)?,
        country: validation::validate_country(&payload.country)?,
        score: payload.score,
    };

    let player = state.store.create(new);
    tracing::info!(id = player.id, name = %player.name, "Player created");

    // Tell the client where the new player can be fetched
    let location = format!("/player/{}", player.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PlayerResponse::from(player)),
    ))
}

#[debug_handler]
pub(crate) async fn update_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = validation::parse_player_id(&id)?;
    let Json(payload) = payload?;
    let update = validation::parse_update(&payload)?;

    let player = state.store.update(id, update)?;

    Ok(Json(PlayerResponse::from(player)))
}

pub(crate) async fn delete_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = validation::parse_player_id(&id)?;

    state.store.delete(id)?;
    tracing::info!(id, "Player deleted");

    Ok(StatusCode::OK)
}
