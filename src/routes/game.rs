use std::sync::Arc;

use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::connection::ConnectionActor;
use crate::websocket::{close, send_error};

use super::AppState;

#[derive(Serialize)]
pub struct CreateGameResponse {
    id: String,
}

pub async fn create(State(state): State<Arc<AppState>>) -> Response {
    match state.game_factory.create_game().await {
        Ok(id) => (StatusCode::OK, Json(CreateGameResponse { id })).into_response(),
        Err(error) => (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response(),
    }
}

pub async fn connect_device_to_websocket(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
    websocket_upgrade: WebSocketUpgrade,
) -> Response {
    websocket_upgrade.on_upgrade(move |mut websocket| async move {
        match state.game_factory.get_game(&game_id).await {
            Ok(game) => {
                ConnectionActor::create(game_id, game, websocket, state.client_timeout).await
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    })
}
