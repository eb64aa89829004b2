use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;

use crate::config::Config;
use crate::game_factory::actor_client::GameFactoryClient;

mod category;
mod game;
mod health;
mod metrics;

pub struct AppState {
    pub game_factory: GameFactoryClient,
    /// A device that sends nothing, not even a ping, for this long is disconnected.
    pub client_timeout: Duration,
}

pub fn create_router(config: &Config) -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::get))
        .route("/metrics", get(metrics::metrics_handler))
        .route("/categories", get(category::list))
        .route("/game", post(game::create))
        .route("/game/:game_id/ws", get(game::connect_device_to_websocket))
        .layer(if config.allow_cors {
            log::info!("CorsLayer Permissive");
            CorsLayer::permissive()
        } else {
            CorsLayer::default()
        })
}
