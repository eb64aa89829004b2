use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::game_factory::actor::GameFactoryActor;
use crate::routes::{self, AppState};
use crate::word_source::gemini::GeminiWordSource;
use crate::word_source::WordSource;

pub async fn create_web_server(config: Config, listener: TcpListener) {
    if config.word_source.api_key.is_none() {
        log::warn!("No word source api key configured. Every round uses the built-in word lists.");
    }
    let word_source: Arc<dyn WordSource> = Arc::new(GeminiWordSource::new(&config.word_source));
    let state = Arc::new(AppState {
        game_factory: GameFactoryActor::spawn(config.game.clone(), word_source),
        client_timeout: config.game.client_timeout(),
    });

    let router = routes::create_router(&config).with_state(state);

    match listener.local_addr() {
        Ok(address) => log::info!("Listening on {address}"),
        Err(error) => log::warn!("Could not read the listening address. Error: '{error}'."),
    }
    if let Err(error) = axum::serve(listener, router).await {
        log::error!("The web server stopped. Error: '{error}'.");
    }
}
