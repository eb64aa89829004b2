use lazy_static::lazy_static;
use prometheus::{IntCounter, IntGauge, Registry};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();
    pub static ref ACTIVE_GAMES: IntGauge =
        IntGauge::new("liar_game_active_games", "Active ongoing games").expect("metric cannot be created");
    pub static ref CONNECTED_DEVICES: IntGauge =
        IntGauge::new("liar_game_connected_devices", "Amount of devices connected to a game")
            .expect("metric cannot be created");
    pub static ref REMOTE_WORD_LISTS: IntCounter =
        IntCounter::new("liar_game_remote_word_lists", "Word lists served by the word source")
            .expect("metric cannot be created");
    pub static ref FALLBACK_WORD_LISTS: IntCounter =
        IntCounter::new("liar_game_fallback_word_lists", "Word lists served by the built-in table")
            .expect("metric cannot be created");
}

pub fn register_metrics() {
    REGISTRY
        .register(Box::new(ACTIVE_GAMES.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(CONNECTED_DEVICES.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(REMOTE_WORD_LISTS.clone()))
        .expect("collector cannot be registered");

    REGISTRY
        .register(Box::new(FALLBACK_WORD_LISTS.clone()))
        .expect("collector cannot be registered");
}
