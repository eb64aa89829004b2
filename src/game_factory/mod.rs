pub mod actor;
pub mod actor_client;

use rand::distributions::{Alphanumeric, DistString};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::GameSettings;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::actor::GameActor;
use crate::game::actor_client::GameClient;
use crate::game_factory::actor_client::GameFactoryClient;
use crate::word_source::WordSource;

pub struct GameFactory {
    game_channels: HashMap<String, GameClient>,
    game_settings: GameSettings,
    word_source: Arc<dyn WordSource>,
}

impl GameFactory {
    pub fn new(game_settings: GameSettings, word_source: Arc<dyn WordSource>) -> Self {
        log::info!(
            "GameFactory ready. MinimumPlayers: '{}', MaximumPlayers: '{}', SecondsPerPlayer: '{}'.",
            game_settings.min_players,
            game_settings.max_players,
            game_settings.seconds_per_player
        );
        GameFactory {
            game_channels: HashMap::default(),
            game_settings,
            word_source,
        }
    }

    pub fn create_new_game(&mut self, game_factory: GameFactoryClient) -> String {
        let id = self.create_unique_game_id();
        self.game_channels.insert(
            id.clone(),
            GameActor::spawn(
                &id,
                self.game_settings.clone(),
                Arc::clone(&self.word_source),
                game_factory,
            ),
        );

        id
    }

    pub fn remove_game(&mut self, game_id: &str) -> Option<GameClient> {
        self.game_channels.remove(game_id)
    }

    pub fn get_game(&self, game_id: &str) -> Result<&GameClient, Error> {
        match self.game_channels.get(game_id) {
            Some(game) => Ok(game),
            None => Err(Error::Domain(DomainError::GameDoesNotExist(
                game_id.to_string(),
            ))),
        }
    }

    fn create_unique_game_id(&self) -> String {
        loop {
            let id = Alphanumeric
                .sample_string(&mut rand::thread_rng(), 5)
                .replace('O', "P")
                .replace('0', "1")
                .replace('I', "J")
                .replace('l', "m");
            if !self.game_channels.contains_key(&id) {
                return id;
            }
        }
    }
}
