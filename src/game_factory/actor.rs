use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};
use tokio::sync::oneshot::Sender as OneshotSender;

use crate::config::GameSettings;
use crate::error::Error;
use crate::game::actor_client::GameClient;
use crate::game_factory::actor_client::GameFactoryClient;
use crate::game_factory::GameFactory;
use crate::word_source::WordSource;

pub struct GameFactoryActor {
    game_factory: GameFactory,
    game_factory_rx: Receiver<GameFactoryCommand>,
    game_factory_tx: Sender<GameFactoryCommand>,
}

impl GameFactoryActor {
    /// Runs the GameFactory Actor in background and returns a Client to communicate with it
    pub fn spawn(
        game_settings: GameSettings,
        word_source: Arc<dyn WordSource>,
    ) -> GameFactoryClient {
        let game_factory = GameFactory::new(game_settings, word_source);
        let (game_factory_tx, game_factory_rx): (
            Sender<GameFactoryCommand>,
            Receiver<GameFactoryCommand>,
        ) = mpsc::channel(512);

        tokio::spawn(
            GameFactoryActor {
                game_factory,
                game_factory_rx,
                game_factory_tx: game_factory_tx.clone(),
            }
            .start(),
        );

        GameFactoryClient { game_factory_tx }
    }

    async fn start(mut self) {
        while let Some(command) = self.game_factory_rx.recv().await {
            match command {
                GameFactoryCommand::CreateGame { response_channel } => {
                    let game_id = self.game_factory.create_new_game(GameFactoryClient {
                        game_factory_tx: self.game_factory_tx.clone(),
                    });
                    log::info!("Game created. GameId: '{game_id}'.");
                    GameFactoryActor::respond(
                        response_channel,
                        GameFactoryResponse::GameCreated { game_id },
                    );
                }
                GameFactoryCommand::RemoveGame { game_id } => {
                    if self.game_factory.remove_game(&game_id).is_some() {
                        log::info!("Game removed. GameId: '{game_id}'.");
                    }
                }
                GameFactoryCommand::GetGameActor {
                    game_id,
                    response_channel,
                } => {
                    let response = match self.game_factory.get_game(&game_id) {
                        Ok(game) => GameFactoryResponse::GameActor { game: game.clone() },
                        Err(error) => GameFactoryResponse::Error { error },
                    };
                    GameFactoryActor::respond(response_channel, response);
                }
            }
        }
    }

    fn respond(response_channel: OneshotSender<GameFactoryResponse>, response: GameFactoryResponse) {
        if let Err(response) = response_channel.send(response) {
            log::error!("Sent {response} but the response channel is closed.");
        }
    }
}

#[derive(Debug)]
pub(crate) enum GameFactoryCommand {
    CreateGame {
        response_channel: OneshotSender<GameFactoryResponse>,
    },
    RemoveGame {
        game_id: String,
    },
    GetGameActor {
        game_id: String,
        response_channel: OneshotSender<GameFactoryResponse>,
    },
}

#[allow(clippy::enum_variant_names)]
#[derive(Debug)]
pub(crate) enum GameFactoryResponse {
    GameCreated { game_id: String },
    GameActor { game: GameClient },
    Error { error: Error },
}

impl Display for GameFactoryResponse {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                GameFactoryResponse::GameCreated { game_id } =>
                    format!("GameCreated(game_id: {game_id})"),
                GameFactoryResponse::GameActor { game: _ } => "GameActor".to_string(),
                GameFactoryResponse::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}
