use tokio::sync::broadcast::{self, error::RecvError};
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::game::actor::{GameAction, GameCommand, GameEvent, GameWideEvent};

#[derive(Clone, Debug)]
pub struct GameClient {
    pub(super) game_tx: Sender<GameCommand>,
}

impl GameClient {
    pub async fn connect(&self) -> Result<GameWideEventReceiver, Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();

        self.game_tx
            .send(GameCommand::Connect { response_tx: tx })
            .await
            // The game is still registered in the GameFactory but its actor already stopped.
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "The Game is not alive. Can't connect the device. Error: '{error}'"
                ))
            })?;

        match rx.await {
            Ok(GameEvent::Connected { broadcast_rx }) => {
                Ok(GameWideEventReceiver { broadcast_rx })
            }
            Ok(GameEvent::Error { error }) => Err(error),
            _ => Err(Error::log_and_create_internal(
                "Device sent a GameCommand::Connect to Game, but Game channel died.",
            )),
        }
    }

    pub async fn send_action(&self, action: GameAction) -> Result<(), Error> {
        let (tx, rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) = oneshot::channel();
        let action_name = action.to_string();

        self.game_tx
            .send(GameCommand::Act {
                action,
                response_tx: tx,
            })
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "Tried to send {action_name} but GameActor is not listening. Error: {error}."
                ))
            })?;

        match rx.await {
            Ok(GameEvent::Ok) => Ok(()),
            Ok(GameEvent::Error { error }) => Err(error),
            Ok(unexpected_event) => Err(Error::log_and_create_internal(&format!(
                "Received an unexpected GameEvent for {action_name}. GameEvent: '{unexpected_event}'."
            ))),
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "Sent {action_name} to Game, but Game channel died. Error: '{error}'."
            ))),
        }
    }
}

pub struct GameWideEventReceiver {
    broadcast_rx: broadcast::Receiver<GameWideEvent>,
}

impl GameWideEventReceiver {
    pub async fn next(&mut self) -> Result<GameWideEvent, Error> {
        loop {
            match self.broadcast_rx.recv().await {
                Ok(event) => return Ok(event),
                Err(RecvError::Lagged(skipped)) => {
                    log::warn!("The device fell behind the Game, skipped {skipped} events.");
                }
                Err(error) => {
                    return Err(Error::log_and_create_internal(&format!(
                        "The broadcast channel with the Game has been closed. Error: {error}."
                    )))
                }
            }
        }
    }
}
