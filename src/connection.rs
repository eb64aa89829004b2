use axum::extract::ws::{Message, WebSocket};
use std::time::Duration;
use tokio::select;
use tokio::time::error::Elapsed;
use tokio::time::{timeout_at, Instant};

use crate::error::Error;
use crate::game::actor::{GameAction, GameWideEvent};
use crate::game::actor_client::{GameClient, GameWideEventReceiver};
use crate::metrics::CONNECTED_DEVICES;
use crate::websocket::message::WsMessageOut;
use crate::websocket::{close, parse_message, send_error, send_message, send_message_string};

/// Bridges one websocket to a game. Several devices may watch the same game,
/// every one of them can drive it.
pub struct ConnectionActor {
    game_id: String,
    game: GameClient,
    game_wide_event_receiver: GameWideEventReceiver,
    websocket: WebSocket,
    client_timeout: Duration,
    last_message_at: Instant,
}

impl ConnectionActor {
    pub async fn create(
        game_id: String,
        game: GameClient,
        mut websocket: WebSocket,
        client_timeout: Duration,
    ) {
        match game.connect().await {
            Ok(game_wide_event_receiver) => {
                ConnectionActor {
                    game_id,
                    game,
                    game_wide_event_receiver,
                    websocket,
                    client_timeout,
                    last_message_at: Instant::now(),
                }
                .start()
                .await
            }
            Err(error) => {
                send_error(&mut websocket, &error).await;
                close(websocket).await;
            }
        }
    }

    async fn start(mut self) {
        CONNECTED_DEVICES.inc();
        log::info!("Device connected to game {}.", self.game_id);

        loop {
            select! {
                game_wide_event = self.game_wide_event_receiver.next() => {
                    if let Err(error) = self.receive_game_wide_event(game_wide_event).await {
                        send_error(&mut self.websocket, &error).await;
                        if ConnectionActor::should_close_websocket(&error) {
                            break;
                        }
                    }
                },
                // only frames from the device move the deadline, game events do not
                websocket_message = timeout_at(self.last_message_at + self.client_timeout, self.websocket.recv()) => {
                    if websocket_message.is_ok() {
                        self.last_message_at = Instant::now();
                    }
                    if let Err(error) = self.receive_websocket_message(websocket_message).await {
                        send_error(&mut self.websocket, &error).await;
                        if ConnectionActor::should_close_websocket(&error) {
                            break;
                        }
                    }
                },
            }
        }

        close(self.websocket).await;
        CONNECTED_DEVICES.dec();
    }

    fn should_close_websocket(error: &Error) -> bool {
        match error {
            Error::Internal(_) => true,
            Error::WebsocketClosed(_) => true,
            Error::UnprocessableMessage(_, _) => false,
            Error::Domain(_) => false,
        }
    }

    async fn receive_game_wide_event(
        &mut self,
        game_wide_event: Result<GameWideEvent, Error>,
    ) -> Result<(), Error> {
        let event = game_wide_event?;
        send_message(&mut self.websocket, &WsMessageOut::from(event)).await
    }

    async fn receive_websocket_message(
        &mut self,
        websocket_message: Result<Option<Result<Message, axum::Error>>, Elapsed>,
    ) -> Result<(), Error> {
        match websocket_message {
            Ok(Some(Ok(Message::Text(txt)))) => match txt.as_str() {
                "ping" => send_message_string(&mut self.websocket, "pong").await,
                message => {
                    let action: GameAction = parse_message(message)?.into();
                    self.game.send_action(action).await
                }
            },
            // browser said "close"
            Ok(Some(Ok(Message::Close(_)))) => {
                self.log_connection_lost("browser sent 'Close' websocket frame");
                Err(Error::WebsocketClosed(
                    "browser sent 'Close' websocket frame".to_string(),
                ))
            }
            // websocket was closed
            Ok(None) => {
                self.log_connection_lost("other end of websocket was closed abruptly");
                Err(Error::WebsocketClosed(
                    "other end of websocket was closed abruptly".to_string(),
                ))
            }
            // nothing received from the device, not even a ping
            Err(_) => {
                self.log_connection_lost("connection timed out; missing 'ping' messages");
                Err(Error::WebsocketClosed(
                    "connection timed out; missing 'ping' messages".to_string(),
                ))
            }
            Ok(Some(Err(error))) => Err(Error::UnprocessableMessage(
                error.to_string(),
                "Message cannot be loaded".to_string(),
            )),
            // Ping and Pong frames are answered by axum
            Ok(Some(Ok(Message::Ping(_) | Message::Pong(_)))) => Ok(()),
            Ok(Some(Ok(Message::Binary(_)))) => Err(Error::UnprocessableMessage(
                "Unsupported message type".to_string(),
                "Binary".to_string(),
            )),
        }
    }

    fn log_connection_lost(&self, reason: &str) {
        log::info!(
            "Connection with a device of game {} lost due to: {}. Stopping connection actor.",
            self.game_id,
            reason,
        );
    }
}
