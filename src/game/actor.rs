use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender, WeakSender},
};
use tokio::time;

use crate::category::Category;
use crate::config::GameSettings;
use crate::error::Error;
use crate::game::game_fsm::GameFsmState;
use crate::game::timer::{CountdownTimer, Tick};
use crate::game::view::{self, Screen};
use crate::game::{Game, RoundId};
use crate::game_factory::actor_client::GameFactoryClient;
use crate::metrics::ACTIVE_GAMES;
use crate::word_source::{self, fallback, WordSource};

use super::actor_client::GameClient;

pub struct GameActor {
    game: Game,
    game_rx: Receiver<GameCommand>,
    game_tx: WeakSender<GameCommand>,
    broadcast_tx: broadcast::Sender<GameWideEvent>,
    game_factory: GameFactoryClient,
    word_source: Arc<dyn WordSource>,
    timer: CountdownTimer,
    inactivity_timeout: Duration,
}

impl GameActor {
    pub fn spawn(
        id: &str,
        settings: GameSettings,
        word_source: Arc<dyn WordSource>,
        game_factory: GameFactoryClient,
    ) -> GameClient {
        let inactivity_timeout = settings.inactivity_timeout();
        let game = Game::new(id, settings);
        let (game_tx, game_rx): (Sender<GameCommand>, Receiver<GameCommand>) = mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<GameWideEvent>,
            broadcast::Receiver<GameWideEvent>,
        ) = broadcast::channel(32);

        tokio::spawn(
            GameActor {
                game,
                game_rx,
                game_tx: game_tx.downgrade(),
                broadcast_tx,
                game_factory,
                word_source,
                timer: CountdownTimer::new(),
                inactivity_timeout,
            }
            .start(),
        );

        GameClient { game_tx }
    }

    async fn start(mut self) {
        ACTIVE_GAMES.inc();

        loop {
            match time::timeout(self.inactivity_timeout, self.game_rx.recv()).await {
                Err(_) => {
                    if self.broadcast_tx.receiver_count() == 0 {
                        log::info!(
                            "No device connected to game {} after {} seconds. Stopping game actor.",
                            self.game.id(),
                            self.inactivity_timeout.as_secs()
                        );
                        break;
                    }
                }
                Ok(None) => {
                    log::info!("Game channel has been dropped. Stopping game actor.");
                    break;
                }
                Ok(Some(command)) => {
                    let previous_state = *self.game.state();
                    let should_send_game_state = match command {
                        GameCommand::Connect { response_tx } => {
                            let event = GameEvent::Connected {
                                broadcast_rx: self.broadcast_tx.subscribe(),
                            };
                            if let Err(event) = response_tx.send(event) {
                                log::error!("Sent {event} to a device but the response channel is closed.");
                            }
                            true
                        }
                        GameCommand::Act {
                            action,
                            response_tx,
                        } => {
                            let action_name = action.to_string();
                            let event = match self.act(action) {
                                Ok(()) => GameEvent::Ok,
                                Err(error) => GameEvent::Error { error },
                            };
                            let is_ok = matches!(event, GameEvent::Ok);
                            if let Err(event) = response_tx.send(event) {
                                log::error!("Sent {event} for action {action_name} but the response channel is closed.");
                            }
                            is_ok
                        }
                        GameCommand::ApplyWordList { round_id, words } => {
                            self.game.apply_word_list(round_id, words)
                        }
                        GameCommand::TimerTick { generation } => self.on_timer_tick(generation),
                    };
                    self.sync_timer(previous_state);
                    if should_send_game_state {
                        self.send_game_state();
                    }
                }
            }
        }

        self.stop_game().await;
        ACTIVE_GAMES.dec();
    }

    fn act(&mut self, action: GameAction) -> Result<(), Error> {
        match action {
            GameAction::AddPlayer { name } => self.game.add_player(&name).map(|_| ()),
            GameAction::RemovePlayer { player_id } => self.game.remove_player(&player_id),
            GameAction::StartCategorySelection => self.game.start_category_selection(),
            GameAction::BackToSetup => self.game.back_to_setup(),
            GameAction::ChooseCategory { category_id } => self
                .game
                .choose_category(&category_id)
                .map(|(round_id, category)| self.fetch_word_list(round_id, category)),
            GameAction::NextReveal => self.game.next_reveal(),
            GameAction::StartVoting => self.game.start_voting(),
            GameAction::Vote { player_id } => self.game.vote(&player_id),
            GameAction::GuessWord { guess } => self.game.guess_word(&guess),
            GameAction::PlayAgain => self.game.play_again(),
        }
    }

    /// The word list arrives later as a [`GameCommand::ApplyWordList`] tagged with the round id.
    fn fetch_word_list(&mut self, round_id: RoundId, category: Category) {
        let Some(game_tx) = self.game_tx.upgrade() else {
            log::error!(
                "The Game channel is closed, can't fetch the word list. Using the built-in list. GameId: '{}'.",
                self.game.id()
            );
            self.game
                .apply_word_list(round_id, fallback::fallback_words(category.name));
            return;
        };

        let word_source = Arc::clone(&self.word_source);
        tokio::spawn(async move {
            let words = word_source::words_for_category(word_source.as_ref(), category.name).await;
            if let Err(error) = game_tx
                .send(GameCommand::ApplyWordList { round_id, words })
                .await
            {
                log::error!("Fetched a word list but the Game channel is closed. RoundId: '{round_id}', Error: '{error}'.");
            }
        });
    }

    fn on_timer_tick(&mut self, generation: u64) -> bool {
        match self.timer.tick(generation) {
            Tick::Stale => false,
            Tick::Running(remaining_seconds) => {
                self.broadcast(GameWideEvent::Timer { remaining_seconds });
                false
            }
            Tick::Expired => {
                self.broadcast(GameWideEvent::Timer {
                    remaining_seconds: 0,
                });
                match self.game.time_up() {
                    Ok(moved_to_voting) => moved_to_voting,
                    Err(error) => {
                        log::error!(
                            "Could not move to voting after the countdown. GameId: '{}', Error: '{error}'.",
                            self.game.id()
                        );
                        false
                    }
                }
            }
        }
    }

    /// Starts the countdown when the discussion begins and stops it when the game leaves it.
    fn sync_timer(&mut self, previous_state: GameFsmState) {
        let state = *self.game.state();
        if state == previous_state {
            return;
        }

        if state == GameFsmState::Discussion {
            match self.game_tx.upgrade() {
                Some(game_tx) => self.timer.start(self.game.discussion_seconds(), game_tx),
                None => log::error!(
                    "The Game channel is closed, can't start the countdown. GameId: '{}'.",
                    self.game.id()
                ),
            }
        } else if previous_state == GameFsmState::Discussion {
            self.timer.stop();
        }
    }

    fn send_game_state(&self) {
        self.broadcast(GameWideEvent::GameState {
            screen: view::render(&self.game, self.timer.remaining_seconds()),
        });
    }

    fn broadcast(&self, event: GameWideEvent) {
        // fails only when no device is connected
        if self.broadcast_tx.send(event).is_err() {
            log::info!(
                "No device connected to game {}, the update is dropped.",
                self.game.id()
            );
        }
    }

    async fn stop_game(mut self) {
        self.timer.stop();
        let game_id = self.game.id();
        if let Err(error) = self.game_factory.remove_game(game_id).await {
            log::error!("The GameFactory channel is closed, can't remove the Game. GameId: '{game_id}', Error: '{error}'.");
        }
    }
}

#[derive(Debug)]
pub(crate) enum GameCommand {
    Connect {
        response_tx: OneshotSender<GameEvent>,
    },
    Act {
        action: GameAction,
        response_tx: OneshotSender<GameEvent>,
    },
    ApplyWordList {
        round_id: RoundId,
        words: Vec<String>,
    },
    TimerTick {
        generation: u64,
    },
}

/// Everything the device can ask the game to do.
#[derive(Clone, Debug, PartialEq)]
pub enum GameAction {
    AddPlayer { name: String },
    RemovePlayer { player_id: String },
    StartCategorySelection,
    BackToSetup,
    ChooseCategory { category_id: String },
    NextReveal,
    StartVoting,
    Vote { player_id: String },
    GuessWord { guess: String },
    PlayAgain,
}

impl Display for GameAction {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameAction::AddPlayer { .. } => "AddPlayer",
            GameAction::RemovePlayer { .. } => "RemovePlayer",
            GameAction::StartCategorySelection => "StartCategorySelection",
            GameAction::BackToSetup => "BackToSetup",
            GameAction::ChooseCategory { .. } => "ChooseCategory",
            GameAction::NextReveal => "NextReveal",
            GameAction::StartVoting => "StartVoting",
            GameAction::Vote { .. } => "Vote",
            GameAction::GuessWord { .. } => "GuessWord",
            GameAction::PlayAgain => "PlayAgain",
        };
        write!(formatter, "GameAction::{name}")
    }
}

#[derive(Debug)]
pub(crate) enum GameEvent {
    Connected {
        broadcast_rx: broadcast::Receiver<GameWideEvent>,
    },
    Ok,
    Error {
        error: Error,
    },
}

impl Display for GameEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                GameEvent::Connected { .. } => "GameEvent::Connected".to_string(),
                GameEvent::Ok => "GameEvent::Ok".to_string(),
                GameEvent::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}

#[derive(Clone, Debug)]
pub enum GameWideEvent {
    GameState { screen: Screen },
    Timer { remaining_seconds: u32 },
}
