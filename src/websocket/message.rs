use serde::{Deserialize, Serialize};

use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::actor::{GameAction, GameWideEvent};
use crate::game::view::Screen;

#[derive(Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageIn {
    #[serde(rename_all = "camelCase")]
    AddPlayer {
        #[serde(default)]
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    RemovePlayer { player_id: String },
    StartCategorySelection,
    BackToSetup,
    #[serde(rename_all = "camelCase")]
    ChooseCategory { category_id: String },
    NextReveal,
    StartVoting,
    #[serde(rename_all = "camelCase")]
    Vote { player_id: String },
    #[serde(rename_all = "camelCase")]
    GuessWord {
        #[serde(default)]
        guess: String,
    },
    PlayAgain,
}

impl From<WsMessageIn> for GameAction {
    fn from(message: WsMessageIn) -> Self {
        match message {
            WsMessageIn::AddPlayer { name } => GameAction::AddPlayer { name },
            WsMessageIn::RemovePlayer { player_id } => GameAction::RemovePlayer { player_id },
            WsMessageIn::StartCategorySelection => GameAction::StartCategorySelection,
            WsMessageIn::BackToSetup => GameAction::BackToSetup,
            WsMessageIn::ChooseCategory { category_id } => {
                GameAction::ChooseCategory { category_id }
            }
            WsMessageIn::NextReveal => GameAction::NextReveal,
            WsMessageIn::StartVoting => GameAction::StartVoting,
            WsMessageIn::Vote { player_id } => GameAction::Vote { player_id },
            WsMessageIn::GuessWord { guess } => GameAction::GuessWord { guess },
            WsMessageIn::PlayAgain => GameAction::PlayAgain,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum WsMessageOut {
    Error {
        r#type: String,
        title: String,
        detail: String,
    },
    GameState {
        screen: Screen,
    },
    #[serde(rename_all = "camelCase")]
    Timer {
        remaining_seconds: u32,
    },
}

impl From<GameWideEvent> for WsMessageOut {
    fn from(event: GameWideEvent) -> Self {
        match event {
            GameWideEvent::GameState { screen } => WsMessageOut::GameState { screen },
            GameWideEvent::Timer { remaining_seconds } => WsMessageOut::Timer { remaining_seconds },
        }
    }
}

impl From<&Error> for WsMessageOut {
    fn from(error: &Error) -> Self {
        let (r#type, title) = match error {
            Error::Domain(domain_error) => match domain_error {
                DomainError::GameDoesNotExist(_) => {
                    ("GAME_DOES_NOT_EXIST", "The game does not exist")
                }
                DomainError::NotEnoughPlayers(_, _) => {
                    ("NOT_ENOUGH_PLAYERS", "More players are needed to start")
                }
                DomainError::TooManyPlayers(_, _) => ("TOO_MANY_PLAYERS", "The roster is full"),
                DomainError::CannotRemoveBelowMinimum(_, _) => (
                    "CANNOT_REMOVE_BELOW_MINIMUM",
                    "The roster is already at its minimum size",
                ),
                DomainError::PlayerDoesNotExist(_) => {
                    ("PLAYER_DOES_NOT_EXIST", "The player does not exist")
                }
                DomainError::CategoryDoesNotExist(_) => {
                    ("CATEGORY_DOES_NOT_EXIST", "The category does not exist")
                }
                DomainError::InvalidStateForCommand(_, _) => {
                    ("INVALID_STATE", "The action is not available right now")
                }
                DomainError::RoundNotReady => ("ROUND_NOT_READY", "The cards are still being dealt"),
            },
            Error::Internal(_) => ("INTERNAL_SERVER", "Internal Server error"),
            Error::UnprocessableMessage(_, _) => {
                ("UNPROCESSABLE_MESSAGE", "The message could not be processed")
            }
            Error::WebsocketClosed(_) => ("WEBSOCKET_CLOSED", "The device websocket is closed"),
        };
        WsMessageOut::Error {
            r#type: r#type.to_string(),
            title: title.to_string(),
            detail: error.to_string(),
        }
    }
}
