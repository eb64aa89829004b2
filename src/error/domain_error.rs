use thiserror::Error;

use crate::game::game_fsm::GameFsmState;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("The game does not exist. GameId: '{0}'.")]
    GameDoesNotExist(String),
    #[error("Not enough players to start the game. ActualPlayers: '{0}', MinimumPlayers: '{1}'.")]
    NotEnoughPlayers(usize, usize),
    #[error("The roster is full. ActualPlayers: '{0}', MaximumPlayers: '{1}'.")]
    TooManyPlayers(usize, usize),
    #[error(
        "A player cannot be removed from a roster at its minimum size. ActualPlayers: '{0}', MinimumPlayers: '{1}'."
    )]
    CannotRemoveBelowMinimum(usize, usize),
    #[error("The player does not exist. PlayerId: '{0}'.")]
    PlayerDoesNotExist(String),
    #[error("The category does not exist. CategoryId: '{0}'.")]
    CategoryDoesNotExist(String),
    #[error("The command cannot be executed in the current state. Command: '{0}', ActualState: '{1}'.")]
    InvalidStateForCommand(String, GameFsmState),
    #[error("The round is still being prepared, the secret word has not arrived yet.")]
    RoundNotReady,
}
