use std::fmt;

use rust_fsm::state_machine;

/*
 * Setup
 * ChoosingCategory
 * RevealingRoles     one card per player, the word list may still be on its way
 * Discussion         countdown running
 * Voting
 *    the accused is the liar   -> LiarChance -> EndOfGame
 *    the accused is a citizen  -> EndOfGame
 * EndOfGame -> Setup, roster kept
 */
state_machine! {
    derive(Debug, Clone, Copy, PartialEq)
    pub GameFsm(Setup)

    Setup => {
        StartCategorySelection => ChoosingCategory
    },
    ChoosingCategory => {
        ChooseCategory => RevealingRoles,
        BackToSetup => Setup,
    },
    RevealingRoles => {
        AllPlayersRevealed => Discussion
    },
    Discussion => {
        StartVoting => Voting
    },
    Voting => {
        CatchLiar => LiarChance,
        AccuseCitizen => EndOfGame,
    },
    LiarChance => {
        SubmitGuess => EndOfGame
    },
    EndOfGame => {
        PlayAgain => Setup
    }
}

impl fmt::Display for GameFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
