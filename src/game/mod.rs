pub mod actor;
pub mod actor_client;
pub mod game_fsm;
pub mod player;
mod timer;
pub mod view;

use rand::distributions::{Alphanumeric, DistString};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_fsm::StateMachine;

use crate::category::Category;
use crate::config::GameSettings;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::game_fsm::{GameFsm, GameFsmInput, GameFsmState};
use crate::game::player::{Player, Role, Winner};
use crate::word_source::fallback;

/// Identifies one category selection. Word lists fetched for an older round are discarded.
pub type RoundId = u64;

pub struct Game {
    id: String,
    settings: GameSettings,
    fsm: StateMachine<GameFsm>,
    players: Vec<Player>,
    selected_category: Option<Category>,
    target_word: String,
    liar_id: Option<String>,
    current_player_index: usize,
    winner: Option<Winner>,
    caught_liar_id: Option<String>,
    round_id: RoundId,
    rng: StdRng,
}

impl Game {
    const PLAYER_ID_LENGTH: usize = 9;

    pub fn new(id: &str, settings: GameSettings) -> Self {
        Game::with_rng(id, settings, StdRng::from_entropy())
    }

    fn with_rng(id: &str, settings: GameSettings, rng: StdRng) -> Self {
        let players = (1..=settings.min_players)
            .map(|position| Player::new(&position.to_string(), &Player::placeholder_name(position)))
            .collect();

        Self {
            id: id.to_string(),
            settings,
            fsm: StateMachine::new(),
            players,
            selected_category: None,
            target_word: String::new(),
            liar_id: None,
            current_player_index: 0,
            winner: None,
            caught_liar_id: None,
            round_id: 0,
            rng,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &GameFsmState {
        self.fsm.state()
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn selected_category(&self) -> Option<&Category> {
        self.selected_category.as_ref()
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn liar_id(&self) -> Option<&str> {
        self.liar_id.as_deref()
    }

    pub fn liar(&self) -> Option<&Player> {
        self.liar_id
            .as_deref()
            .and_then(|liar_id| self.get_player(liar_id))
    }

    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn caught_liar_id(&self) -> Option<&str> {
        self.caught_liar_id.as_deref()
    }

    pub fn caught_liar(&self) -> Option<&Player> {
        self.caught_liar_id
            .as_deref()
            .and_then(|caught_liar_id| self.get_player(caught_liar_id))
    }

    pub fn round_id(&self) -> RoundId {
        self.round_id
    }

    /// The secret word and the liar are assigned once the word list of the round arrives.
    pub fn is_round_ready(&self) -> bool {
        !self.target_word.is_empty() && self.liar_id.is_some()
    }

    pub fn discussion_seconds(&self) -> u32 {
        let players = u32::try_from(self.players.len()).unwrap_or(u32::MAX);
        players.saturating_mul(self.settings.seconds_per_player)
    }

    pub fn can_add_player(&self) -> bool {
        self.players.len() < self.settings.max_players
    }

    pub fn can_remove_player(&self) -> bool {
        self.players.len() > self.settings.min_players
    }

    pub fn can_start(&self) -> bool {
        self.players.len() >= self.settings.min_players
    }

    pub fn add_player(&mut self, name: &str) -> Result<String, Error> {
        self.ensure_state("AddPlayer", GameFsmState::Setup)?;
        if !self.can_add_player() {
            return Err(Error::Domain(DomainError::TooManyPlayers(
                self.players.len(),
                self.settings.max_players,
            )));
        }

        let name = match name.trim() {
            "" => Player::placeholder_name(self.players.len() + 1),
            name => name.to_string(),
        };
        let id = self.create_unique_player_id();
        self.players.push(Player::new(&id, &name));
        Ok(id)
    }

    pub fn remove_player(&mut self, player_id: &str) -> Result<(), Error> {
        self.ensure_state("RemovePlayer", GameFsmState::Setup)?;
        if !self.can_remove_player() {
            return Err(Error::Domain(DomainError::CannotRemoveBelowMinimum(
                self.players.len(),
                self.settings.min_players,
            )));
        }

        let position = self.get_player_position(player_id)?;
        self.players.remove(position);
        Ok(())
    }

    pub fn start_category_selection(&mut self) -> Result<(), Error> {
        self.ensure_state("StartCategorySelection", GameFsmState::Setup)?;
        if !self.can_start() {
            return Err(Error::Domain(DomainError::NotEnoughPlayers(
                self.players.len(),
                self.settings.min_players,
            )));
        }
        self.process_event(&GameFsmInput::StartCategorySelection)
    }

    pub fn back_to_setup(&mut self) -> Result<(), Error> {
        self.ensure_state("BackToSetup", GameFsmState::ChoosingCategory)?;
        self.process_event(&GameFsmInput::BackToSetup)
    }

    /// Moves to the reveal step right away. The caller fetches the word list for the returned
    /// category and hands it back through [`Game::apply_word_list`] with the returned round id.
    pub fn choose_category(&mut self, category_id: &str) -> Result<(RoundId, Category), Error> {
        self.ensure_state("ChooseCategory", GameFsmState::ChoosingCategory)?;
        let category = Category::find(category_id).ok_or_else(|| {
            Error::Domain(DomainError::CategoryDoesNotExist(category_id.to_string()))
        })?;

        self.process_event(&GameFsmInput::ChooseCategory)?;
        self.clear_round();
        for player in self.players.iter_mut() {
            player.reset_for_round(Role::Citizen);
        }
        self.selected_category = Some(category);
        self.round_id += 1;

        Ok((self.round_id, category))
    }

    /// Returns false when the word list belongs to a round that is no longer current.
    pub fn apply_word_list(&mut self, round_id: RoundId, words: Vec<String>) -> bool {
        if round_id != self.round_id
            || self.state() != &GameFsmState::RevealingRoles
            || self.is_round_ready()
        {
            log::info!(
                "Discarding a stale word list. GameId: '{}', WordListRound: '{}', CurrentRound: '{}', State: '{}'.",
                self.id,
                round_id,
                self.round_id,
                self.state()
            );
            return false;
        }

        let words: Vec<String> = words
            .into_iter()
            .map(|word| word.trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();
        let words = if words.is_empty() {
            let category_name = self
                .selected_category
                .map(|category| category.name)
                .unwrap_or_default();
            log::warn!(
                "Received an empty word list, using the built-in list. GameId: '{}', Category: '{}'.",
                self.id,
                category_name
            );
            fallback::fallback_words(category_name)
        } else {
            words
        };

        let word_index = self.rng.gen_range(0..words.len());
        let liar_index = self.rng.gen_range(0..self.players.len());
        self.assign_round(words[word_index].clone(), liar_index);
        true
    }

    fn assign_round(&mut self, word: String, liar_index: usize) {
        for (index, player) in self.players.iter_mut().enumerate() {
            let role = if index == liar_index {
                Role::Liar
            } else {
                Role::Citizen
            };
            player.reset_for_round(role);
        }
        self.liar_id = self
            .players
            .get(liar_index)
            .map(|player| player.id.clone());
        self.target_word = word;
    }

    pub fn next_reveal(&mut self) -> Result<(), Error> {
        self.ensure_state("NextReveal", GameFsmState::RevealingRoles)?;
        if !self.is_round_ready() {
            return Err(Error::Domain(DomainError::RoundNotReady));
        }

        if let Some(player) = self.players.get_mut(self.current_player_index) {
            player.is_revealed = true;
        }
        if self.current_player_index + 1 < self.players.len() {
            self.current_player_index += 1;
            Ok(())
        } else {
            self.current_player_index = 0;
            self.process_event(&GameFsmInput::AllPlayersRevealed)
        }
    }

    pub fn start_voting(&mut self) -> Result<(), Error> {
        self.ensure_state("StartVoting", GameFsmState::Discussion)?;
        self.process_event(&GameFsmInput::StartVoting)
    }

    /// Called when the countdown reaches zero. Only moves the game forward while the
    /// discussion is still going on.
    pub fn time_up(&mut self) -> Result<bool, Error> {
        if self.state() == &GameFsmState::Discussion {
            self.process_event(&GameFsmInput::StartVoting)?;
            Ok(true)
        } else {
            log::info!(
                "Countdown expired outside of the discussion, ignoring it. GameId: '{}', State: '{}'.",
                self.id,
                self.state()
            );
            Ok(false)
        }
    }

    pub fn vote(&mut self, target_id: &str) -> Result<(), Error> {
        self.ensure_state("Vote", GameFsmState::Voting)?;
        let position = self.get_player_position(target_id)?;
        self.players[position].votes += 1;

        if self.liar_id.as_deref() == Some(target_id) {
            self.caught_liar_id = Some(target_id.to_string());
            self.process_event(&GameFsmInput::CatchLiar)
        } else {
            self.winner = Some(Winner::Liar);
            self.process_event(&GameFsmInput::AccuseCitizen)
        }
    }

    /// An empty guess is the liar passing on the last chance.
    pub fn guess_word(&mut self, guess: &str) -> Result<(), Error> {
        self.ensure_state("GuessWord", GameFsmState::LiarChance)?;
        self.winner = if guess.trim() == self.target_word {
            Some(Winner::Liar)
        } else {
            Some(Winner::Citizens)
        };
        self.process_event(&GameFsmInput::SubmitGuess)
    }

    pub fn play_again(&mut self) -> Result<(), Error> {
        self.ensure_state("PlayAgain", GameFsmState::EndOfGame)?;
        self.process_event(&GameFsmInput::PlayAgain)?;
        self.clear_round();
        Ok(())
    }

    fn clear_round(&mut self) {
        self.selected_category = None;
        self.target_word = String::new();
        self.liar_id = None;
        self.current_player_index = 0;
        self.winner = None;
        self.caught_liar_id = None;
    }

    fn get_player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == player_id)
    }

    fn get_player_position(&self, player_id: &str) -> Result<usize, Error> {
        self.players
            .iter()
            .position(|player| player.id == player_id)
            .ok_or_else(|| Error::Domain(DomainError::PlayerDoesNotExist(player_id.to_string())))
    }

    fn create_unique_player_id(&mut self) -> String {
        loop {
            let id = Alphanumeric.sample_string(&mut self.rng, Game::PLAYER_ID_LENGTH);
            if self.get_player(&id).is_none() {
                return id;
            }
        }
    }

    fn ensure_state(&self, command: &str, expected: GameFsmState) -> Result<(), Error> {
        if self.state() == &expected {
            Ok(())
        } else {
            Err(Error::Domain(DomainError::InvalidStateForCommand(
                command.to_string(),
                *self.state(),
            )))
        }
    }

    fn process_event(&mut self, event: &GameFsmInput) -> Result<(), Error> {
        self.fsm.consume(event).map(|_| ()).map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))
        })
    }
}
