use serde::Serialize;

use crate::category::Category;
use crate::game::game_fsm::GameFsmState;
use crate::game::player::{Player, Winner};
use crate::game::Game;

/// What the shared device shows. Exactly one screen per game state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Screen {
    #[serde(rename_all = "camelCase")]
    Setup {
        players: Vec<PlayerView>,
        can_add_player: bool,
        can_remove_player: bool,
        can_start: bool,
        min_players: usize,
        max_players: usize,
    },
    #[serde(rename_all = "camelCase")]
    Category { categories: Vec<Category> },
    #[serde(rename_all = "camelCase")]
    Reveal {
        category: Option<Category>,
        player_name: String,
        player_index: usize,
        total_players: usize,
        card: RevealCard,
    },
    #[serde(rename_all = "camelCase")]
    Play {
        category: Option<Category>,
        players: Vec<PlayerView>,
        remaining_seconds: u32,
    },
    #[serde(rename_all = "camelCase")]
    Vote { candidates: Vec<PlayerView> },
    #[serde(rename_all = "camelCase")]
    LiarChance { caught_player_name: String },
    #[serde(rename = "RESULT", rename_all = "camelCase")]
    Outcome {
        winner: Option<Winner>,
        target_word: String,
        liar_name: String,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevealCard {
    /// The word list of the round has not arrived yet.
    Loading,
    Liar,
    Citizen { word: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        PlayerView {
            id: player.id.clone(),
            name: player.name.clone(),
        }
    }
}

pub fn render(game: &Game, remaining_seconds: u32) -> Screen {
    match game.state() {
        GameFsmState::Setup => Screen::Setup {
            players: player_views(game),
            can_add_player: game.can_add_player(),
            can_remove_player: game.can_remove_player(),
            can_start: game.can_start(),
            min_players: game.settings().min_players,
            max_players: game.settings().max_players,
        },
        GameFsmState::ChoosingCategory => Screen::Category {
            categories: Category::all().to_vec(),
        },
        GameFsmState::RevealingRoles => {
            let current_player = game.current_player();
            let card = match current_player {
                Some(player) if game.is_round_ready() => {
                    if player.is_liar() {
                        RevealCard::Liar
                    } else {
                        RevealCard::Citizen {
                            word: game.target_word().to_string(),
                        }
                    }
                }
                _ => RevealCard::Loading,
            };
            Screen::Reveal {
                category: game.selected_category().copied(),
                player_name: current_player
                    .map(|player| player.name.clone())
                    .unwrap_or_default(),
                player_index: game.current_player_index(),
                total_players: game.players().len(),
                card,
            }
        }
        GameFsmState::Discussion => Screen::Play {
            category: game.selected_category().copied(),
            players: player_views(game),
            remaining_seconds,
        },
        GameFsmState::Voting => Screen::Vote {
            candidates: player_views(game),
        },
        GameFsmState::LiarChance => Screen::LiarChance {
            caught_player_name: game
                .caught_liar()
                .map(|player| player.name.clone())
                .unwrap_or_default(),
        },
        GameFsmState::EndOfGame => Screen::Outcome {
            winner: game.winner(),
            target_word: game.target_word().to_string(),
            liar_name: game
                .liar()
                .map(|player| player.name.clone())
                .unwrap_or_default(),
        },
    }
}

fn player_views(game: &Game) -> Vec<PlayerView> {
    game.players().iter().map(PlayerView::from).collect()
}
