use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Citizen,
    Liar,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Winner {
    Citizens,
    Liar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub is_revealed: bool,
    // Counts the decisive vote cast against this player in the current round.
    pub votes: u32,
}

impl Player {
    pub fn new(id: &str, name: &str) -> Self {
        Player {
            id: id.to_string(),
            name: name.to_string(),
            role: Role::Citizen,
            is_revealed: false,
            votes: 0,
        }
    }

    pub fn placeholder_name(position: usize) -> String {
        format!("플레이어 {position}")
    }

    pub fn is_liar(&self) -> bool {
        self.role == Role::Liar
    }

    pub(super) fn reset_for_round(&mut self, role: Role) {
        self.role = role;
        self.is_revealed = false;
        self.votes = 0;
    }
}
