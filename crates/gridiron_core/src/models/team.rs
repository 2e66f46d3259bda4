use serde::{Deserialize, Serialize};

use super::player::{Player, Position, PositionGroup};

/// Roster view for one team. The pipeline never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Team {
    pub id: u32,
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), players: Vec::new() }
    }

    pub fn add_player(&mut self, mut player: Player) {
        player.team_id = Some(self.id);
        self.players.push(player);
    }

    /// Every player listed at exactly this position, in roster order.
    pub fn players_at(&self, position: Position) -> Vec<&Player> {
        self.players.iter().filter(|p| p.position == position).collect()
    }

    /// Every player whose position classifies into the group.
    pub fn players_in_group(&self, group: PositionGroup) -> Vec<&Player> {
        self.players.iter().filter(|p| p.position.group() == group).collect()
    }

    pub fn running_backs(&self) -> Vec<&Player> {
        self.players_at(Position::RB)
    }

    pub fn offensive_line(&self) -> Vec<&Player> {
        self.players_in_group(PositionGroup::OffensiveLine)
    }

    pub fn defensive_line(&self) -> Vec<&Player> {
        self.players_in_group(PositionGroup::DefensiveLine)
    }

    pub fn linebackers(&self) -> Vec<&Player> {
        self.players_in_group(PositionGroup::Linebacker)
    }
}
