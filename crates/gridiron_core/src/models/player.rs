use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Rating assumed for an attribute the roster pipeline never filled in.
/// 50 is league average on the 0-100 scale.
pub const DEFAULT_RATING: u8 = 50;

/// On-field position. Closed set; membership tests that used to be string
/// lists live here as predicates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    // Offense
    QB,
    RB,
    FB,
    WR,
    TE,
    LT,
    LG,
    C,
    RG,
    RT,
    // Defense
    DE,
    DT,
    NT,
    MLB,
    OLB,
    CB,
    FS,
    SS,
    // Special teams
    K,
    P,
    // Generic group tags used by depth charts that do not pin a slot
    OL,
    DL,
    LB,
    DB,
}

/// Position family used for grouping and selector fallbacks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PositionGroup {
    Backfield,
    Receiver,
    OffensiveLine,
    DefensiveLine,
    Linebacker,
    Secondary,
    SpecialTeams,
}

impl Position {
    /// Classify a position into its group.
    pub fn group(&self) -> PositionGroup {
        match self {
            Position::QB | Position::RB | Position::FB => PositionGroup::Backfield,
            Position::WR | Position::TE => PositionGroup::Receiver,
            Position::LT
            | Position::LG
            | Position::C
            | Position::RG
            | Position::RT
            | Position::OL => PositionGroup::OffensiveLine,
            Position::DE | Position::DT | Position::NT | Position::DL => {
                PositionGroup::DefensiveLine
            }
            Position::MLB | Position::OLB | Position::LB => PositionGroup::Linebacker,
            Position::CB | Position::FS | Position::SS | Position::DB => PositionGroup::Secondary,
            Position::K | Position::P => PositionGroup::SpecialTeams,
        }
    }

    pub fn is_offensive_line(&self) -> bool {
        self.group() == PositionGroup::OffensiveLine
    }

    pub fn is_defensive_line(&self) -> bool {
        self.group() == PositionGroup::DefensiveLine
    }

    pub fn is_linebacker(&self) -> bool {
        self.group() == PositionGroup::Linebacker
    }

    /// Interior line on either side of the ball. Used to pair up the
    /// inside blocking matchups.
    pub fn is_interior_line(&self) -> bool {
        matches!(self, Position::LG | Position::C | Position::RG | Position::DT | Position::NT)
    }

    /// Collapse a specific slot into the generic tag a depth chart may carry.
    pub fn to_generic(&self) -> Option<Position> {
        match self.group() {
            PositionGroup::OffensiveLine => Some(Position::OL),
            PositionGroup::DefensiveLine => Some(Position::DL),
            PositionGroup::Linebacker => Some(Position::LB),
            PositionGroup::Secondary => Some(Position::DB),
            _ => None,
        }
    }
}

/// Depth-chart role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[default]
    Starter,
    Backup,
    Reserve,
}

/// Player data as seen by the play pipeline.
///
/// Attributes arrive already adjusted for fatigue and injury by the roster
/// layer; this crate only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u32>,
    pub position: Position,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub attributes: HashMap<String, u8>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, position: Position, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            team_id: None,
            position,
            role,
            attributes: HashMap::new(),
            available: true,
        }
    }

    pub fn with_team(mut self, team_id: u32) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: u8) -> Self {
        self.attributes.insert(name.into(), value.min(100));
        self
    }

    /// Effective rating for an attribute on the 0-100 scale.
    /// Missing attributes read as league average rather than zero.
    pub fn effective_attribute(&self, name: &str) -> u8 {
        self.attributes.get(name).copied().unwrap_or(DEFAULT_RATING).min(100)
    }

    pub fn is_available(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_covers_interior_line() {
        assert!(Position::LG.is_interior_line());
        assert!(Position::NT.is_interior_line());
        assert!(!Position::LT.is_interior_line());
        assert!(!Position::DE.is_interior_line());
    }

    #[test]
    fn generic_tags_map_to_their_own_group() {
        assert_eq!(Position::OL.group(), PositionGroup::OffensiveLine);
        assert_eq!(Position::RT.to_generic(), Some(Position::OL));
        assert_eq!(Position::MLB.to_generic(), Some(Position::LB));
        assert_eq!(Position::RB.to_generic(), None);
    }

    #[test]
    fn missing_attribute_reads_as_average() {
        let p = Player::new(1, "Test Back", Position::RB, Role::Starter);
        assert_eq!(p.effective_attribute("vision"), DEFAULT_RATING);

        let p = p.with_attribute("vision", 90);
        assert_eq!(p.effective_attribute("vision"), 90);
    }
}
