//! Formation, defensive call, and per-play personnel selection.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::models::player::{Player, Position, PositionGroup, Role};
use crate::models::{FieldState, Team};

/// Offensive play family as called by the coordinator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlayCall {
    Run,
    Pass,
    Punt,
    FieldGoal,
}

impl PlayCall {
    pub fn is_run(&self) -> bool {
        matches!(self, PlayCall::Run)
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, PlayCall::Pass)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Formation {
    GoalLine,
    GoalLinePass,
    IFormation,
    TightFormation,
    ShotgunSpread,
    Singleback,
    Shotgun,
    SpecialTeams,
}

impl Formation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Formation::GoalLine => "goal_line",
            Formation::GoalLinePass => "goal_line_pass",
            Formation::IFormation => "i_formation",
            Formation::TightFormation => "tight_formation",
            Formation::ShotgunSpread => "shotgun_spread",
            Formation::Singleback => "singleback",
            Formation::Shotgun => "shotgun",
            Formation::SpecialTeams => "special_teams",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DefensiveCall {
    GoalLineDefense,
    RunCommit,
    NickelPass,
    Base43,
    Nickel,
}

impl DefensiveCall {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefensiveCall::GoalLineDefense => "goal_line_defense",
            DefensiveCall::RunCommit => "run_commit",
            DefensiveCall::NickelPass => "nickel_pass",
            DefensiveCall::Base43 => "base_43",
            DefensiveCall::Nickel => "nickel",
        }
    }

    /// Defensive line slots fielded by this call, inside-out.
    fn line_slots(&self) -> &'static [Position] {
        match self {
            DefensiveCall::GoalLineDefense => {
                &[Position::DE, Position::DT, Position::NT, Position::DT, Position::DE]
            }
            DefensiveCall::RunCommit => {
                &[Position::DE, Position::DT, Position::NT, Position::DE]
            }
            _ => &[Position::DE, Position::DT, Position::DT, Position::DE],
        }
    }

    fn linebacker_slots(&self) -> &'static [Position] {
        match self {
            DefensiveCall::GoalLineDefense => {
                &[Position::OLB, Position::MLB, Position::MLB, Position::OLB]
            }
            DefensiveCall::RunCommit | DefensiveCall::Base43 => {
                &[Position::OLB, Position::MLB, Position::OLB]
            }
            DefensiveCall::NickelPass | DefensiveCall::Nickel => &[Position::MLB, Position::OLB],
        }
    }
}

/// Fielded personnel for one play. The two shapes are mutually exclusive:
/// either unit-average ratings or concrete players, never a mix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Personnel {
    Aggregate {
        offense_ratings: HashMap<String, f32>,
        defense_ratings: HashMap<String, f32>,
    },
    Individual {
        running_back: Option<Player>,
        offensive_line: Vec<Player>,
        defensive_line: Vec<Player>,
        linebackers: Vec<Player>,
    },
}

/// A notable 1-on-1 inside the fielded personnel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Matchup {
    pub label: String,
    pub offense: Player,
    pub defense: Player,
}

/// Per-play snapshot of formation, defensive answer, and personnel.
/// One instance per play, discarded after the snap.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonnelPackage {
    pub formation: Formation,
    pub defensive_call: DefensiveCall,
    pub personnel: Personnel,
}

impl PersonnelPackage {
    /// Notable 1-on-1s: the back against the middle linebacker, and the
    /// interior offensive line against the interior defensive line paired by
    /// list order. Only meaningful in individual-player mode; aggregate
    /// packages have no matchups to surface.
    pub fn key_matchups(&self) -> Vec<Matchup> {
        let Personnel::Individual {
            running_back,
            offensive_line,
            defensive_line,
            linebackers,
        } = &self.personnel
        else {
            return Vec::new();
        };

        let mut matchups = Vec::new();

        if let Some(rb) = running_back {
            if let Some(mike) = linebackers.iter().find(|p| p.position == Position::MLB) {
                matchups.push(Matchup {
                    label: "backfield vs mike".to_string(),
                    offense: rb.clone(),
                    defense: mike.clone(),
                });
            }
        }

        let interior_ol: Vec<&Player> =
            offensive_line.iter().filter(|p| p.position.is_interior_line()).collect();
        let interior_dl: Vec<&Player> =
            defensive_line.iter().filter(|p| p.position.is_interior_line()).collect();
        for (ol, dl) in interior_ol.iter().zip(interior_dl.iter()) {
            matchups.push(Matchup {
                label: "interior line".to_string(),
                offense: (*ol).clone(),
                defense: (*dl).clone(),
            });
        }

        matchups
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct SelectorConfig {
    /// When set, concrete players are fielded; otherwise unit averages.
    pub individual_players: bool,
}

/// Chooses formation, defensive call, and personnel for a play.
/// Read-only over both rosters.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerSelector {
    pub config: SelectorConfig,
}

impl PlayerSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    /// Formation by situation, in priority order: goal line, short yardage,
    /// long yardage, then the play-type default.
    pub fn select_formation(&self, play_call: PlayCall, state: &FieldState) -> Formation {
        if state.is_goal_line() {
            return if play_call.is_run() { Formation::GoalLine } else { Formation::GoalLinePass };
        }
        if state.is_short_yardage() {
            return if play_call.is_run() {
                Formation::IFormation
            } else {
                Formation::TightFormation
            };
        }
        if state.is_long_yardage() {
            return Formation::ShotgunSpread;
        }
        match play_call {
            PlayCall::Run => Formation::Singleback,
            PlayCall::Pass => Formation::Shotgun,
            _ => Formation::SpecialTeams,
        }
    }

    /// Defensive answer to the offensive look, mirroring the same priority
    /// table.
    pub fn select_defensive_call(&self, formation: Formation, state: &FieldState) -> DefensiveCall {
        if state.is_goal_line() {
            return DefensiveCall::GoalLineDefense;
        }
        if state.is_short_yardage() {
            return DefensiveCall::RunCommit;
        }
        if state.is_long_yardage() {
            return DefensiveCall::NickelPass;
        }
        match formation {
            Formation::Shotgun | Formation::ShotgunSpread => DefensiveCall::Nickel,
            _ => DefensiveCall::Base43,
        }
    }

    /// Build the personnel package for one play. Never fails: missing roster
    /// spots produce fewer fielded players, or `None` for the back.
    pub fn get_personnel(
        &self,
        offense: &Team,
        defense: &Team,
        play_call: PlayCall,
        state: &FieldState,
    ) -> PersonnelPackage {
        let formation = self.select_formation(play_call, state);
        let defensive_call = self.select_defensive_call(formation, state);

        let personnel = if self.config.individual_players {
            self.individual_personnel(offense, defense, defensive_call)
        } else {
            Personnel::Aggregate {
                offense_ratings: aggregate_offense_ratings(offense),
                defense_ratings: aggregate_defense_ratings(defense),
            }
        };

        PersonnelPackage { formation, defensive_call, personnel }
    }

    fn individual_personnel(
        &self,
        offense: &Team,
        defense: &Team,
        defensive_call: DefensiveCall,
    ) -> Personnel {
        let mut used_offense = HashSet::new();
        let mut used_defense = HashSet::new();

        let running_back = pick_player(offense, Position::RB, &mut used_offense);
        if running_back.is_none() {
            log::warn!("team {} fielded no running back", offense.id);
        }

        let offensive_line = pick_unit(
            offense,
            &[Position::LT, Position::LG, Position::C, Position::RG, Position::RT],
            &mut used_offense,
        );
        let defensive_line = pick_unit(defense, defensive_call.line_slots(), &mut used_defense);
        let linebackers = pick_unit(defense, defensive_call.linebacker_slots(), &mut used_defense);

        Personnel::Individual { running_back, offensive_line, defensive_line, linebackers }
    }
}

/// One slot, with the fallback chain: exact position starter, then any
/// available player at the exact position, then the generic group tag.
fn pick_player(team: &Team, position: Position, used: &mut HashSet<u32>) -> Option<Player> {
    let starter = team
        .players
        .iter()
        .find(|p| {
            p.position == position
                && p.role == Role::Starter
                && p.is_available()
                && !used.contains(&p.id)
        })
        .or_else(|| {
            team.players
                .iter()
                .find(|p| p.position == position && p.is_available() && !used.contains(&p.id))
        })
        .or_else(|| {
            position.to_generic().and_then(|generic| {
                team.players
                    .iter()
                    .find(|p| p.position == generic && p.is_available() && !used.contains(&p.id))
            })
        })?;

    used.insert(starter.id);
    Some(starter.clone())
}

fn pick_unit(team: &Team, slots: &[Position], used: &mut HashSet<u32>) -> Vec<Player> {
    slots.iter().filter_map(|&slot| pick_player(team, slot, used)).collect()
}

fn group_average(team: &Team, group: PositionGroup, attribute: &str) -> Option<f32> {
    let players = team.players_in_group(group);
    if players.is_empty() {
        return None;
    }
    let sum: u32 = players.iter().map(|p| p.effective_attribute(attribute) as u32).sum();
    Some(sum as f32 / players.len() as f32)
}

fn aggregate_offense_ratings(team: &Team) -> HashMap<String, f32> {
    let mut ratings = HashMap::new();
    if let Some(v) = group_average(team, PositionGroup::Backfield, "vision") {
        ratings.insert("backfield".to_string(), v);
    }
    if let Some(v) = group_average(team, PositionGroup::OffensiveLine, "run_blocking") {
        ratings.insert("run_blocking".to_string(), v);
    }
    if let Some(v) = group_average(team, PositionGroup::OffensiveLine, "mobility") {
        ratings.insert("line_mobility".to_string(), v);
    }
    ratings
}

fn aggregate_defense_ratings(team: &Team) -> HashMap<String, f32> {
    let mut ratings = HashMap::new();
    if let Some(v) = group_average(team, PositionGroup::DefensiveLine, "gap_discipline") {
        ratings.insert("gap_discipline".to_string(), v);
    }
    if let Some(v) = group_average(team, PositionGroup::DefensiveLine, "run_stopping") {
        ratings.insert("run_stopping".to_string(), v);
    }
    if let Some(v) = group_average(team, PositionGroup::Linebacker, "pursuit") {
        ratings.insert("pursuit".to_string(), v);
    }
    if let Some(v) = group_average(team, PositionGroup::Linebacker, "discipline") {
        ratings.insert("discipline".to_string(), v);
    }
    ratings
}
