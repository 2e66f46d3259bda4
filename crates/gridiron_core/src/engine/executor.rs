//! Stochastic execution of a run concept against fielded personnel.
//!
//! Pure except for the threaded RNG: factor extraction and the probability
//! model are deterministic functions of the personnel, and every branch is
//! reached through explicit threshold checks rather than error paths.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::concepts::{
    ConceptType, FactorDirection, RunConcept, SuccessFactor, DIVE, POWER_O,
};
use crate::models::player::{Player, DEFAULT_RATING};
use crate::models::{FieldState, PlayOutcome};

/// Breakaway odds once a run is already winning up front.
const BREAKAWAY_CHANCE: f32 = 0.15;
/// Success-probability tier boundaries.
const HIGH_SUCCESS: f32 = 0.7;
const LOW_SUCCESS: f32 = 0.4;
/// Hard floor on any single carry.
const MIN_YARDS: i32 = -5;
/// Fumble base rates; gap runs stopped near the line carry extra risk from
/// the pile.
const FUMBLE_BASE_CHANCE: f32 = 0.01;
const FUMBLE_PILE_CHANCE: f32 = 0.025;

/// One extracted success factor with its normalized value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FactorValue {
    pub name: String,
    pub direction: FactorDirection,
    pub value: f32,
}

/// Everything the drive controller needs to advance state after a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunPlayResult {
    pub yards_gained: i32,
    pub outcome: PlayOutcome,
    pub concept_name: String,
    pub success_probability: f32,
    pub success_factors: Vec<FactorValue>,
    pub play_description: String,
    pub target_gap: String,
    pub rb_technique: String,
}

impl RunPlayResult {
    /// Wrap this run into the downstream play contract. First down is
    /// derived from the pre-snap situation; scoring and turnover flags
    /// follow the outcome.
    pub fn to_play_result(
        &self,
        sequence: u64,
        time_elapsed_secs: u32,
        state: &FieldState,
    ) -> crate::models::PlayResult {
        let mut play = crate::models::PlayResult::new(sequence, self.outcome, self.yards_gained)
            .with_elapsed(time_elapsed_secs)
            .with_description(self.play_description.clone());
        if self.outcome == PlayOutcome::Touchdown
            || self.yards_gained >= state.yards_to_go as i32
        {
            play.achieved_first_down = true;
        }
        play
    }

    /// Per-play stat lines for the ball carrier. Defenders are credited by
    /// the drive controller, which knows the tackler.
    pub fn stats_summary(&self, running_back: Option<&Player>) -> crate::models::PlayStatsSummary {
        let mut summary = crate::models::PlayStatsSummary::new();
        if let Some(rb) = running_back {
            let line = summary.entry(rb.id);
            line.player_name = rb.name.clone();
            line.team_id = rb.team_id;
            line.carries = 1;
            line.rushing_yards = self.yards_gained;
            if self.outcome == PlayOutcome::Touchdown {
                line.rushing_tds = 1;
            }
            if self.outcome == PlayOutcome::Fumble {
                line.fumbles = 1;
                line.fumbles_lost = 1;
            }
        }
        summary
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunConceptExecutor;

impl RunConceptExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Resolve one carry. Missing personnel is tolerated: factors whose unit
    /// is absent are omitted, and an empty factor set defaults to a coin-flip
    /// success probability.
    pub fn execute_concept<R: Rng + ?Sized>(
        &self,
        concept: &RunConcept,
        running_back: Option<&Player>,
        offensive_line: &[Player],
        defensive_line: &[Player],
        linebackers: &[Player],
        state: &FieldState,
        rng: &mut R,
    ) -> RunPlayResult {
        let factors = extract_factors(concept, running_back, offensive_line, defensive_line, linebackers);
        let success_probability = if factors.is_empty() {
            0.5
        } else {
            factors.iter().map(|f| f.value).sum::<f32>() / factors.len() as f32
        };

        let base_yards = self.draw_base_yards(concept, success_probability, rng);
        let yards_gained = apply_situational_modifiers(concept, base_yards, state);
        let outcome = self.resolve_outcome(concept, running_back, yards_gained, state, rng);

        let rb_name = running_back.map(|p| p.name.as_str()).unwrap_or("The back");
        let play_description = build_description(concept, outcome, yards_gained, rb_name);

        RunPlayResult {
            yards_gained,
            outcome,
            concept_name: concept.name.to_string(),
            success_probability,
            success_factors: factors,
            play_description,
            target_gap: concept.target_gap.as_str().to_string(),
            rb_technique: concept.rb_technique.to_string(),
        }
    }

    fn draw_base_yards<R: Rng + ?Sized>(
        &self,
        concept: &RunConcept,
        success_probability: f32,
        rng: &mut R,
    ) -> i32 {
        let y = concept.yardage;
        if success_probability > HIGH_SUCCESS {
            if rng.gen::<f32>() < BREAKAWAY_CHANCE {
                rng.gen_range(y.typical_max..=y.breakaway_max)
            } else {
                let solid_min = (y.min + y.typical_max) / 2;
                rng.gen_range(solid_min..=y.typical_max)
            }
        } else if success_probability > LOW_SUCCESS {
            rng.gen_range(y.min..=y.typical_max)
        } else {
            rng.gen_range(y.min - 2..=y.min + 2)
        }
    }

    fn resolve_outcome<R: Rng + ?Sized>(
        &self,
        concept: &RunConcept,
        running_back: Option<&Player>,
        yards_gained: i32,
        state: &FieldState,
        rng: &mut R,
    ) -> PlayOutcome {
        // Strict priority: touchdown, then safety, then fumble, then gain.
        if yards_gained >= state.yards_to_goal() {
            return PlayOutcome::Touchdown;
        }
        if state.field_position as i32 + yards_gained <= 0 {
            return PlayOutcome::Safety;
        }

        let base_chance = if concept.concept_type == ConceptType::Gap && yards_gained < 2 {
            FUMBLE_PILE_CHANCE
        } else {
            FUMBLE_BASE_CHANCE
        };
        let strength = running_back
            .map(|p| p.effective_attribute("strength"))
            .unwrap_or(DEFAULT_RATING) as f32;
        let fumble_chance = base_chance * (1.0 - strength / 200.0);
        if rng.gen::<f32>() < fumble_chance {
            return PlayOutcome::Fumble;
        }

        PlayOutcome::Gain
    }
}

fn unit_average(players: &[Player], attribute: &str) -> Option<f32> {
    if players.is_empty() {
        return None;
    }
    let sum: u32 = players.iter().map(|p| p.effective_attribute(attribute) as u32).sum();
    Some(sum as f32 / players.len() as f32)
}

/// Normalized [0, 1] value for one declared factor, or `None` when the unit
/// it reads is not on the field.
fn factor_value(
    factor: SuccessFactor,
    running_back: Option<&Player>,
    offensive_line: &[Player],
    defensive_line: &[Player],
    linebackers: &[Player],
) -> Option<f32> {
    let raw = match factor {
        SuccessFactor::Vision => running_back.map(|p| p.effective_attribute("vision") as f32),
        SuccessFactor::Power => running_back.map(|p| p.effective_attribute("power") as f32),
        SuccessFactor::Speed => running_back.map(|p| p.effective_attribute("speed") as f32),
        SuccessFactor::Agility => running_back.map(|p| p.effective_attribute("agility") as f32),
        SuccessFactor::Elusiveness => {
            running_back.map(|p| p.effective_attribute("elusiveness") as f32)
        }
        SuccessFactor::LineMobility => unit_average(offensive_line, "mobility"),
        SuccessFactor::RunBlocking => unit_average(offensive_line, "run_blocking"),
        SuccessFactor::GapDiscipline => unit_average(defensive_line, "gap_discipline"),
        SuccessFactor::RunStopping => {
            // Run stopping is a front-seven trait; average whichever units
            // are on the field.
            let front: Vec<Player> =
                defensive_line.iter().chain(linebackers.iter()).cloned().collect();
            unit_average(&front, "run_stopping")
        }
        SuccessFactor::Pursuit => unit_average(linebackers, "pursuit"),
        SuccessFactor::Discipline => unit_average(linebackers, "discipline"),
        SuccessFactor::PassRushAggression => unit_average(defensive_line, "pass_rush"),
    }?;

    let normalized = (raw / 100.0).clamp(0.0, 1.0);
    Some(match factor.direction() {
        FactorDirection::OffenseFavorsHigh => normalized,
        FactorDirection::DefenseFavorsHigh => 1.0 - normalized,
    })
}

fn extract_factors(
    concept: &RunConcept,
    running_back: Option<&Player>,
    offensive_line: &[Player],
    defensive_line: &[Player],
    linebackers: &[Player],
) -> Vec<FactorValue> {
    concept
        .success_factors
        .iter()
        .filter_map(|&factor| {
            factor_value(factor, running_back, offensive_line, defensive_line, linebackers).map(
                |value| FactorValue {
                    name: factor.as_str().to_string(),
                    direction: factor.direction(),
                    value,
                },
            )
        })
        .collect()
}

/// Multiplicative situational adjustments, applied in a fixed order, then
/// floored. Power O and Dive are built for the goal line and keep their
/// yardage there; only the draw benefits from obvious passing downs.
fn apply_situational_modifiers(concept: &RunConcept, base_yards: i32, state: &FieldState) -> i32 {
    let mut yards = base_yards as f32;

    if state.is_goal_line() && concept.name != POWER_O && concept.name != DIVE {
        yards *= 0.7;
    }
    if state.is_short_yardage() && concept.concept_type != ConceptType::Draw {
        yards *= 0.8;
    }
    if state.yards_to_go >= 10 && concept.concept_type == ConceptType::Draw {
        yards *= 1.3;
    }

    (yards.round() as i32).max(MIN_YARDS)
}

fn build_description(
    concept: &RunConcept,
    outcome: PlayOutcome,
    yards: i32,
    rb_name: &str,
) -> String {
    let action = match concept.name {
        "Inside Zone" => "takes the zone handoff and presses the A gap",
        "Outside Zone" => "stretches the run toward the edge",
        "Power O" => "follows the pulling guard through the B gap",
        "Draw" => "shows pass, then darts through the vacated middle",
        "Dive" => "slams straight into the A gap",
        "Counter" => "jab steps and cuts back behind the trap block",
        "Sweep" => "takes the sweep wide around the corner",
        _ => "carries the ball",
    };

    match outcome {
        PlayOutcome::Touchdown => {
            format!("{rb_name} {action}, breaking into the end zone for a touchdown!")
        }
        PlayOutcome::Fumble => {
            format!("{rb_name} {action}, but the ball is punched loose after {yards} yards")
        }
        PlayOutcome::Safety => {
            format!("{rb_name} {action} and is swallowed up in his own end zone for a safety")
        }
        _ if yards >= 15 => format!("{rb_name} {action} and breaks free for {yards} yards"),
        _ if yards <= 0 => format!("{rb_name} {action} and is stuffed for {yards} yards"),
        _ => format!("{rb_name} {action} for a gain of {yards}"),
    }
}
