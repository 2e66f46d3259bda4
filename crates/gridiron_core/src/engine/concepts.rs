//! Run-concept catalog and situational selection.
//!
//! The catalog is fixed at startup and never mutated. Selection narrows the
//! candidate set in a strict order (suitability, formation preference, ball
//! carrier style) and only then draws uniformly, so a seeded RNG replays the
//! same call sheet.

use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::personnel::Formation;
use crate::models::FieldState;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConceptType {
    Zone,
    Gap,
    Option,
    Draw,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TargetGap {
    AGap,
    BGap,
    CGap,
    Edge,
}

impl TargetGap {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetGap::AGap => "A gap",
            TargetGap::BGap => "B gap",
            TargetGap::CGap => "C gap",
            TargetGap::Edge => "edge",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BlockingScheme {
    ZoneFlow,
    ManOnMan,
    PullAndLead,
    PullAndTrap,
    PassSet,
}

/// Which side of the ball benefits from a high rating in this factor.
/// Defense-favoring factors are inverted (`1 - avg/100`) when they feed the
/// offensive success probability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FactorDirection {
    OffenseFavorsHigh,
    DefenseFavorsHigh,
}

/// Named inputs to a concept's success probability. Each factor knows which
/// unit it reads and which direction it leans, so adding a factor cannot
/// silently break the inversion convention.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SuccessFactor {
    /// Ball carrier vision.
    Vision,
    /// Ball carrier power.
    Power,
    /// Ball carrier long speed.
    Speed,
    /// Ball carrier agility.
    Agility,
    /// Ball carrier elusiveness.
    Elusiveness,
    /// Offensive line lateral mobility (zone schemes).
    LineMobility,
    /// Offensive line run blocking.
    RunBlocking,
    /// Defensive line gap discipline.
    GapDiscipline,
    /// Front-seven run stopping.
    RunStopping,
    /// Second-level pursuit.
    Pursuit,
    /// Linebacker assignment discipline.
    Discipline,
    /// Defensive line pass-rush aggression. A rush selling out upfield
    /// favors the draw, so this one is offense-directed.
    PassRushAggression,
}

impl SuccessFactor {
    pub fn direction(&self) -> FactorDirection {
        match self {
            SuccessFactor::GapDiscipline
            | SuccessFactor::RunStopping
            | SuccessFactor::Pursuit
            | SuccessFactor::Discipline => FactorDirection::DefenseFavorsHigh,
            _ => FactorDirection::OffenseFavorsHigh,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SuccessFactor::Vision => "vision",
            SuccessFactor::Power => "power",
            SuccessFactor::Speed => "speed",
            SuccessFactor::Agility => "agility",
            SuccessFactor::Elusiveness => "elusiveness",
            SuccessFactor::LineMobility => "line_mobility",
            SuccessFactor::RunBlocking => "run_blocking",
            SuccessFactor::GapDiscipline => "gap_discipline",
            SuccessFactor::RunStopping => "run_stopping",
            SuccessFactor::Pursuit => "pursuit",
            SuccessFactor::Discipline => "discipline",
            SuccessFactor::PassRushAggression => "pass_rush_aggression",
        }
    }
}

/// Yardage envelope for a concept: floor, typical ceiling, breakaway ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YardageProfile {
    pub min: i32,
    pub typical_max: i32,
    pub breakaway_max: i32,
}

/// Situations a concept is drawn up for. A concept is suitable when the down
/// is listed and both distance and field position fall inside the bands.
#[derive(Debug, Clone, Copy)]
pub struct SituationalPrefs {
    pub downs: &'static [u8],
    pub distance: (u8, u8),
    pub field: (u8, u8),
}

impl SituationalPrefs {
    pub fn matches(&self, state: &FieldState) -> bool {
        self.downs.contains(&state.down)
            && state.yards_to_go >= self.distance.0
            && state.yards_to_go <= self.distance.1
            && state.field_position >= self.field.0
            && state.field_position <= self.field.1
    }
}

/// Immutable catalog entry. Created once at startup.
#[derive(Debug, Clone, Copy)]
pub struct RunConcept {
    pub name: &'static str,
    pub concept_type: ConceptType,
    pub target_gap: TargetGap,
    pub blocking_scheme: BlockingScheme,
    pub rb_technique: &'static str,
    pub success_factors: &'static [SuccessFactor],
    pub yardage: YardageProfile,
    pub prefs: SituationalPrefs,
}

impl RunConcept {
    pub fn is_suitable_for_situation(&self, state: &FieldState) -> bool {
        self.prefs.matches(state)
    }
}

pub const INSIDE_ZONE: &str = "Inside Zone";
pub const OUTSIDE_ZONE: &str = "Outside Zone";
pub const POWER_O: &str = "Power O";
pub const DRAW: &str = "Draw";
pub const DIVE: &str = "Dive";
pub const COUNTER: &str = "Counter";
pub const SWEEP: &str = "Sweep";

static CATALOG: &[RunConcept] = &[
    RunConcept {
        name: INSIDE_ZONE,
        concept_type: ConceptType::Zone,
        target_gap: TargetGap::AGap,
        blocking_scheme: BlockingScheme::ZoneFlow,
        rb_technique: "one cut downhill",
        success_factors: &[
            SuccessFactor::Vision,
            SuccessFactor::RunBlocking,
            SuccessFactor::LineMobility,
            SuccessFactor::GapDiscipline,
        ],
        yardage: YardageProfile { min: 1, typical_max: 7, breakaway_max: 25 },
        prefs: SituationalPrefs { downs: &[1, 2, 3], distance: (1, 10), field: (0, 100) },
    },
    RunConcept {
        name: OUTSIDE_ZONE,
        concept_type: ConceptType::Zone,
        target_gap: TargetGap::CGap,
        blocking_scheme: BlockingScheme::ZoneFlow,
        rb_technique: "stretch and bend",
        success_factors: &[
            SuccessFactor::Speed,
            SuccessFactor::Vision,
            SuccessFactor::LineMobility,
            SuccessFactor::Pursuit,
        ],
        yardage: YardageProfile { min: 0, typical_max: 9, breakaway_max: 35 },
        prefs: SituationalPrefs { downs: &[1, 2], distance: (3, 10), field: (0, 89) },
    },
    RunConcept {
        name: POWER_O,
        concept_type: ConceptType::Gap,
        target_gap: TargetGap::BGap,
        blocking_scheme: BlockingScheme::PullAndLead,
        rb_technique: "follow the puller",
        success_factors: &[
            SuccessFactor::Power,
            SuccessFactor::RunBlocking,
            SuccessFactor::RunStopping,
        ],
        yardage: YardageProfile { min: 1, typical_max: 6, breakaway_max: 18 },
        prefs: SituationalPrefs { downs: &[1, 2, 3, 4], distance: (1, 4), field: (0, 100) },
    },
    RunConcept {
        name: DRAW,
        concept_type: ConceptType::Draw,
        target_gap: TargetGap::AGap,
        blocking_scheme: BlockingScheme::PassSet,
        rb_technique: "delay and burst",
        success_factors: &[
            SuccessFactor::Elusiveness,
            SuccessFactor::Vision,
            SuccessFactor::PassRushAggression,
            SuccessFactor::Discipline,
        ],
        yardage: YardageProfile { min: -1, typical_max: 8, breakaway_max: 40 },
        prefs: SituationalPrefs { downs: &[2, 3], distance: (7, 30), field: (0, 85) },
    },
    RunConcept {
        name: DIVE,
        concept_type: ConceptType::Gap,
        target_gap: TargetGap::AGap,
        blocking_scheme: BlockingScheme::ManOnMan,
        rb_technique: "hit it up inside",
        success_factors: &[
            SuccessFactor::Power,
            SuccessFactor::RunBlocking,
            SuccessFactor::RunStopping,
            SuccessFactor::GapDiscipline,
        ],
        yardage: YardageProfile { min: 1, typical_max: 4, breakaway_max: 12 },
        prefs: SituationalPrefs { downs: &[3, 4], distance: (1, 2), field: (0, 100) },
    },
    RunConcept {
        name: COUNTER,
        concept_type: ConceptType::Gap,
        target_gap: TargetGap::BGap,
        blocking_scheme: BlockingScheme::PullAndTrap,
        rb_technique: "counter step, follow the trap",
        success_factors: &[
            SuccessFactor::Vision,
            SuccessFactor::Agility,
            SuccessFactor::RunBlocking,
            SuccessFactor::Discipline,
        ],
        yardage: YardageProfile { min: 0, typical_max: 8, breakaway_max: 30 },
        prefs: SituationalPrefs { downs: &[1, 2], distance: (4, 10), field: (10, 90) },
    },
    RunConcept {
        name: SWEEP,
        concept_type: ConceptType::Gap,
        target_gap: TargetGap::Edge,
        blocking_scheme: BlockingScheme::PullAndLead,
        rb_technique: "string it wide",
        success_factors: &[SuccessFactor::Speed, SuccessFactor::Agility, SuccessFactor::Pursuit],
        yardage: YardageProfile { min: -1, typical_max: 9, breakaway_max: 35 },
        prefs: SituationalPrefs { downs: &[1, 2], distance: (4, 10), field: (20, 95) },
    },
];

/// Ball-carrier running style, set by the roster layer per back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum RbStyle {
    Power,
    Outside,
    Zone,
    #[default]
    Balanced,
}

static FORMATION_PREFERENCES: Lazy<HashMap<Formation, &'static [&'static str]>> =
    Lazy::new(|| {
        let mut map: HashMap<Formation, &'static [&'static str]> = HashMap::new();
        map.insert(Formation::GoalLine, &[POWER_O, DIVE]);
        map.insert(Formation::IFormation, &[POWER_O, DIVE, COUNTER]);
        map.insert(Formation::TightFormation, &[INSIDE_ZONE, POWER_O]);
        map.insert(Formation::Singleback, &[INSIDE_ZONE, OUTSIDE_ZONE, COUNTER]);
        map.insert(Formation::Shotgun, &[DRAW, OUTSIDE_ZONE]);
        map.insert(Formation::ShotgunSpread, &[DRAW, OUTSIDE_ZONE, SWEEP]);
        map
    });

static STYLE_PREFERENCES: Lazy<HashMap<RbStyle, &'static [&'static str]>> = Lazy::new(|| {
    let mut map: HashMap<RbStyle, &'static [&'static str]> = HashMap::new();
    map.insert(RbStyle::Power, &[POWER_O, DIVE, INSIDE_ZONE]);
    map.insert(RbStyle::Outside, &[OUTSIDE_ZONE, SWEEP, COUNTER]);
    map.insert(RbStyle::Zone, &[INSIDE_ZONE, OUTSIDE_ZONE]);
    map
});

/// Static catalog plus the situational call logic.
#[derive(Debug, Default, Clone, Copy)]
pub struct RunConceptLibrary;

impl RunConceptLibrary {
    pub fn new() -> Self {
        Self
    }

    pub fn get_all_concepts(&self) -> &'static [RunConcept] {
        CATALOG
    }

    pub fn concept_by_name(&self, name: &str) -> Option<&'static RunConcept> {
        CATALOG.iter().find(|c| c.name == name)
    }

    fn inside_zone(&self) -> &'static RunConcept {
        // Inside Zone is the catalog's universal answer; it is always present.
        CATALOG.iter().find(|c| c.name == INSIDE_ZONE).unwrap_or(&CATALOG[0])
    }

    /// Pick a concept for the situation. Narrowing order is fixed:
    /// suitability filter (empty set falls back to Inside Zone), then
    /// formation preference, then ball-carrier style, then a uniform draw
    /// from whatever remains.
    pub fn select_concept_for_situation<R: Rng + ?Sized>(
        &self,
        state: &FieldState,
        formation: Formation,
        rb_style: RbStyle,
        rng: &mut R,
    ) -> &'static RunConcept {
        let mut candidates: Vec<&'static RunConcept> =
            CATALOG.iter().filter(|c| c.is_suitable_for_situation(state)).collect();

        if candidates.is_empty() {
            log::debug!(
                "no concept suits down {} and {} to go; falling back to {}",
                state.down,
                state.yards_to_go,
                INSIDE_ZONE
            );
            return self.inside_zone();
        }

        if let Some(preferred) = FORMATION_PREFERENCES.get(&formation) {
            let narrowed: Vec<&'static RunConcept> = candidates
                .iter()
                .copied()
                .filter(|c| preferred.contains(&c.name))
                .collect();
            if !narrowed.is_empty() {
                candidates = narrowed;
            }
        }

        if let Some(preferred) = STYLE_PREFERENCES.get(&rb_style) {
            let narrowed: Vec<&'static RunConcept> = candidates
                .iter()
                .copied()
                .filter(|c| preferred.contains(&c.name))
                .collect();
            if !narrowed.is_empty() {
                candidates = narrowed;
            }
        }

        candidates[rng.gen_range(0..candidates.len())]
    }
}
