//! # gridiron_core - Run-Play Simulation and Statistics Engine
//!
//! The computational heart of an NFL dynasty simulator: given two rosters, a
//! game situation, and a scheme, it fields concrete personnel, picks and
//! executes a run-blocking concept, and attributes every numeric outcome to
//! the right team and player without double counting.
//!
//! ## Pipeline
//! situation + rosters → [`PlayerSelector::get_personnel`] →
//! [`RunConceptLibrary::select_concept_for_situation`] →
//! [`RunConceptExecutor::execute_concept`] →
//! [`CentralizedStatsAggregator::record_play_result`]
//!
//! ## Determinism
//! All randomness flows through an explicitly threaded RNG, seeded once per
//! game (same seed, same game).

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod stats;

pub use engine::{
    ConceptType, DefensiveCall, FactorDirection, FactorValue, Formation, Matchup, Personnel,
    PersonnelPackage, PlayCall, PlayerSelector, RbStyle, RunConcept, RunConceptExecutor,
    RunConceptLibrary, RunPlayResult, SelectorConfig, SuccessFactor, TargetGap,
};
pub use error::{Result, SimError};
pub use models::{
    FieldState, PlayOutcome, PlayResult, PlaySequencer, PlayStatsSummary, Player, PlayerStats,
    Position, PositionGroup, Role, Team,
};
pub use stats::{
    CentralizedStatsAggregator, GameLevelStats, GameStatsSnapshot, PersistedPlayerStats,
    TeamGameStats,
};
