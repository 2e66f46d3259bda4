pub mod accumulators;
pub mod aggregator;
pub mod game;
pub mod team_game;

pub use accumulators::{
    PersistedPlayerStats, PlayerStatsAccumulator, TeamOffenseTotals, TeamStatsAccumulator,
};
pub use aggregator::{CentralizedStatsAggregator, GameStatsSnapshot};
pub use game::GameLevelStats;
pub use team_game::TeamGameStats;
