//! JSON boundary for host layers (UI, save pipeline). Everything crosses as
//! strings so callers never link against this crate's types.

use crate::error::Result;
use crate::stats::CentralizedStatsAggregator;

/// Full statistics snapshot as pretty-printed JSON.
pub fn game_snapshot_json(aggregator: &CentralizedStatsAggregator) -> Result<String> {
    Ok(serde_json::to_string_pretty(&aggregator.snapshot())?)
}

/// Flattened per-player rows as JSON, failing fast when any player lacks a
/// team assignment.
pub fn player_stats_json(aggregator: &CentralizedStatsAggregator) -> Result<String> {
    let rows = aggregator.flatten_player_stats()?;
    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::play::{PlayOutcome, PlayResult};
    use crate::models::{PlayStatsSummary, PlayerStats};

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut agg = CentralizedStatsAggregator::new(1, 2);
        let play = PlayResult::new(0, PlayOutcome::Gain, 6).with_elapsed(28);
        agg.record_play_result(&play, 1, 1, 10, 50);

        let json = game_snapshot_json(&agg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["game"]["total_plays"], 1);
    }

    #[test]
    fn player_stats_json_propagates_missing_team() {
        let mut agg = CentralizedStatsAggregator::new(1, 2);
        let mut summary = PlayStatsSummary::new();
        summary.add(9, PlayerStats::named("Unassigned", None));
        let play = PlayResult::new(0, PlayOutcome::Gain, 1).with_stats(summary);
        agg.record_play_result(&play, 1, 1, 10, 50);

        assert!(player_stats_json(&agg).is_err());
    }
}
