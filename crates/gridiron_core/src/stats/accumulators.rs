//! Cumulative player- and team-level accumulators fed by the aggregator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, SimError};
use crate::models::{PlayStatsSummary, PlayerStats};

/// Cumulative per-player records for one game.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlayerStatsAccumulator {
    players: BTreeMap<u32, PlayerStats>,
}

/// One flattened row, ready for the persistence layer. Team attribution is
/// mandatory here, which is why flattening fails fast on a missing team.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedPlayerStats {
    pub player_id: u32,
    pub team_id: u32,
    pub stats: PlayerStats,
}

impl PlayerStatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_summary(&mut self, summary: &PlayStatsSummary) {
        for (&player_id, delta) in summary.iter() {
            self.players.entry(player_id).or_default().merge(delta);
        }
    }

    pub fn player(&self, player_id: u32) -> Option<&PlayerStats> {
        self.players.get(&player_id)
    }

    /// Cumulative records, optionally narrowed by team and/or name.
    pub fn filtered(&self, team_id: Option<u32>, name: Option<&str>) -> Vec<(u32, &PlayerStats)> {
        self.players
            .iter()
            .filter(|(_, stats)| team_id.map_or(true, |t| stats.team_id == Some(t)))
            .filter(|(_, stats)| name.map_or(true, |n| stats.player_name == n))
            .map(|(&id, stats)| (id, stats))
            .collect()
    }

    pub fn all(&self) -> impl Iterator<Item = (&u32, &PlayerStats)> {
        self.players.iter()
    }

    /// Flatten every record for persistence. A player without a team
    /// assignment is a contract violation upstream, not a condition to paper
    /// over, so this fails instead of guessing.
    pub fn flatten_for_persistence(&self) -> Result<Vec<PersistedPlayerStats>> {
        self.players
            .iter()
            .map(|(&player_id, stats)| {
                let team_id = stats
                    .team_id
                    .ok_or(SimError::MissingTeamAssignment { player_id })?;
                Ok(PersistedPlayerStats { player_id, team_id, stats: stats.clone() })
            })
            .collect()
    }

    pub fn reset(&mut self) {
        self.players.clear();
    }
}

/// Cumulative offensive output per team, derived from play summaries.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TeamOffenseTotals {
    pub carries: u32,
    pub rushing_yards: i32,
    pub pass_attempts: u32,
    pub completions: u32,
    pub gross_passing_yards: i32,
    pub sack_yards_lost: u32,
    pub receptions: u32,
    pub receiving_yards: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TeamStatsAccumulator {
    teams: BTreeMap<u32, TeamOffenseTotals>,
}

impl TeamStatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute a play's offensive counters to the possessing team.
    pub fn record_summary(&mut self, summary: &PlayStatsSummary, possessing_team: u32) {
        let totals = self.teams.entry(possessing_team).or_default();
        for (_, delta) in summary.iter() {
            totals.carries += delta.carries;
            totals.rushing_yards += delta.rushing_yards;
            totals.pass_attempts += delta.pass_attempts;
            totals.completions += delta.completions;
            totals.gross_passing_yards += delta.passing_yards;
            totals.sack_yards_lost += delta.sack_yards_lost;
            totals.receptions += delta.receptions;
            totals.receiving_yards += delta.receiving_yards;
        }
    }

    pub fn team(&self, team_id: u32) -> Option<&TeamOffenseTotals> {
        self.teams.get(&team_id)
    }

    pub fn reset(&mut self) {
        self.teams.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with(player_id: u32, team_id: Option<u32>, carries: u32) -> PlayStatsSummary {
        let mut summary = PlayStatsSummary::new();
        let mut line = PlayerStats::named(format!("P{player_id}"), team_id);
        line.carries = carries;
        line.rushing_yards = 4 * carries as i32;
        summary.add(player_id, line);
        summary
    }

    #[test]
    fn records_accumulate_across_plays() {
        let mut acc = PlayerStatsAccumulator::new();
        acc.record_summary(&summary_with(5, Some(1), 1));
        acc.record_summary(&summary_with(5, Some(1), 1));
        assert_eq!(acc.player(5).unwrap().carries, 2);
        assert_eq!(acc.player(5).unwrap().rushing_yards, 8);
    }

    #[test]
    fn filter_by_team_and_name() {
        let mut acc = PlayerStatsAccumulator::new();
        acc.record_summary(&summary_with(5, Some(1), 1));
        acc.record_summary(&summary_with(9, Some(2), 1));

        assert_eq!(acc.filtered(Some(1), None).len(), 1);
        assert_eq!(acc.filtered(None, Some("P9")).len(), 1);
        assert_eq!(acc.filtered(Some(2), Some("P5")).len(), 0);
        assert_eq!(acc.filtered(None, None).len(), 2);
    }

    #[test]
    fn flatten_fails_fast_on_missing_team() {
        let mut acc = PlayerStatsAccumulator::new();
        acc.record_summary(&summary_with(5, None, 1));
        let err = acc.flatten_for_persistence().unwrap_err();
        assert!(matches!(err, SimError::MissingTeamAssignment { player_id: 5 }));
    }

    #[test]
    fn flatten_succeeds_when_every_player_is_assigned() {
        let mut acc = PlayerStatsAccumulator::new();
        acc.record_summary(&summary_with(5, Some(1), 2));
        let rows = acc.flatten_for_persistence().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team_id, 1);
        assert_eq!(rows[0].stats.carries, 2);
    }

    #[test]
    fn team_totals_follow_possession() {
        let mut acc = TeamStatsAccumulator::new();
        acc.record_summary(&summary_with(5, Some(1), 3), 1);
        let totals = acc.team(1).unwrap();
        assert_eq!(totals.carries, 3);
        assert_eq!(totals.rushing_yards, 12);
        assert!(acc.team(2).is_none());
    }
}
