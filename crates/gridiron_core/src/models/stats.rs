use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-player counters. The schema is the downstream persistence contract:
/// passing yards stay gross at the player level and sack yards are stored as
/// positive integers.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PlayerStats {
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u32>,

    // Passing
    pub pass_attempts: u32,
    pub completions: u32,
    /// Gross yards; sack losses are tracked separately.
    pub passing_yards: i32,
    pub passing_tds: u32,
    pub interceptions_thrown: u32,
    pub sacks_taken: u32,
    pub sack_yards_lost: u32,

    // Rushing
    pub carries: u32,
    pub rushing_yards: i32,
    pub rushing_tds: u32,
    pub fumbles: u32,
    pub fumbles_lost: u32,

    // Receiving
    pub targets: u32,
    pub receptions: u32,
    pub receiving_yards: i32,
    pub receiving_tds: u32,

    // Defense
    pub tackles: u32,
    pub assisted_tackles: u32,
    pub tackles_for_loss: u32,
    pub sacks: u32,
    pub qb_hits: u32,
    pub interceptions: u32,
    pub passes_defended: u32,
    pub forced_fumbles: u32,
    pub fumble_recoveries: u32,

    // Blocking
    pub pancakes: u32,
    pub sacks_allowed: u32,

    // Special teams
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub punts: u32,
    pub punt_yards: u32,
}

impl PlayerStats {
    pub fn named(name: impl Into<String>, team_id: Option<u32>) -> Self {
        Self { player_name: name.into(), team_id, ..Default::default() }
    }

    /// Fold a per-play delta into this cumulative record.
    pub fn merge(&mut self, delta: &PlayerStats) {
        if self.player_name.is_empty() {
            self.player_name = delta.player_name.clone();
        }
        if self.team_id.is_none() {
            self.team_id = delta.team_id;
        }

        self.pass_attempts += delta.pass_attempts;
        self.completions += delta.completions;
        self.passing_yards += delta.passing_yards;
        self.passing_tds += delta.passing_tds;
        self.interceptions_thrown += delta.interceptions_thrown;
        self.sacks_taken += delta.sacks_taken;
        self.sack_yards_lost += delta.sack_yards_lost;

        self.carries += delta.carries;
        self.rushing_yards += delta.rushing_yards;
        self.rushing_tds += delta.rushing_tds;
        self.fumbles += delta.fumbles;
        self.fumbles_lost += delta.fumbles_lost;

        self.targets += delta.targets;
        self.receptions += delta.receptions;
        self.receiving_yards += delta.receiving_yards;
        self.receiving_tds += delta.receiving_tds;

        self.tackles += delta.tackles;
        self.assisted_tackles += delta.assisted_tackles;
        self.tackles_for_loss += delta.tackles_for_loss;
        self.sacks += delta.sacks;
        self.qb_hits += delta.qb_hits;
        self.interceptions += delta.interceptions;
        self.passes_defended += delta.passes_defended;
        self.forced_fumbles += delta.forced_fumbles;
        self.fumble_recoveries += delta.fumble_recoveries;

        self.pancakes += delta.pancakes;
        self.sacks_allowed += delta.sacks_allowed;

        self.field_goals_made += delta.field_goals_made;
        self.field_goals_attempted += delta.field_goals_attempted;
        self.punts += delta.punts;
        self.punt_yards += delta.punt_yards;
    }
}

/// Per-play stat deltas keyed by player id. BTreeMap keeps iteration
/// deterministic for replay comparison.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PlayStatsSummary {
    pub entries: BTreeMap<u32, PlayerStats>,
}

impl PlayStatsSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&mut self, player_id: u32) -> &mut PlayerStats {
        self.entries.entry(player_id).or_default()
    }

    pub fn add(&mut self, player_id: u32, stats: PlayerStats) {
        self.entries.entry(player_id).or_default().merge(&stats);
    }

    pub fn get(&self, player_id: u32) -> Option<&PlayerStats> {
        self.entries.get(&player_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &PlayerStats)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_accumulates_and_backfills_identity() {
        let mut total = PlayerStats::default();
        let mut delta = PlayerStats::named("QB One", Some(7));
        delta.pass_attempts = 1;
        delta.passing_yards = 12;

        total.merge(&delta);
        total.merge(&delta);

        assert_eq!(total.player_name, "QB One");
        assert_eq!(total.team_id, Some(7));
        assert_eq!(total.pass_attempts, 2);
        assert_eq!(total.passing_yards, 24);
    }

    #[test]
    fn summary_add_merges_same_player() {
        let mut summary = PlayStatsSummary::new();
        let mut line = PlayerStats::named("Back", Some(1));
        line.carries = 1;
        line.rushing_yards = 5;
        summary.add(3, line.clone());
        summary.add(3, line);

        assert_eq!(summary.get(3).unwrap().carries, 2);
        assert_eq!(summary.get(3).unwrap().rushing_yards, 10);
    }
}
