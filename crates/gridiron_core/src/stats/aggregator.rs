//! Single owner of every statistics layer for one game.
//!
//! The aggregator receives each resolved play exactly once (enforced by the
//! play sequence number) and routes its numbers into per-player records,
//! per-team game stats, and game-level totals without double counting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::accumulators::{
    PersistedPlayerStats, PlayerStatsAccumulator, TeamOffenseTotals, TeamStatsAccumulator,
};
use super::game::GameLevelStats;
use super::team_game::TeamGameStats;
use crate::error::Result;
use crate::models::play::PlayResult;
use crate::models::stats::{PlayStatsSummary, PlayerStats};
use crate::models::PlayOutcome;

/// A play with |yards| at or past this is a big play, either direction.
const BIG_PLAY_YARDS: i32 = 20;
/// Red zone on the 0-100 scale.
const RED_ZONE_POSITION: u8 = 80;

/// Serializable snapshot of everything the aggregator knows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStatsSnapshot {
    pub generated_at: DateTime<Utc>,
    pub game: GameLevelStats,
    pub teams: Vec<TeamGameStats>,
    pub players: Vec<(u32, PlayerStats)>,
}

#[derive(Debug, Default)]
pub struct CentralizedStatsAggregator {
    home_team: u32,
    away_team: u32,
    player_stats: PlayerStatsAccumulator,
    team_offense: TeamStatsAccumulator,
    team_games: BTreeMap<u32, TeamGameStats>,
    game: GameLevelStats,
    recorded_sequences: HashSet<u64>,
    last_sequence: Option<u64>,
    in_red_zone: BTreeMap<u32, bool>,
}

impl CentralizedStatsAggregator {
    pub fn new(home_team: u32, away_team: u32) -> Self {
        let mut team_games = BTreeMap::new();
        team_games.insert(home_team, TeamGameStats::new(home_team));
        team_games.insert(away_team, TeamGameStats::new(away_team));
        Self {
            home_team,
            away_team,
            player_stats: PlayerStatsAccumulator::new(),
            team_offense: TeamStatsAccumulator::new(),
            team_games,
            game: GameLevelStats::new(),
            recorded_sequences: HashSet::new(),
            last_sequence: None,
            in_red_zone: BTreeMap::new(),
        }
    }

    fn defending_team(&self, possessing_team: u32) -> u32 {
        if possessing_team == self.home_team {
            self.away_team
        } else {
            self.home_team
        }
    }

    /// Reject duplicate and out-of-order submissions. The producer assigns
    /// sequence numbers monotonically, so either case means a broken caller.
    fn sequence_accepted(&mut self, sequence: u64) -> bool {
        let duplicate = self.recorded_sequences.contains(&sequence);
        let out_of_order = self.last_sequence.map_or(false, |last| sequence <= last);
        if duplicate || out_of_order {
            #[cfg(feature = "strict_contracts")]
            panic!(
                "play sequence {} violates ordering (last recorded: {:?})",
                sequence, self.last_sequence
            );
            #[cfg(not(feature = "strict_contracts"))]
            {
                log::warn!(
                    "ignoring play sequence {} (duplicate: {}, last recorded: {:?})",
                    sequence,
                    duplicate,
                    self.last_sequence
                );
                return false;
            }
        }
        self.recorded_sequences.insert(sequence);
        self.last_sequence = Some(sequence);
        true
    }

    /// Route one resolved play into every statistics layer. A repeated or
    /// out-of-order sequence number is absorbed without touching any total.
    pub fn record_play_result(
        &mut self,
        play: &PlayResult,
        possessing_team: u32,
        down: u8,
        _yards_to_go: u8,
        field_position: u8,
    ) {
        if !self.sequence_accepted(play.sequence) {
            return;
        }

        self.game.total_plays += 1;
        self.game.game_time_secs += play.time_elapsed_secs;

        if let Some(summary) = &play.stats {
            self.player_stats.record_summary(summary);
            self.team_offense.record_summary(summary, possessing_team);
            self.route_summary_to_teams(summary, possessing_team);
        }

        self.classify_outcome(play);
        self.attribute_penalty(play, possessing_team);
        self.track_situation(play, possessing_team, down, field_position);
    }

    /// Defensive production belongs to the defending team; offensive
    /// giveaways belong to the possessing team. Both are re-derived from the
    /// per-player summary so team totals stay consistent with the box score.
    fn route_summary_to_teams(&mut self, summary: &PlayStatsSummary, possessing_team: u32) {
        let defending_team = self.defending_team(possessing_team);

        if let Some(defense) = self.team_games.get_mut(&defending_team) {
            for (_, line) in summary.iter() {
                defense.defensive_sacks += line.sacks;
                defense.qb_hits += line.qb_hits;
                defense.defensive_interceptions += line.interceptions;
                defense.passes_defended += line.passes_defended;
                defense.forced_fumbles += line.forced_fumbles;
                defense.tackles_for_loss += line.tackles_for_loss;
            }
        }

        if let Some(offense) = self.team_games.get_mut(&possessing_team) {
            for (_, line) in summary.iter() {
                offense.interceptions_thrown += line.interceptions_thrown;
                offense.fumbles_lost += line.fumbles_lost;
                offense.sacks_allowed += line.sacks_taken;
                offense.turnovers += line.interceptions_thrown + line.fumbles_lost;

                offense.rushing_attempts += line.carries;
                offense.rushing_yards += line.rushing_yards;
                offense.gross_passing_yards += line.passing_yards;
                offense.sack_yards_lost += line.sack_yards_lost;
            }
        }
    }

    fn classify_outcome(&mut self, play: &PlayResult) {
        if play.is_scoring_play {
            self.game.scoring_plays += 1;
        }
        match play.outcome {
            PlayOutcome::Touchdown => self.game.touchdowns += 1,
            PlayOutcome::FieldGoalMade => self.game.field_goals_made += 1,
            PlayOutcome::FieldGoalMissed => self.game.field_goals_missed += 1,
            PlayOutcome::Safety => self.game.safeties += 1,
            _ => {}
        }
        if play.is_turnover {
            self.game.turnovers += 1;
        }
        if play.is_punt {
            self.game.punts += 1;
        }
        if play.yards_gained.abs() >= BIG_PLAY_YARDS {
            self.game.big_plays += 1;
        }
        if play.achieved_first_down {
            self.game.first_downs += 1;
        }
    }

    /// Sign convention: positive penalty yards were marched off against the
    /// defense, negative against the offense. A zero-yard penalty defaults to
    /// the possessing team.
    fn attribute_penalty(&mut self, play: &PlayResult, possessing_team: u32) {
        if !play.is_penalty {
            return;
        }
        let charged_team = if play.penalty_yards > 0 {
            self.defending_team(possessing_team)
        } else {
            possessing_team
        };
        if let Some(team) = self.team_games.get_mut(&charged_team) {
            team.penalties += 1;
            team.penalty_yards += play.penalty_yards.unsigned_abs();
        }
    }

    fn track_situation(
        &mut self,
        play: &PlayResult,
        possessing_team: u32,
        down: u8,
        field_position: u8,
    ) {
        let entered_red_zone = field_position >= RED_ZONE_POSITION
            && !*self.in_red_zone.entry(possessing_team).or_insert(false);
        if entered_red_zone {
            self.in_red_zone.insert(possessing_team, true);
        }
        let red_zone_score = field_position >= RED_ZONE_POSITION
            && matches!(play.outcome, PlayOutcome::Touchdown | PlayOutcome::FieldGoalMade);

        // Go-for-it fourth downs only; special-teams plays are not
        // conversion attempts.
        let fourth_down_try = down == 4 && !play.is_punt && !play.is_field_goal_attempt;
        if fourth_down_try {
            self.game.fourth_down_attempts += 1;
            if play.achieved_first_down {
                self.game.fourth_down_conversions += 1;
            }
        }

        if let Some(team) = self.team_games.get_mut(&possessing_team) {
            team.time_of_possession_secs += play.time_elapsed_secs;
            if play.achieved_first_down {
                team.first_downs += 1;
            }
            if down == 3 {
                team.third_down_attempts += 1;
                if play.achieved_first_down {
                    team.third_down_conversions += 1;
                }
            }
            if fourth_down_try {
                team.fourth_down_attempts += 1;
                if play.achieved_first_down {
                    team.fourth_down_conversions += 1;
                }
            }
            if entered_red_zone {
                team.red_zone_attempts += 1;
            }
            if red_zone_score {
                team.red_zone_scores += 1;
            }
        }
    }

    /// Mark the start of a new drive for a team. Clears its red-zone flag so
    /// the next trip inside the 20 counts again.
    pub fn reset_drive_state(&mut self, team_id: u32) {
        self.in_red_zone.insert(team_id, false);
        self.game.drives += 1;
    }

    pub fn finalize_game(&mut self, final_score: BTreeMap<u32, u32>) {
        self.game.finalize(final_score);
    }

    // ------------------------------------------------------------------
    // Read API
    // ------------------------------------------------------------------

    pub fn player_stats(&self, player_id: u32) -> Option<&PlayerStats> {
        self.player_stats.player(player_id)
    }

    pub fn players_filtered(
        &self,
        team_id: Option<u32>,
        name: Option<&str>,
    ) -> Vec<(u32, &PlayerStats)> {
        self.player_stats.filtered(team_id, name)
    }

    /// Persistence flattening; fails fast when any player lacks a team.
    pub fn flatten_player_stats(&self) -> Result<Vec<PersistedPlayerStats>> {
        self.player_stats.flatten_for_persistence()
    }

    pub fn team_stats(&self, team_id: u32) -> Option<&TeamGameStats> {
        self.team_games.get(&team_id)
    }

    pub fn team_offense_totals(&self, team_id: u32) -> Option<&TeamOffenseTotals> {
        self.team_offense.team(team_id)
    }

    pub fn game_stats(&self) -> &GameLevelStats {
        &self.game
    }

    pub fn snapshot(&self) -> GameStatsSnapshot {
        GameStatsSnapshot {
            generated_at: Utc::now(),
            game: self.game.clone(),
            teams: self.team_games.values().cloned().collect(),
            players: self.player_stats.all().map(|(&id, s)| (id, s.clone())).collect(),
        }
    }

    /// Clear every layer for reuse; team identities survive.
    pub fn reset(&mut self) {
        self.player_stats.reset();
        self.team_offense.reset();
        for team in self.team_games.values_mut() {
            team.reset();
        }
        self.game.reset();
        self.recorded_sequences.clear();
        self.last_sequence = None;
        self.in_red_zone.clear();
    }
}
