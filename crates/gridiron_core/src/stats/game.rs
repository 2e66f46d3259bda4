use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Game-wide meta counters, owned by the aggregator. The score and winner
/// are set exactly once, at `finalize`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GameLevelStats {
    pub total_plays: u32,
    pub drives: u32,
    pub game_time_secs: u32,

    pub scoring_plays: u32,
    pub touchdowns: u32,
    pub field_goals_made: u32,
    pub field_goals_missed: u32,
    pub safeties: u32,

    pub turnovers: u32,
    pub punts: u32,
    /// Plays with |yards| >= 20, either direction.
    pub big_plays: u32,
    pub first_downs: u32,

    /// Go-for-it fourth downs only; punts and field-goal attempts excluded.
    pub fourth_down_attempts: u32,
    pub fourth_down_conversions: u32,

    pub final_score: BTreeMap<u32, u32>,
    pub winner: Option<u32>,
    pub finalized: bool,
}

impl GameLevelStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the final score and settle the winner; a tie leaves it `None`.
    pub fn finalize(&mut self, final_score: BTreeMap<u32, u32>) {
        let top = final_score.iter().max_by_key(|(_, &points)| points);
        self.winner = top.and_then(|(&team, &points)| {
            let shared = final_score.values().filter(|&&p| p == points).count();
            if shared > 1 {
                None
            } else {
                Some(team)
            }
        });
        self.final_score = final_score;
        self.finalized = true;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
