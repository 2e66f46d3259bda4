use serde::{Deserialize, Serialize};

/// Game counters for one team, owned by the aggregator. Player records keep
/// gross passing yards; the net-passing convention lives here, in
/// [`TeamGameStats::total_yards`].
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TeamGameStats {
    pub team_id: u32,

    // Offense
    pub rushing_attempts: u32,
    pub rushing_yards: i32,
    pub gross_passing_yards: i32,
    pub sack_yards_lost: u32,
    pub sacks_allowed: u32,
    pub interceptions_thrown: u32,
    pub fumbles_lost: u32,
    pub turnovers: u32,
    pub first_downs: u32,

    // Defense
    pub defensive_sacks: u32,
    pub qb_hits: u32,
    pub defensive_interceptions: u32,
    pub passes_defended: u32,
    pub forced_fumbles: u32,
    pub tackles_for_loss: u32,

    // Penalties
    pub penalties: u32,
    pub penalty_yards: u32,

    // Situational
    pub third_down_attempts: u32,
    pub third_down_conversions: u32,
    pub fourth_down_attempts: u32,
    pub fourth_down_conversions: u32,
    pub time_of_possession_secs: u32,
    pub red_zone_attempts: u32,
    pub red_zone_scores: u32,
}

impl TeamGameStats {
    pub fn new(team_id: u32) -> Self {
        Self { team_id, ..Default::default() }
    }

    /// Net passing yards per the official convention: gross minus sack
    /// losses.
    pub fn net_passing_yards(&self) -> i32 {
        self.gross_passing_yards - self.sack_yards_lost as i32
    }

    /// Team total offense: net passing plus rushing.
    pub fn total_yards(&self) -> i32 {
        self.net_passing_yards() + self.rushing_yards
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.team_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_yards_uses_net_passing() {
        let mut stats = TeamGameStats::new(1);
        stats.gross_passing_yards = 266;
        stats.sack_yards_lost = 56;
        stats.rushing_yards = 36;
        assert_eq!(stats.net_passing_yards(), 210);
        assert_eq!(stats.total_yards(), 246);
    }

    #[test]
    fn reset_keeps_identity() {
        let mut stats = TeamGameStats::new(4);
        stats.rushing_yards = 120;
        stats.penalties = 3;
        stats.reset();
        assert_eq!(stats.team_id, 4);
        assert_eq!(stats.rushing_yards, 0);
        assert_eq!(stats.penalties, 0);
    }
}
