use serde::{Deserialize, Serialize};

use super::stats::PlayStatsSummary;

/// Final classification of a snap. The run executor only ever produces
/// `Gain`, `Touchdown`, `Fumble`, or `Safety`; the rest come from the drive
/// controller (kicks, punts, pass turnovers) and are classified by the
/// aggregator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlayOutcome {
    Gain,
    Touchdown,
    Fumble,
    Safety,
    Interception,
    FieldGoalMade,
    FieldGoalMissed,
    Punt,
}

impl PlayOutcome {
    pub fn is_score(&self) -> bool {
        matches!(self, PlayOutcome::Touchdown | PlayOutcome::FieldGoalMade | PlayOutcome::Safety)
    }

    pub fn is_turnover(&self) -> bool {
        matches!(self, PlayOutcome::Fumble | PlayOutcome::Interception)
    }
}

/// One resolved play as handed to the statistics layer. Immutable once built.
///
/// `sequence` is assigned exactly once by the producer (see
/// [`PlaySequencer`]); the aggregator uses it to reject duplicate or
/// out-of-order submissions instead of comparing object identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayResult {
    pub sequence: u64,
    pub outcome: PlayOutcome,
    pub yards_gained: i32,
    pub points: u8,
    pub time_elapsed_secs: u32,
    pub is_scoring_play: bool,
    pub is_turnover: bool,
    pub is_punt: bool,
    pub is_field_goal_attempt: bool,
    pub is_penalty: bool,
    /// Sign convention: positive yards were assessed against the defense,
    /// negative against the offense.
    pub penalty_yards: i32,
    pub achieved_first_down: bool,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<PlayStatsSummary>,
}

impl PlayResult {
    /// A no-frills result with every flag cleared. Callers flip the flags
    /// that apply and attach a stats summary when they have one.
    pub fn new(sequence: u64, outcome: PlayOutcome, yards_gained: i32) -> Self {
        let points = match outcome {
            PlayOutcome::Touchdown => 6,
            PlayOutcome::FieldGoalMade => 3,
            PlayOutcome::Safety => 2,
            _ => 0,
        };
        Self {
            sequence,
            outcome,
            yards_gained,
            points,
            time_elapsed_secs: 0,
            is_scoring_play: outcome.is_score(),
            is_turnover: outcome.is_turnover(),
            is_punt: outcome == PlayOutcome::Punt,
            is_field_goal_attempt: matches!(
                outcome,
                PlayOutcome::FieldGoalMade | PlayOutcome::FieldGoalMissed
            ),
            is_penalty: false,
            penalty_yards: 0,
            achieved_first_down: false,
            description: String::new(),
            stats: None,
        }
    }

    pub fn with_elapsed(mut self, secs: u32) -> Self {
        self.time_elapsed_secs = secs;
        self
    }

    pub fn with_first_down(mut self) -> Self {
        self.achieved_first_down = true;
        self
    }

    pub fn with_penalty(mut self, yards: i32) -> Self {
        self.is_penalty = true;
        self.penalty_yards = yards;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_stats(mut self, stats: PlayStatsSummary) -> Self {
        self.stats = Some(stats);
        self
    }
}

/// Hands out monotonically increasing play numbers. One per game, owned by
/// whichever layer constructs [`PlayResult`]s.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PlaySequencer {
    next: u64,
}

impl PlaySequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u64 {
        let seq = self.next;
        self.next += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_flags_follow_classification() {
        let td = PlayResult::new(0, PlayOutcome::Touchdown, 12);
        assert!(td.is_scoring_play);
        assert_eq!(td.points, 6);
        assert!(!td.is_turnover);

        let fumble = PlayResult::new(1, PlayOutcome::Fumble, 3);
        assert!(fumble.is_turnover);
        assert_eq!(fumble.points, 0);

        let fg = PlayResult::new(2, PlayOutcome::FieldGoalMissed, 0);
        assert!(fg.is_field_goal_attempt);
        assert!(!fg.is_scoring_play);
    }

    #[test]
    fn sequencer_is_monotone_from_zero() {
        let mut seq = PlaySequencer::new();
        assert_eq!(seq.next(), 0);
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
    }
}
