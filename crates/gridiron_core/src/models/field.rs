use serde::{Deserialize, Serialize};

/// Field-position thresholds on the 0-100 scale (0 = own goal line,
/// 100 = opponent goal line).
pub mod zones {
    /// Snaps at or inside the opponent 10.
    pub const GOAL_LINE: u8 = 90;
    /// Opponent 20 and in.
    pub const RED_ZONE: u8 = 80;
}

/// Down-and-distance thresholds.
pub mod distance {
    pub const SHORT_YARDAGE: u8 = 3;
    pub const LONG_YARDAGE: u8 = 8;
}

/// Situation snapshot handed in by the drive controller before every play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldState {
    /// 1-4.
    pub down: u8,
    pub yards_to_go: u8,
    /// 0-100, offense driving toward 100.
    pub field_position: u8,
}

impl FieldState {
    pub fn new(down: u8, yards_to_go: u8, field_position: u8) -> Self {
        Self { down: down.clamp(1, 4), yards_to_go, field_position: field_position.min(100) }
    }

    pub fn is_goal_line(&self) -> bool {
        self.field_position >= zones::GOAL_LINE
    }

    pub fn is_red_zone(&self) -> bool {
        self.field_position >= zones::RED_ZONE
    }

    pub fn is_short_yardage(&self) -> bool {
        self.yards_to_go <= distance::SHORT_YARDAGE
    }

    pub fn is_long_yardage(&self) -> bool {
        self.yards_to_go >= distance::LONG_YARDAGE
    }

    /// Yards between the spot and the opponent goal line.
    pub fn yards_to_goal(&self) -> i32 {
        100 - self.field_position as i32
    }
}
