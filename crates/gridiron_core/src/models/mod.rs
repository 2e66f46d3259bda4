pub mod field;
pub mod play;
pub mod player;
pub mod stats;
pub mod team;

pub use field::FieldState;
pub use play::{PlayOutcome, PlayResult, PlaySequencer};
pub use player::{Player, Position, PositionGroup, Role};
pub use stats::{PlayStatsSummary, PlayerStats};
pub use team::Team;
