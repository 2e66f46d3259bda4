use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Persistence requires every player to carry a team assignment; an
    /// unset team means the roster layer broke its contract.
    #[error("player {player_id} has no team assignment")]
    MissingTeamAssignment { player_id: u32 },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
