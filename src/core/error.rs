use thiserror::Error;

#[derive(Error, Debug)]
pub enum CombatError {
    #[error("A combat session is already active")]
    SessionAlreadyActive,

    #[error("Unknown technique: {0}")]
    UnknownTechnique(String),

    #[error("Unknown opponent archetype: {0}")]
    UnknownOpponent(String),

    #[error("Invalid combatant data for {name}: {reason}")]
    InvalidCombatant { name: String, reason: String },

    #[error("Combat requires at least one opponent")]
    NoOpponents,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CombatError>;
