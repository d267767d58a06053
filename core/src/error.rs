use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Move is not allowed in the current row state")]
    IllegalMove,
    #[error("Index out of range")]
    InvalidIndex,
    #[error("Die face must be between 1 and 6")]
    InvalidFace,
    #[error("Stored state is malformed")]
    CorruptState,
    #[error("State could not be serialized")]
    SerializeFailed,
}

pub type Result<T> = core::result::Result<T, GameError>;
