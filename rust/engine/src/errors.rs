use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("Invalid luckiness {0}: must be a finite number")]
    InvalidLuckiness(String),
}
