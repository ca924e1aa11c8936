use thiserror::Error;

use crate::models::PlayerId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no players found")]
    NoPlayers,

    #[error("rank {rank} does not exist (population {population})")]
    RankOutOfRange { rank: usize, population: usize },

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
}

pub type Result<T> = std::result::Result<T, StoreError>;
