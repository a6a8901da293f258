//! Error types for errand-engine operations.

use thiserror::Error;

use crate::errand::{ErrandId, UserId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrandError {
    #[error("Invalid time format: '{0}' (expected HH:MM, 24-hour)")]
    InvalidTimeFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Errand {0} not found")]
    NotFound(ErrandId),

    #[error("User {user} does not own errand {errand}")]
    NotOwner { errand: ErrandId, user: UserId },

    #[error("Duplicate errand id {0}")]
    DuplicateId(ErrandId),

    #[error("No errand ids left to allocate")]
    IdSpaceExhausted,
}

pub type Result<T> = std::result::Result<T, ErrandError>;
