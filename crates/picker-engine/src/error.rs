//! Error types for picker-engine operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid week start: {0}")]
    InvalidWeekStart(String),

    #[error("Invalid step: {0}")]
    InvalidStep(String),
}

pub type Result<T> = std::result::Result<T, PickerError>;
