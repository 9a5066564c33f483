//! Error types for conftime operations.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid calendar: {0}")]
    InvalidCalendar(String),

    #[error("Invalid date for day {day}: {value}")]
    InvalidDate { day: u8, value: String },

    #[error("Unknown admin level: {0}")]
    UnknownAdminLevel(i64),
}

pub type Result<T> = std::result::Result<T, ConfError>;
