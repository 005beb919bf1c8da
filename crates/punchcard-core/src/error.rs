use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid clock time '{0}': expected HH:MM")]
    InvalidClockTime(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid date range: {0} is after {1}")]
    InvalidRange(NaiveDate, NaiveDate),
}

pub type Result<T> = std::result::Result<T, Error>;
