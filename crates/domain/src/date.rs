use chrono::DateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvalidDateError {
    #[error("Date: {0} is malformed. Expected unix millis or an RFC 3339 timestamp")]
    Malformed(String),
}

/// Parses a client supplied due date into unix millis. Clients may send
/// either unix millis directly or an RFC 3339 timestamp string.
pub fn parse_due_date(datestr: &str) -> Result<i64, InvalidDateError> {
    if let Ok(millis) = datestr.parse::<i64>() {
        return Ok(millis);
    }
    DateTime::parse_from_rfc3339(datestr)
        .map(|date| date.timestamp_millis())
        .map_err(|_| InvalidDateError::Malformed(datestr.to_string()))
}
