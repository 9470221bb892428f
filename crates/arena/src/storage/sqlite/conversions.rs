//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use arena_core::competition::{Competition, Participant, Registration};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::Row;

/// Convert a SQLite row to a Competition.
///
/// Expected columns: id, name, description, date, location, created_at, updated_at
pub fn row_to_competition(row: &Row) -> rusqlite::Result<Competition> {
    let date: String = row.get(3)?;
    let created_at: String = row.get(5)?;
    let updated_at: String = row.get(6)?;

    Ok(Competition {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        date: parse_date(3, &date)?,
        location: row.get(4)?,
        created_at: parse_datetime(5, &created_at)?,
        updated_at: parse_datetime(6, &updated_at)?,
    })
}

/// Convert a SQLite row to a Participant.
///
/// Expected columns: id, name, email, created_at, updated_at
pub fn row_to_participant(row: &Row) -> rusqlite::Result<Participant> {
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Participant {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: parse_datetime(3, &created_at)?,
        updated_at: parse_datetime(4, &updated_at)?,
    })
}

/// Convert a SQLite row to a Registration.
///
/// Expected columns: competition_id, participant_id, registration_date, created_at, updated_at
pub fn row_to_registration(row: &Row) -> rusqlite::Result<Registration> {
    let registration_date: String = row.get(2)?;
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;

    Ok(Registration {
        competition_id: row.get(0)?,
        participant_id: row.get(1)?,
        registration_date: parse_date(2, &registration_date)?,
        created_at: parse_datetime(3, &created_at)?,
        updated_at: parse_datetime(4, &updated_at)?,
    })
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD).
fn parse_date(column: usize, s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
