use super::domain::{ReservationStatus, ReservationTransaction};
use super::ReservationImportError;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

const REQUIRED_COLUMNS: [&str; 6] = [
    "ROOM_ID",
    "ROOM_RESERVATION_ID",
    "NIGHT_OF_STAY",
    "DATE_OF_RESERVATION",
    "CANCELLATION_DATE",
    "RPG_STATUS",
];

#[derive(Debug)]
pub(crate) struct ParsedLog {
    pub(crate) transactions: Vec<ReservationTransaction>,
    pub(crate) dropped_rows: usize,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<ParsedLog, ReservationImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(ReservationImportError::MissingColumn(column));
        }
    }

    let mut transactions = Vec::new();
    let mut dropped_rows = 0;

    for record in csv_reader.deserialize::<ReservationRow>() {
        let row = record?;

        // Rows without a reservation date are unusable for pace analysis
        // and are dropped here; every other row is kept as-is.
        let Some(date_of_reservation) = row.date_of_reservation.as_deref().and_then(parse_date)
        else {
            dropped_rows += 1;
            continue;
        };

        transactions.push(ReservationTransaction {
            room_id: row.room_id,
            room_reservation_id: row.room_reservation_id,
            night_of_stay: row.night_of_stay.as_deref().and_then(parse_date),
            date_of_reservation,
            cancellation_date: row.cancellation_date.as_deref().and_then(parse_date),
            status: ReservationStatus::from_code(row.rpg_status),
            date_last_modified: row.date_last_modified.as_deref().and_then(parse_date),
            start_date_of_stay: row.start_date_of_stay.as_deref().and_then(parse_date),
            end_date_of_stay: row.end_date_of_stay.as_deref().and_then(parse_date),
        });
    }

    Ok(ParsedLog {
        transactions,
        dropped_rows,
    })
}

#[derive(Debug, Deserialize)]
struct ReservationRow {
    #[serde(rename = "ROOM_ID")]
    room_id: String,
    #[serde(rename = "ROOM_RESERVATION_ID")]
    room_reservation_id: String,
    #[serde(
        rename = "NIGHT_OF_STAY",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    night_of_stay: Option<String>,
    #[serde(
        rename = "DATE_OF_RESERVATION",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    date_of_reservation: Option<String>,
    #[serde(
        rename = "CANCELLATION_DATE",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    cancellation_date: Option<String>,
    #[serde(rename = "RPG_STATUS")]
    rpg_status: i64,
    #[serde(
        rename = "DATE_LAST_MODIFIED",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    date_last_modified: Option<String>,
    #[serde(
        rename = "START_DATE_OF_STAY",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    start_date_of_stay: Option<String>,
    #[serde(
        rename = "END_DATE_OF_STAY",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    end_date_of_stay: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Dates arrive either as plain `YYYY-MM-DD`, as `YYYY-MM-DD HH:MM:SS`
/// export timestamps, or as RFC 3339. Time-of-day is discarded.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
