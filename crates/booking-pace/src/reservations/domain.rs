use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Decoded `RPG_STATUS` column. Unknown codes are preserved so their rows
/// still count toward room inventory without entering either partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Booked,
    Cancelled,
    Other(i64),
}

impl ReservationStatus {
    pub const fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Booked,
            2 => Self::Cancelled,
            other => Self::Other(other),
        }
    }

    pub const fn code(self) -> i64 {
        match self {
            Self::Booked => 1,
            Self::Cancelled => 2,
            Self::Other(code) => code,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Booked => "Booked",
            Self::Cancelled => "Cancelled",
            Self::Other(_) => "Unrecognized",
        }
    }
}

/// One row of the reservation transaction log. A reservation spanning
/// several nights appears as one row per night; updates to the same
/// reservation repeat its `room_reservation_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationTransaction {
    pub room_id: String,
    pub room_reservation_id: String,
    pub night_of_stay: Option<NaiveDate>,
    pub date_of_reservation: NaiveDate,
    pub cancellation_date: Option<NaiveDate>,
    pub status: ReservationStatus,
    pub date_last_modified: Option<NaiveDate>,
    pub start_date_of_stay: Option<NaiveDate>,
    pub end_date_of_stay: Option<NaiveDate>,
}

/// Cleaned, immutable transaction dataset. Loaded once and only read
/// afterwards; every aggregation is a pure pass over the slice.
#[derive(Debug, Clone, Default)]
pub struct ReservationLog {
    transactions: Vec<ReservationTransaction>,
}

impl ReservationLog {
    pub(crate) fn new(transactions: Vec<ReservationTransaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[ReservationTransaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Count of distinct physical rooms across the whole log, independent
    /// of any target night. Rows with unrecognized status codes count too.
    pub fn total_rooms(&self) -> usize {
        self.transactions
            .iter()
            .map(|tx| tx.room_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(room_id: &str) -> ReservationTransaction {
        ReservationTransaction {
            room_id: room_id.to_string(),
            room_reservation_id: format!("res-{room_id}"),
            night_of_stay: NaiveDate::from_ymd_opt(2022, 7, 16),
            date_of_reservation: NaiveDate::from_ymd_opt(2022, 6, 1).expect("valid date"),
            cancellation_date: None,
            status: ReservationStatus::Booked,
            date_last_modified: None,
            start_date_of_stay: None,
            end_date_of_stay: None,
        }
    }

    #[test]
    fn status_codes_round_trip() {
        assert_eq!(ReservationStatus::from_code(1), ReservationStatus::Booked);
        assert_eq!(ReservationStatus::from_code(2), ReservationStatus::Cancelled);
        assert_eq!(ReservationStatus::from_code(7), ReservationStatus::Other(7));
        assert_eq!(ReservationStatus::from_code(7).code(), 7);
        assert_eq!(ReservationStatus::Other(7).label(), "Unrecognized");
    }

    #[test]
    fn total_rooms_counts_distinct_room_ids() {
        let log = ReservationLog::new(vec![
            transaction("R1"),
            transaction("R1"),
            transaction("R2"),
        ]);
        assert_eq!(log.total_rooms(), 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn empty_log_has_no_rooms() {
        let log = ReservationLog::default();
        assert!(log.is_empty());
        assert_eq!(log.total_rooms(), 0);
    }
}
