use super::PaceError;
use crate::reservations::domain::{ReservationLog, ReservationStatus};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Net change in reserved rooms recorded on one reservation date.
/// `net_rooms` goes negative when cancellations recorded that date exceed
/// the deduplicated bookings recorded the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancyDelta {
    pub reservation_date: NaiveDate,
    pub net_rooms: i64,
}

/// Reconstructs, for a single target stay night, the net number of rooms
/// reserved per reservation date over the inclusive window
/// `[target_night - window_days, target_night]`.
///
/// Bookings are deduplicated per (`date_of_reservation`,
/// `room_reservation_id`) so repeated updates to one reservation count
/// once per date; cancellations count per occurrence of their
/// `cancellation_date`. Cancellation counts are joined onto the booked
/// dates only: a date carrying cancellations but no bookings yields no
/// output row at all. That gap is inherited from the upstream reporting
/// pipeline and is relied on by consumers, so it is preserved here.
///
/// Output is ordered ascending by reservation date. An empty result is a
/// valid outcome, not an error.
pub fn net_occupancy(
    log: &ReservationLog,
    target_night: NaiveDate,
    window_days: i64,
) -> Result<Vec<OccupancyDelta>, PaceError> {
    if window_days < 0 {
        return Err(PaceError::InvalidWindow(window_days));
    }

    let window_start = target_night - Duration::days(window_days);

    let mut booked: BTreeMap<NaiveDate, HashSet<&str>> = BTreeMap::new();
    let mut cancelled: HashMap<NaiveDate, i64> = HashMap::new();

    for tx in log.transactions() {
        if tx.night_of_stay != Some(target_night) {
            continue;
        }
        if tx.date_of_reservation < window_start || tx.date_of_reservation > target_night {
            continue;
        }

        match tx.status {
            ReservationStatus::Booked => {
                booked
                    .entry(tx.date_of_reservation)
                    .or_default()
                    .insert(tx.room_reservation_id.as_str());
            }
            ReservationStatus::Cancelled => {
                // Cancellations are keyed by the cancellation date, not the
                // reservation date; rows lacking one contribute nothing.
                if let Some(date) = tx.cancellation_date {
                    *cancelled.entry(date).or_insert(0) += 1;
                }
            }
            ReservationStatus::Other(_) => {}
        }
    }

    Ok(booked
        .into_iter()
        .map(|(reservation_date, ids)| OccupancyDelta {
            reservation_date,
            net_rooms: ids.len() as i64 - cancelled.get(&reservation_date).copied().unwrap_or(0),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservations::domain::ReservationTransaction;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn booked(reservation_id: &str, night: NaiveDate, reserved_on: NaiveDate) -> ReservationTransaction {
        ReservationTransaction {
            room_id: format!("room-{reservation_id}"),
            room_reservation_id: reservation_id.to_string(),
            night_of_stay: Some(night),
            date_of_reservation: reserved_on,
            cancellation_date: None,
            status: ReservationStatus::Booked,
            date_last_modified: None,
            start_date_of_stay: Some(night),
            end_date_of_stay: Some(night),
        }
    }

    fn cancelled(
        reservation_id: &str,
        night: NaiveDate,
        reserved_on: NaiveDate,
        cancelled_on: NaiveDate,
    ) -> ReservationTransaction {
        ReservationTransaction {
            cancellation_date: Some(cancelled_on),
            status: ReservationStatus::Cancelled,
            ..booked(reservation_id, night, reserved_on)
        }
    }

    fn night() -> NaiveDate {
        date(2022, 7, 16)
    }

    #[test]
    fn counts_one_booking_per_reservation_date() {
        let log = ReservationLog::new(vec![booked("RES-1", night(), date(2022, 6, 1))]);

        let deltas = net_occupancy(&log, night(), 100).expect("window is valid");
        assert_eq!(
            deltas,
            vec![OccupancyDelta {
                reservation_date: date(2022, 6, 1),
                net_rooms: 1
            }]
        );
    }

    #[test]
    fn duplicate_reservation_updates_count_once_per_date() {
        let log = ReservationLog::new(vec![
            booked("RES-1", night(), date(2022, 6, 1)),
            booked("RES-1", night(), date(2022, 6, 1)),
            booked("RES-1", night(), date(2022, 6, 3)),
        ]);

        let deltas = net_occupancy(&log, night(), 100).expect("window is valid");
        assert_eq!(deltas.len(), 2);
        assert_eq!(deltas[0].net_rooms, 1);
        assert_eq!(deltas[1].net_rooms, 1);
    }

    #[test]
    fn cancellations_count_per_occurrence() {
        let log = ReservationLog::new(vec![
            booked("RES-1", night(), date(2022, 6, 1)),
            booked("RES-2", night(), date(2022, 6, 1)),
            booked("RES-3", night(), date(2022, 6, 1)),
            cancelled("RES-2", night(), date(2022, 6, 1), date(2022, 6, 1)),
            cancelled("RES-2", night(), date(2022, 6, 1), date(2022, 6, 1)),
        ]);

        let deltas = net_occupancy(&log, night(), 100).expect("window is valid");
        assert_eq!(deltas[0].net_rooms, 1, "3 distinct bookings minus 2 cancellation rows");
    }

    #[test]
    fn net_rooms_can_go_negative() {
        let log = ReservationLog::new(vec![
            booked("RES-1", night(), date(2022, 6, 4)),
            cancelled("RES-2", night(), date(2022, 6, 1), date(2022, 6, 4)),
            cancelled("RES-3", night(), date(2022, 6, 2), date(2022, 6, 4)),
        ]);

        let deltas = net_occupancy(&log, night(), 100).expect("window is valid");
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].net_rooms, -1);
    }

    #[test]
    fn cancellation_only_dates_emit_no_row() {
        let log = ReservationLog::new(vec![
            booked("RES-1", night(), date(2022, 6, 1)),
            cancelled("RES-2", night(), date(2022, 6, 1), date(2022, 6, 5)),
        ]);

        let deltas = net_occupancy(&log, night(), 100).expect("window is valid");
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].reservation_date, date(2022, 6, 1));
        assert_eq!(deltas[0].net_rooms, 1);
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let log = ReservationLog::new(vec![
            booked("RES-EDGE", night(), date(2022, 4, 7)),
            booked("RES-OUT", night(), date(2022, 4, 6)),
            booked("RES-LAST", night(), night()),
        ]);

        let deltas = net_occupancy(&log, night(), 100).expect("window is valid");
        let dates: Vec<_> = deltas.iter().map(|d| d.reservation_date).collect();
        assert_eq!(dates, vec![date(2022, 4, 7), night()]);
    }

    #[test]
    fn zero_day_window_keeps_only_the_target_night() {
        let log = ReservationLog::new(vec![
            booked("RES-1", night(), night()),
            booked("RES-2", night(), date(2022, 7, 15)),
        ]);

        let deltas = net_occupancy(&log, night(), 0).expect("window is valid");
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas[0].reservation_date, night());
    }

    #[test]
    fn other_nights_and_unknown_statuses_are_ignored() {
        let mut odd = booked("RES-ODD", night(), date(2022, 6, 2));
        odd.status = ReservationStatus::Other(9);

        let log = ReservationLog::new(vec![
            booked("RES-1", date(2022, 7, 17), date(2022, 6, 1)),
            odd,
        ]);

        let deltas = net_occupancy(&log, night(), 100).expect("window is valid");
        assert!(deltas.is_empty());
    }

    #[test]
    fn output_dates_are_strictly_ascending() {
        let log = ReservationLog::new(vec![
            booked("RES-3", night(), date(2022, 6, 20)),
            booked("RES-1", night(), date(2022, 6, 1)),
            booked("RES-2", night(), date(2022, 6, 10)),
        ]);

        let deltas = net_occupancy(&log, night(), 100).expect("window is valid");
        assert!(deltas
            .windows(2)
            .all(|pair| pair[0].reservation_date < pair[1].reservation_date));
    }

    #[test]
    fn negative_window_is_rejected() {
        let log = ReservationLog::default();
        let error = net_occupancy(&log, night(), -1).expect_err("negative window");
        assert_eq!(error, PaceError::InvalidWindow(-1));
    }

    #[test]
    fn repeated_calls_yield_identical_output() {
        let log = ReservationLog::new(vec![
            booked("RES-1", night(), date(2022, 6, 1)),
            cancelled("RES-2", night(), date(2022, 6, 1), date(2022, 6, 1)),
        ]);

        let first = net_occupancy(&log, night(), 100).expect("window is valid");
        let second = net_occupancy(&log, night(), 100).expect("window is valid");
        assert_eq!(first, second);
    }
}
