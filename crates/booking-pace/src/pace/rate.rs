use super::aggregate::OccupancyDelta;
use chrono::NaiveDate;
use serde::Serialize;

/// Cumulative occupancy expressed as a percentage of total room inventory
/// as of one reservation date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatePoint {
    pub reservation_date: NaiveDate,
    pub occupancy_pct: f64,
}

/// Turns per-date net room counts into a running occupancy percentage,
/// preserving the input order.
///
/// `total_rooms == 0` produces NaN or infinite percentages instead of an
/// error; callers are expected to check the inventory before asking for
/// rates.
pub fn occupancy_rate(deltas: &[OccupancyDelta], total_rooms: usize) -> Vec<RatePoint> {
    let mut cumulative: i64 = 0;

    deltas
        .iter()
        .map(|delta| {
            cumulative += delta.net_rooms;
            RatePoint {
                reservation_date: delta.reservation_date,
                occupancy_pct: cumulative as f64 / total_rooms as f64 * 100.0,
            }
        })
        .collect()
}
