mod aggregate;
mod curve;
mod rate;

pub use aggregate::{net_occupancy, OccupancyDelta};
pub use curve::{
    compare, sweep_month, CurveComparison, CurvePoint, CurveSeries, DayCurve, MonthDay,
    MonthSweep, DEFAULT_WINDOW_DAYS,
};
pub use rate::{occupancy_rate, RatePoint};

/// Argument errors raised at the aggregation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaceError {
    #[error("booking window must be a non-negative number of days, got {0}")]
    InvalidWindow(i64),
    #[error("{year}-{month:02} is not a valid calendar month")]
    InvalidMonth { year: i32, month: u32 },
}
