use super::aggregate::net_occupancy;
use super::rate::occupancy_rate;
use super::PaceError;
use crate::reservations::domain::ReservationLog;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// Default booking window: reservation activity is considered over the
/// 100 days leading up to the target night.
pub const DEFAULT_WINDOW_DAYS: i64 = 100;

const PRIOR_YEAR_OFFSET_DAYS: i64 = 365;

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Year-stripped calendar position. Curves for two different years are
/// overlaid by aligning points with equal month-day coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub const fn month(self) -> u32 {
        self.month
    }

    pub const fn day(self) -> u32 {
        self.day
    }
}

impl fmt::Display for MonthDay {
    /// Formats as a chart tick label, e.g. "Jul 16".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}",
            MONTH_ABBREV[(self.month - 1) as usize],
            self.day
        )
    }
}

impl Serialize for MonthDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:02}-{:02}", self.month, self.day))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub reservation_date: NaiveDate,
    pub month_day: MonthDay,
    pub occupancy_pct: f64,
}

/// One booking curve: cumulative occupancy percentage per reservation
/// date, labeled for legend display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSeries {
    pub label: String,
    pub points: Vec<CurvePoint>,
}

/// Two aligned booking curves: the target night and the same calendar
/// night one year (365 days) earlier. Series lengths may differ; no
/// resampling or interpolation is applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveComparison {
    pub target_night: NaiveDate,
    pub prior_year_night: NaiveDate,
    pub current: CurveSeries,
    pub prior_year: CurveSeries,
}

/// One curve of a month sweep, labeled by its day of month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCurve {
    pub day: u32,
    pub series: CurveSeries,
}

/// Booking curves for every day of one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSweep {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub days: Vec<DayCurve>,
}

/// Builds the year-over-year comparison for one target night.
pub fn compare(
    log: &ReservationLog,
    target_night: NaiveDate,
    total_rooms: usize,
    window_days: i64,
) -> Result<CurveComparison, PaceError> {
    let prior_year_night = target_night - Duration::days(PRIOR_YEAR_OFFSET_DAYS);

    let current = build_series(
        log,
        target_night,
        total_rooms,
        window_days,
        format!("Booking Curve - {target_night}"),
    )?;
    let prior_year = build_series(
        log,
        prior_year_night,
        total_rooms,
        window_days,
        format!("Booking Curve - {prior_year_night}"),
    )?;

    Ok(CurveComparison {
        target_night,
        prior_year_night,
        current,
        prior_year,
    })
}

/// Builds one booking curve per day of the given (year, month), ascending
/// by day number.
pub fn sweep_month(
    log: &ReservationLog,
    year: i32,
    month: u32,
    total_rooms: usize,
    window_days: i64,
) -> Result<MonthSweep, PaceError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(PaceError::InvalidMonth { year, month })?;

    let mut days = Vec::new();
    for day in 1..=days_in_month(first) {
        let target_night =
            NaiveDate::from_ymd_opt(year, month, day).ok_or(PaceError::InvalidMonth { year, month })?;
        let series = build_series(
            log,
            target_night,
            total_rooms,
            window_days,
            format!("Day {day}"),
        )?;
        days.push(DayCurve { day, series });
    }

    Ok(MonthSweep {
        year,
        month,
        label: format!("{} {}", MONTH_NAMES[(month - 1) as usize], year),
        days,
    })
}

fn build_series(
    log: &ReservationLog,
    target_night: NaiveDate,
    total_rooms: usize,
    window_days: i64,
    label: String,
) -> Result<CurveSeries, PaceError> {
    let deltas = net_occupancy(log, target_night, window_days)?;
    let points = occupancy_rate(&deltas, total_rooms)
        .into_iter()
        .map(|rate| CurvePoint {
            reservation_date: rate.reservation_date,
            month_day: MonthDay::of(rate.reservation_date),
            occupancy_pct: rate.occupancy_pct,
        })
        .collect();

    Ok(CurveSeries { label, points })
}

fn days_in_month(first_of_month: NaiveDate) -> u32 {
    let next_month = if first_of_month.month() == 12 {
        NaiveDate::from_ymd_opt(first_of_month.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first_of_month.year(), first_of_month.month() + 1, 1)
    };

    next_month
        .map(|next| (next - first_of_month).num_days() as u32)
        .expect("first of month always has a successor month")
}
