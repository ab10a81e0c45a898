use crate::infra::{parse_date, resolve_csv_path, PaceState};
use booking_pace::config::AppConfig;
use booking_pace::error::AppError;
use booking_pace::pace::{compare, sweep_month, CurveSeries};
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct CurveArgs {
    /// Path to the reservation CSV export (falls back to APP_RESERVATIONS_CSV)
    #[arg(long)]
    pub(crate) reservations_csv: Option<PathBuf>,
    /// Target stay night (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) target_night: NaiveDate,
    /// Booking window length in days (falls back to APP_WINDOW_DAYS)
    #[arg(long)]
    pub(crate) window_days: Option<i64>,
}

#[derive(Args, Debug)]
pub(crate) struct MonthArgs {
    /// Path to the reservation CSV export (falls back to APP_RESERVATIONS_CSV)
    #[arg(long)]
    pub(crate) reservations_csv: Option<PathBuf>,
    /// Target year, e.g. 2022
    #[arg(long)]
    pub(crate) year: i32,
    /// Target month number, 1-12
    #[arg(long)]
    pub(crate) month: u32,
    /// Booking window length in days (falls back to APP_WINDOW_DAYS)
    #[arg(long)]
    pub(crate) window_days: Option<i64>,
}

pub(crate) fn run_curve_report(args: CurveArgs) -> Result<(), AppError> {
    let CurveArgs {
        reservations_csv,
        target_night,
        window_days,
    } = args;

    let (pace, window_days) = load_pace_state(reservations_csv, window_days)?;

    let comparison = compare(&pace.log, target_night, pace.total_rooms, window_days)?;

    println!("Booking pace comparison");
    println!(
        "Dataset: {} transactions | {} rooms | {} day window",
        pace.log.len(),
        pace.total_rooms,
        window_days
    );

    render_series(&comparison.current);
    render_series(&comparison.prior_year);

    Ok(())
}

pub(crate) fn run_month_report(args: MonthArgs) -> Result<(), AppError> {
    let MonthArgs {
        reservations_csv,
        year,
        month,
        window_days,
    } = args;

    let (pace, window_days) = load_pace_state(reservations_csv, window_days)?;

    let sweep = sweep_month(&pace.log, year, month, pace.total_rooms, window_days)?;

    println!("Booking curves for {} ({} day window)", sweep.label, window_days);
    println!(
        "Dataset: {} transactions | {} rooms",
        pace.log.len(),
        pace.total_rooms
    );

    for day in &sweep.days {
        match day.series.points.last() {
            Some(last) => println!(
                "  Day {:>2}: {:>3} reservation dates | final pace {:6.1}%",
                day.day,
                day.series.points.len(),
                last.occupancy_pct
            ),
            None => println!("  Day {:>2}: no reservation activity in window", day.day),
        }
    }

    Ok(())
}

fn load_pace_state(
    flag_path: Option<PathBuf>,
    flag_window: Option<i64>,
) -> Result<(PaceState, i64), AppError> {
    let config = AppConfig::load()?;
    let csv_path = resolve_csv_path(flag_path, config.pace.reservations_csv.clone())?;
    let pace = PaceState::load(&csv_path, config.pace.window_days)?;

    if pace.total_rooms == 0 {
        return Err(AppError::EmptyRoomInventory);
    }

    let window_days = flag_window.unwrap_or(pace.window_days);
    Ok((pace, window_days))
}

fn render_series(series: &CurveSeries) {
    println!("\n{}", series.label);
    if series.points.is_empty() {
        println!("  no reservation activity in window");
        return;
    }

    for point in &series.points {
        println!("  {}  {:6.1}%", point.month_day, point.occupancy_pct);
    }
}
