use booking_pace::config::ConfigError;
use booking_pace::error::AppError;
use booking_pace::reservations::domain::ReservationLog;
use booking_pace::reservations::ReservationCsvImporter;
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The reservation log plus the figures derived from it once at load
/// time. Shared read-only across all requests; recomputation per target
/// night is a pure pass over the log.
pub(crate) struct PaceState {
    pub(crate) log: ReservationLog,
    pub(crate) total_rooms: usize,
    pub(crate) window_days: i64,
}

impl PaceState {
    pub(crate) fn new(log: ReservationLog, window_days: i64) -> Self {
        let total_rooms = log.total_rooms();
        Self {
            log,
            total_rooms,
            window_days,
        }
    }

    pub(crate) fn load<P: AsRef<Path>>(path: P, window_days: i64) -> Result<Self, AppError> {
        let log = ReservationCsvImporter::from_path(path)?;
        Ok(Self::new(log, window_days))
    }
}

/// Picks the dataset path: an explicit CLI flag wins over configuration.
pub(crate) fn resolve_csv_path(
    flag: Option<PathBuf>,
    configured: Option<PathBuf>,
) -> Result<PathBuf, AppError> {
    flag.or(configured)
        .ok_or(AppError::Config(ConfigError::MissingReservationsCsv))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}
