//! Self-reported metrics history and its chart projection.
//!
//! The log is append-mostly: entries are added at the end, deleted by id and
//! never edited. Order is insertion order.

use crate::{
    core::store::{self, keys},
    errors::{Error, Result},
};
use chrono::{DateTime, Local, SecondsFormat};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::{debug, info};
use uuid::Uuid;

/// Width of the chart view box.
pub const CHART_WIDTH: f64 = 100.0;
/// Height of the chart view box.
pub const CHART_HEIGHT: f64 = 50.0;
/// Blank margin kept inside the view box on every side.
pub const CHART_PADDING: f64 = 5.0;

/// One dated self-report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    /// UUID v4
    pub id: String,
    /// RFC 3339 timestamp
    pub date: String,
    /// Human-readable date, e.g. `"19/10/2026, 08:30"`
    pub display_date: String,
    /// Kilograms, as typed
    pub weight: String,
    /// 1-10
    pub energy: u8,
    /// Hours, as typed
    pub sleep: String,
    /// Free-form; blank notes are stored as `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DailyLog {
    /// Builds a validated entry stamped with `now` and a fresh id.
    ///
    /// # Errors
    /// `Error::InvalidEnergy` outside 1-10, `Error::InvalidMetric` when weight
    /// or sleep is not a non-negative number.
    pub fn record(
        weight: &str,
        energy: u8,
        sleep: &str,
        notes: Option<String>,
        now: DateTime<Local>,
    ) -> Result<Self> {
        if !(1..=10).contains(&energy) {
            return Err(Error::InvalidEnergy { energy });
        }
        validate_amount("weight", weight)?;
        validate_amount("sleep", sleep)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            display_date: now.format("%d/%m/%Y, %H:%M").to_string(),
            weight: weight.trim().to_string(),
            energy,
            sleep: sleep.trim().to_string(),
            notes: notes.filter(|n| !n.trim().is_empty()),
        })
    }

    /// Numeric value of `field`, if it parses.
    #[must_use]
    pub fn value(&self, field: MetricField) -> Option<f64> {
        match field {
            MetricField::Weight => parse_number(&self.weight),
            MetricField::Energy => Some(f64::from(self.energy)),
            MetricField::Sleep => parse_number(&self.sleep),
        }
    }

    /// Date part of the display date, used for chart labels.
    #[must_use]
    pub fn short_date(&self) -> &str {
        self.display_date
            .split(',')
            .next()
            .unwrap_or(&self.display_date)
    }
}

/// Accepts both `70.5` and `70,5`.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn validate_amount(field: &str, raw: &str) -> Result<()> {
    match parse_number(raw) {
        Some(value) if value >= 0.0 => Ok(()),
        _ => Err(Error::InvalidMetric {
            field: field.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Chartable numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    /// Body weight in kilograms
    Weight,
    /// Self-rated energy, 1-10
    Energy,
    /// Hours slept
    Sleep,
}

impl MetricField {
    /// Axis label with unit.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weight => "Peso (kg)",
            Self::Energy => "Energia (1-10)",
            Self::Sleep => "Sono (horas)",
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weight => "weight",
            Self::Energy => "energy",
            Self::Sleep => "sleep",
        })
    }
}

impl FromStr for MetricField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weight" | "peso" => Ok(Self::Weight),
            "energy" | "energia" => Ok(Self::Energy),
            "sleep" | "sono" => Ok(Self::Sleep),
            other => Err(format!(
                "unknown metric '{other}' (expected weight, energy or sleep)"
            )),
        }
    }
}

/// A projected chart point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    /// Raw value as recorded
    pub value: f64,
    /// 0.0 at the series minimum, 1.0 at the maximum
    pub normalized: f64,
    /// View-box x, evenly spaced by entry index
    pub x: f64,
    /// View-box y, growing downward
    pub y: f64,
}

/// A series ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Field the series was projected from
    pub field: MetricField,
    /// Smallest value in the series
    pub min: f64,
    /// Largest value in the series
    pub max: f64,
    /// One point per usable entry, in log order
    pub points: Vec<ChartPoint>,
    /// Short date of the first point
    pub first_label: String,
    /// Short date of the last point
    pub last_label: String,
}

/// Outcome of projecting a field.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesProjection {
    /// Fewer than two usable entries
    InsufficientData,
    /// Two or more points to draw
    Chart(ChartSeries),
}

/// The ordered log history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricLog(Vec<DailyLog>);

impl MetricLog {
    /// Every entry, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[DailyLog] {
        &self.0
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been logged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends at the end.
    ///
    /// # Errors
    /// Returns `Error::DuplicateLogId` if an entry with the same id exists.
    pub fn append(&mut self, entry: DailyLog) -> Result<()> {
        if self.0.iter().any(|existing| existing.id == entry.id) {
            return Err(Error::DuplicateLogId { id: entry.id });
        }
        self.0.push(entry);
        Ok(())
    }

    /// Removes the entry with `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(position) = self.0.iter().position(|entry| entry.id == id) else {
            return false;
        };
        self.0.remove(position);
        true
    }

    /// Normalizes `field` to [0, 1] across the history for charting.
    ///
    /// Entries whose value does not parse are left out. A flat series uses a
    /// range of 1, so every point sits at 0.0.
    #[must_use]
    pub fn project_series(&self, field: MetricField) -> SeriesProjection {
        let samples: Vec<(&DailyLog, f64)> = self
            .0
            .iter()
            .filter_map(|entry| entry.value(field).map(|value| (entry, value)))
            .collect();

        let (Some((first, _)), Some((last, _))) = (samples.first(), samples.last()) else {
            return SeriesProjection::InsufficientData;
        };
        if samples.len() < 2 {
            return SeriesProjection::InsufficientData;
        }

        let min = samples.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let max = samples.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        let range = if max - min == 0.0 { 1.0 } else { max - min };

        #[allow(clippy::cast_precision_loss)]
        let steps = (samples.len() - 1) as f64;
        let plot_width = CHART_WIDTH - CHART_PADDING * 2.0;
        let plot_height = CHART_HEIGHT - CHART_PADDING * 2.0;

        let points = samples
            .iter()
            .enumerate()
            .map(|(i, (_, value))| {
                let normalized = (value - min) / range;
                #[allow(clippy::cast_precision_loss)]
                let x = (i as f64 / steps).mul_add(plot_width, CHART_PADDING);
                let y = CHART_HEIGHT - CHART_PADDING - normalized * plot_height;
                ChartPoint {
                    value: *value,
                    normalized,
                    x,
                    y,
                }
            })
            .collect();

        debug!("Projected {} points for {field}", samples.len());

        SeriesProjection::Chart(ChartSeries {
            field,
            min,
            max,
            points,
            first_label: first.short_date().to_string(),
            last_label: last.short_date().to_string(),
        })
    }
}

/// Reads the log history; absent or unreadable data loads as empty.
pub async fn load_logs<C: ConnectionTrait>(db: &C) -> Result<MetricLog> {
    store::load_or_default(db, keys::LOGS).await
}

/// Writes the whole log history, replacing the previous value.
///
/// # Arguments
/// * `db` - Database connection
/// * `logs` - The full history to store
pub async fn save_logs<C: ConnectionTrait>(db: &C, logs: &MetricLog) -> Result<()> {
    store::save(db, keys::LOGS, logs).await?;
    info!("Saved {} log entries", logs.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{sample_log, setup_test_db};
    use chrono::TimeZone;

    fn log_with(id: &str, weight: &str, energy: u8, sleep: &str) -> DailyLog {
        DailyLog {
            weight: weight.to_string(),
            sleep: sleep.to_string(),
            ..sample_log(id, energy)
        }
    }

    #[test]
    fn test_energy_five_and_nine_span_the_range() {
        let mut log = MetricLog::default();
        log.append(sample_log("a", 5)).unwrap();
        log.append(sample_log("b", 9)).unwrap();

        let SeriesProjection::Chart(series) = log.project_series(MetricField::Energy) else {
            panic!("expected a chart");
        };

        assert_eq!(series.points[0].normalized, 0.0);
        assert_eq!(series.points[1].normalized, 1.0);
        assert_eq!(series.min, 5.0);
        assert_eq!(series.max, 9.0);
    }

    #[test]
    fn test_flat_series_is_finite() {
        let mut log = MetricLog::default();
        log.append(sample_log("a", 7)).unwrap();
        log.append(sample_log("b", 7)).unwrap();

        let SeriesProjection::Chart(series) = log.project_series(MetricField::Energy) else {
            panic!("expected a chart");
        };

        for point in &series.points {
            assert!(point.normalized.is_finite());
            assert!(point.x.is_finite() && point.y.is_finite());
        }
    }

    #[test]
    fn test_fewer_than_two_entries_is_insufficient() {
        let mut log = MetricLog::default();
        assert_eq!(log.project_series(MetricField::Weight), SeriesProjection::InsufficientData);

        log.append(sample_log("a", 5)).unwrap();
        assert_eq!(log.project_series(MetricField::Weight), SeriesProjection::InsufficientData);
    }

    #[test]
    fn test_unparsable_values_are_skipped() {
        let mut log = MetricLog::default();
        log.append(log_with("a", "80", 5, "7")).unwrap();
        log.append(log_with("b", "n/a", 5, "7")).unwrap();

        assert_eq!(log.project_series(MetricField::Weight), SeriesProjection::InsufficientData);
        assert!(matches!(log.project_series(MetricField::Sleep), SeriesProjection::Chart(_)));
    }

    #[test]
    fn test_chart_coordinates_follow_view_box() {
        let mut log = MetricLog::default();
        log.append(log_with("a", "80", 5, "6")).unwrap();
        log.append(log_with("b", "79,5", 5, "7")).unwrap();
        log.append(log_with("c", "79", 5, "8")).unwrap();

        let SeriesProjection::Chart(series) = log.project_series(MetricField::Weight) else {
            panic!("expected a chart");
        };

        let first = series.points[0];
        let middle = series.points[1];
        let last = series.points[2];
        assert_eq!(first.x, CHART_PADDING);
        assert_eq!(last.x, CHART_WIDTH - CHART_PADDING);
        // highest weight sits at the top of the plot
        assert_eq!(first.y, CHART_PADDING);
        assert_eq!(last.y, CHART_HEIGHT - CHART_PADDING);
        assert_eq!(middle.normalized, 0.5);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let mut log = MetricLog::default();
        log.append(sample_log("same", 5)).unwrap();

        let result = log.append(sample_log("same", 6));
        assert!(matches!(result, Err(Error::DuplicateLogId { .. })));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_remove_by_id() {
        let mut log = MetricLog::default();
        log.append(sample_log("a", 5)).unwrap();
        log.append(sample_log("b", 6)).unwrap();

        assert!(log.remove("a"));
        assert!(!log.remove("a"));
        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.entries()[0].id, "b");
    }

    #[test]
    fn test_record_validates_inputs() {
        let now = Local.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();

        assert!(matches!(
            DailyLog::record("70", 0, "8", None, now),
            Err(Error::InvalidEnergy { energy: 0 })
        ));
        assert!(matches!(
            DailyLog::record("70", 11, "8", None, now),
            Err(Error::InvalidEnergy { energy: 11 })
        ));
        assert!(matches!(
            DailyLog::record("setenta", 5, "8", None, now),
            Err(Error::InvalidMetric { .. })
        ));
        assert!(matches!(
            DailyLog::record("70", 5, "-1", None, now),
            Err(Error::InvalidMetric { .. })
        ));

        let entry = DailyLog::record(" 70 ", 5, "7.5", Some("  ".to_string()), now).unwrap();
        assert_eq!(entry.weight, "70");
        assert_eq!(entry.display_date, "19/10/2026, 08:30");
        assert_eq!(entry.short_date(), "19/10/2026");
        assert!(entry.notes.is_none());
    }

    #[test]
    fn test_metric_field_from_str() {
        assert_eq!("energy".parse::<MetricField>().unwrap(), MetricField::Energy);
        assert_eq!("Peso".parse::<MetricField>().unwrap(), MetricField::Weight);
        assert!("mood".parse::<MetricField>().is_err());
    }

    #[test]
    fn test_serialized_with_camel_case() {
        let json = serde_json::to_value(sample_log("a", 5)).unwrap();
        assert!(json.get("displayDate").is_some());
        assert_eq!(json["energy"], 5);
    }

    #[tokio::test]
    async fn test_logs_persist_in_order() -> Result<()> {
        let db = setup_test_db().await?;
        let mut log = MetricLog::default();
        log.append(sample_log("first", 3))?;
        log.append(sample_log("second", 8))?;

        save_logs(&db, &log).await?;
        let reloaded = load_logs(&db).await?;

        assert_eq!(reloaded, log);
        assert_eq!(reloaded.entries()[0].id, "first");
        Ok(())
    }
}
