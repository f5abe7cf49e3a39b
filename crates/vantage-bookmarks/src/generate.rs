//! Generative bookmarks
//!
//! Derives a bookmark set from record field statistics: one per category
//! of a choice field, one per bucket of a numeric field's domain (equal
//! width or quantile), one per period of a date range, or one per record.
//! Planning is pure; the manager turns plans into stored bookmarks.

use chrono::{DateTime, Datelike, Months, Timelike, Utc};
use serde::{Deserialize, Serialize};
use vantage_core::{Ambiance, CameraPose, CellValue, Record, TableData, Transition};

use crate::bookmark::{ControlValues, GenerationType};
use crate::error::{BookmarkError, BookmarkResult};

/// Safety cap on time bucketing.
const MAX_TIME_PERIODS: usize = 100;

/// How numeric range buckets are cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMode {
    /// Equal-width buckets over [min, max]
    EqualWidth,

    /// Buckets holding roughly equal record counts
    Quantile,
}

/// Time bucket size for per-time generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeGranularity {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

/// The algorithm to run and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GenerationKind {
    /// One bookmark per distinct choice of a field
    PerCategory { field: String, choices: Vec<String> },

    /// `range_count` buckets over a numeric field's domain
    PerRange {
        field: String,
        range_count: usize,
        mode: RangeMode,
    },

    /// One bookmark per period of a date range
    PerTime {
        field: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity: TimeGranularity,
    },

    /// One bookmark per (sorted, limited) record
    PerItem {
        /// Field providing bookmark names; falls back to the record id
        label_field: Option<String>,
        sort_field: Option<String>,
        descending: bool,
        limit: Option<usize>,
    },
}

/// Full configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub kind: GenerationKind,

    /// Camera template for generated bookmarks (per-item may override it
    /// from record bounds)
    pub camera: CameraPose,

    /// Ambiance template (per-time hour buckets override the time of day)
    pub ambiance: Ambiance,

    /// Transition stored on every generated bookmark
    pub transition: Transition,

    /// Prefix prepended to every generated name
    pub name_prefix: Option<String>,

    /// Tour dwell time stored on every generated bookmark
    pub duration_ms: Option<u64>,

    /// Whether tours auto-advance past generated bookmarks
    pub auto_advance: bool,
}

impl GenerationConfig {
    /// Config with default camera/ambiance/transition templates.
    pub fn new(kind: GenerationKind) -> Self {
        Self {
            kind,
            camera: CameraPose::default(),
            ambiance: Ambiance::default(),
            transition: Transition::default(),
            name_prefix: None,
            duration_ms: None,
            auto_advance: false,
        }
    }
}

/// Geographic bounds of a record, [min lng/lat] to [max lng/lat].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl GeoBounds {
    pub fn center(&self) -> [f64; 2] {
        [
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        ]
    }

    /// Largest span across both axes, in degrees.
    pub fn span(&self) -> f64 {
        (self.max[0] - self.min[0]).max(self.max[1] - self.min[1])
    }
}

/// Callback resolving a record's geometry bounds.
pub type BoundsFn = dyn Fn(&Record) -> Option<GeoBounds>;

/// One planned bookmark before the manager assigns it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedBookmark {
    pub name: String,
    pub camera: CameraPose,
    pub ambiance: Ambiance,
    pub control_values: ControlValues,
    pub generation: GenerationType,
    pub field: Option<String>,
}

/// Plan a generation run. Pure: nothing is stored yet.
pub fn plan(
    config: &GenerationConfig,
    data: &TableData,
    bounds_for_record: Option<&BoundsFn>,
) -> BookmarkResult<Vec<PlannedBookmark>> {
    match &config.kind {
        GenerationKind::PerCategory { field, choices } => plan_categories(config, field, choices),
        GenerationKind::PerRange {
            field,
            range_count,
            mode,
        } => plan_ranges(config, data, field, *range_count, *mode),
        GenerationKind::PerTime {
            field,
            start,
            end,
            granularity,
        } => plan_time(config, field, *start, *end, *granularity),
        GenerationKind::PerItem {
            label_field,
            sort_field,
            descending,
            limit,
        } => plan_items(
            config,
            data,
            label_field.as_deref(),
            sort_field.as_deref(),
            *descending,
            *limit,
            bounds_for_record,
        ),
    }
}

fn named(prefix: &Option<String>, label: String) -> String {
    match prefix {
        Some(prefix) => format!("{prefix} {label}"),
        None => label,
    }
}

fn plan_categories(
    config: &GenerationConfig,
    field: &str,
    choices: &[String],
) -> BookmarkResult<Vec<PlannedBookmark>> {
    Ok(choices
        .iter()
        .map(|choice| PlannedBookmark {
            name: named(&config.name_prefix, choice.clone()),
            camera: config.camera.clone(),
            ambiance: config.ambiance.clone(),
            control_values: ControlValues::Category {
                field: field.to_string(),
                value: choice.clone(),
            },
            generation: GenerationType::PerCategory,
            field: Some(field.to_string()),
        })
        .collect())
}

fn fmt_edge(v: f64) -> String {
    if v.fract().abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.2}")
    }
}

/// Bucket edges for a numeric domain. Buckets are half-open [lo, hi),
/// except the last, which closes at the domain max; a value sitting on a
/// shared edge therefore opens the upper bucket. Quantile edges may
/// repeat when the data is heavy with duplicates, leaving empty buckets.
fn range_edges(values: &mut Vec<f64>, count: usize, mode: RangeMode) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    match mode {
        RangeMode::EqualWidth => {
            let width = (max - min) / count as f64;
            let mut edges: Vec<f64> = (0..count).map(|i| min + width * i as f64).collect();
            edges.push(max);
            edges
        }
        RangeMode::Quantile => {
            // Values come from numeric_column, so they are all finite.
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let n = values.len();
            let mut edges = vec![min];
            for i in 1..count {
                edges.push(values[(i * n) / count]);
            }
            edges.push(max);
            edges
        }
    }
}

fn plan_ranges(
    config: &GenerationConfig,
    data: &TableData,
    field: &str,
    range_count: usize,
    mode: RangeMode,
) -> BookmarkResult<Vec<PlannedBookmark>> {
    if range_count == 0 {
        return Err(BookmarkError::InvalidGeneration {
            message: "range_count must be at least 1".to_string(),
        });
    }
    if data.column(field).is_none() {
        return Err(BookmarkError::FieldNotFound {
            field: field.to_string(),
        });
    }

    let mut values = data.numeric_column(field);
    if values.is_empty() {
        return Ok(Vec::new());
    }

    let edges = range_edges(&mut values, range_count, mode);
    Ok((0..range_count)
        .map(|i| {
            let (min, max) = (edges[i], edges[i + 1]);
            PlannedBookmark {
                name: named(
                    &config.name_prefix,
                    format!("{field} {}-{}", fmt_edge(min), fmt_edge(max)),
                ),
                camera: config.camera.clone(),
                ambiance: config.ambiance.clone(),
                control_values: ControlValues::Range {
                    field: field.to_string(),
                    min,
                    max,
                },
                generation: GenerationType::PerRange,
                field: Some(field.to_string()),
            }
        })
        .collect())
}

fn period_step(t: DateTime<Utc>, granularity: TimeGranularity) -> DateTime<Utc> {
    match granularity {
        TimeGranularity::Hour => t + chrono::Duration::hours(1),
        TimeGranularity::Day => t + chrono::Duration::days(1),
        TimeGranularity::Week => t + chrono::Duration::weeks(1),
        TimeGranularity::Month => t
            .checked_add_months(Months::new(1))
            .unwrap_or(t + chrono::Duration::days(30)),
        TimeGranularity::Year => t
            .checked_add_months(Months::new(12))
            .unwrap_or(t + chrono::Duration::days(365)),
    }
}

fn period_label(t: DateTime<Utc>, granularity: TimeGranularity) -> String {
    match granularity {
        TimeGranularity::Hour => t.format("%Y-%m-%d %H:00").to_string(),
        TimeGranularity::Day => t.format("%Y-%m-%d").to_string(),
        TimeGranularity::Week => format!("Week of {}", t.format("%Y-%m-%d")),
        TimeGranularity::Month => t.format("%Y-%m").to_string(),
        TimeGranularity::Year => t.format("%Y").to_string(),
    }
}

fn plan_time(
    config: &GenerationConfig,
    field: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    granularity: TimeGranularity,
) -> BookmarkResult<Vec<PlannedBookmark>> {
    if start > end {
        return Err(BookmarkError::InvalidGeneration {
            message: "time range start is after end".to_string(),
        });
    }

    let mut plans = Vec::new();
    let mut current = start;
    while current < end && plans.len() < MAX_TIME_PERIODS {
        let next = period_step(current, granularity);
        let bucket_end = next.min(end);

        let mut ambiance = config.ambiance.clone();
        if granularity == TimeGranularity::Hour {
            ambiance.time_of_day = current.hour() as f64;
            ambiance.date = Some(format!(
                "{:04}-{:02}-{:02}",
                current.year(),
                current.month(),
                current.day()
            ));
        }

        plans.push(PlannedBookmark {
            name: named(&config.name_prefix, period_label(current, granularity)),
            camera: config.camera.clone(),
            ambiance,
            control_values: ControlValues::Time {
                field: field.to_string(),
                start: current.to_rfc3339(),
                end: bucket_end.to_rfc3339(),
            },
            generation: GenerationType::PerTime,
            field: Some(field.to_string()),
        });
        current = next;
    }
    Ok(plans)
}

fn cell_label(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Text(s) => Some(s.clone()),
        CellValue::Int(i) => Some(i.to_string()),
        CellValue::Float(f) => Some(fmt_edge(*f)),
        CellValue::Bool(b) => Some(b.to_string()),
        CellValue::Null => None,
    }
}

fn compare_cells(a: &CellValue, b: &CellValue) -> std::cmp::Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => cell_label(a)
            .unwrap_or_default()
            .cmp(&cell_label(b).unwrap_or_default()),
    }
}

/// Zoom that frames a bounds span, clamped to sane map levels.
fn fit_zoom(span_deg: f64) -> f64 {
    if span_deg <= 0.0 {
        return 17.0;
    }
    (360.0 / span_deg).log2().clamp(1.0, 20.0)
}

fn plan_items(
    config: &GenerationConfig,
    data: &TableData,
    label_field: Option<&str>,
    sort_field: Option<&str>,
    descending: bool,
    limit: Option<usize>,
    bounds_for_record: Option<&BoundsFn>,
) -> BookmarkResult<Vec<PlannedBookmark>> {
    let mut records = data.rows();

    if let Some(sort_field) = sort_field {
        // Reversed comparator rather than reverse(): the sort is stable, so
        // records with equal keys keep their source order either way.
        if descending {
            records.sort_by(|a, b| compare_cells(b.field(sort_field), a.field(sort_field)));
        } else {
            records.sort_by(|a, b| compare_cells(a.field(sort_field), b.field(sort_field)));
        }
    }
    if let Some(limit) = limit {
        records.truncate(limit);
    }

    Ok(records
        .iter()
        .map(|record| {
            let label = label_field
                .and_then(|f| cell_label(record.field(f)))
                .unwrap_or_else(|| format!("Item {}", record.id));

            let camera = match bounds_for_record.and_then(|f| f(record)) {
                Some(bounds) => CameraPose {
                    center: bounds.center(),
                    zoom: fit_zoom(bounds.span()),
                    ..config.camera.clone()
                },
                None => config.camera.clone(),
            };

            PlannedBookmark {
                name: named(&config.name_prefix, label),
                camera,
                ambiance: config.ambiance.clone(),
                control_values: ControlValues::Item {
                    record_id: record.id,
                },
                generation: GenerationType::PerItem,
                field: label_field.map(str::to_string),
            }
        })
        .collect())
}
