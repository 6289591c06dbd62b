use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use super::error::QueryError;

// ---------------------------------------------------------------------------
// MissionStatus – closed set of launch outcomes
// ---------------------------------------------------------------------------

/// Outcome of a launch attempt.
///
/// Declaration order is the display order used by charts and filter lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MissionStatus {
    Success,
    Failure,
    PartialFailure,
    PrelaunchFailure,
}

impl MissionStatus {
    pub const ALL: [MissionStatus; 4] = [
        MissionStatus::Success,
        MissionStatus::Failure,
        MissionStatus::PartialFailure,
        MissionStatus::PrelaunchFailure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MissionStatus::Success => "Success",
            MissionStatus::Failure => "Failure",
            MissionStatus::PartialFailure => "Partial Failure",
            MissionStatus::PrelaunchFailure => "Prelaunch Failure",
        }
    }

    pub fn is_success(self) -> bool {
        self == MissionStatus::Success
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MissionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown mission status '{s}'"))
    }
}

// ---------------------------------------------------------------------------
// RocketStatus
// ---------------------------------------------------------------------------

/// Whether the launch vehicle is still in service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RocketStatus {
    Active,
    Retired,
}

impl RocketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RocketStatus::Active => "Active",
            RocketStatus::Retired => "Retired",
        }
    }
}

impl fmt::Display for RocketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RocketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(RocketStatus::Active),
            "Retired" => Ok(RocketStatus::Retired),
            other => Err(format!("unknown rocket status '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// MissionRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch attempt. Fields are validated once by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionRecord {
    pub company: String,
    pub location: String,
    pub launch_date: NaiveDate,
    pub launch_time: Option<NaiveTime>,
    pub rocket: String,
    pub mission_name: String,
    pub rocket_status: RocketStatus,
    /// Launch price in millions of USD, when published.
    pub price: Option<f64>,
    pub mission_status: MissionStatus,
}

// ---------------------------------------------------------------------------
// MissionTable – the immutable loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded dataset.
///
/// Rows live behind an `Arc`, so clones are cheap handles onto the same
/// immutable storage. Two handles are the *same table* when they share
/// storage (see [`MissionTable::same_table`]).
#[derive(Debug, Clone)]
pub struct MissionTable {
    records: Arc<[MissionRecord]>,
}

impl MissionTable {
    /// Wrap already-validated records.
    pub fn new(records: Vec<MissionRecord>) -> Self {
        MissionTable {
            records: records.into(),
        }
    }

    pub fn records(&self) -> &[MissionRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&MissionRecord> {
        self.records.get(index)
    }

    /// Number of missions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Identity check used to key caches on the table.
    pub fn same_table(&self, other: &MissionTable) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }

    /// Earliest and latest launch dates, or `None` for an empty table.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.first()?.launch_date;
        Some(self.records.iter().fold((first, first), |(lo, hi), r| {
            (lo.min(r.launch_date), hi.max(r.launch_date))
        }))
    }
}

// ---------------------------------------------------------------------------
// Missions – anything the query module can run over
// ---------------------------------------------------------------------------

/// A read-only, ordered collection of missions: the whole table, a filtered
/// view, or a plain slice.
pub trait Missions {
    fn iter_missions(&self) -> impl Iterator<Item = &MissionRecord> + '_;

    fn mission_count(&self) -> usize {
        self.iter_missions().count()
    }
}

impl Missions for [MissionRecord] {
    fn iter_missions(&self) -> impl Iterator<Item = &MissionRecord> + '_ {
        self.iter()
    }

    fn mission_count(&self) -> usize {
        self.len()
    }
}

impl Missions for Vec<MissionRecord> {
    fn iter_missions(&self) -> impl Iterator<Item = &MissionRecord> + '_ {
        self.iter()
    }

    fn mission_count(&self) -> usize {
        self.len()
    }
}

impl Missions for MissionTable {
    fn iter_missions(&self) -> impl Iterator<Item = &MissionRecord> + '_ {
        self.records.iter()
    }

    fn mission_count(&self) -> usize {
        self.len()
    }
}

// ---------------------------------------------------------------------------
// FilteredView – rows of a table that passed the current filters
// ---------------------------------------------------------------------------

/// A subsequence of a [`MissionTable`], kept as row indices into the shared
/// table. Indices are strictly increasing, so table order is preserved.
#[derive(Debug, Clone)]
pub struct FilteredView {
    table: MissionTable,
    indices: Vec<usize>,
}

impl FilteredView {
    pub(crate) fn new(table: MissionTable, indices: Vec<usize>) -> Self {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        FilteredView { table, indices }
    }

    /// A view containing every row of `table`.
    pub fn full(table: &MissionTable) -> Self {
        FilteredView::new(table.clone(), (0..table.len()).collect())
    }

    pub fn table(&self) -> &MissionTable {
        &self.table
    }

    /// Row indices into [`FilteredView::table`].
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The `i`-th visible mission.
    pub fn get(&self, i: usize) -> Option<&MissionRecord> {
        self.indices.get(i).and_then(|&row| self.table.get(row))
    }
}

impl Missions for FilteredView {
    fn iter_missions(&self) -> impl Iterator<Item = &MissionRecord> + '_ {
        let records = self.table.records();
        self.indices.iter().map(move |&i| &records[i])
    }

    fn mission_count(&self) -> usize {
        self.len()
    }
}

// ---------------------------------------------------------------------------
// DateRange – validated inclusive interval
// ---------------------------------------------------------------------------

/// Inclusive `[start, end]` date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, QueryError> {
        if start > end {
            return Err(QueryError::invalid_argument(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(DateRange { start, end })
    }

    /// Parse two `YYYY-MM-DD` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, QueryError> {
        DateRange::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate, QueryError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| QueryError::invalid_argument(format!("invalid date '{s}': {e}")))
}
