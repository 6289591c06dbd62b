use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use space_missions::data::query::top_companies_by_mission_count;
use space_missions::data::{
    loader, DateRange, DerivationCache, Derived, FilterState, MissionRecord, MissionStatus,
    MissionTable, Missions,
};

use crate::color::ColorMap;

/// Companies pre-selected after loading, busiest first.
const DEFAULT_SELECTED_COMPANIES: usize = 5;

// ---------------------------------------------------------------------------
// Data explorer columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TableColumn {
    Company,
    Date,
    Time,
    Mission,
    Rocket,
    RocketStatus,
    MissionStatus,
    Location,
    Price,
}

impl TableColumn {
    pub const ALL: [TableColumn; 9] = [
        TableColumn::Company,
        TableColumn::Date,
        TableColumn::Time,
        TableColumn::Mission,
        TableColumn::Rocket,
        TableColumn::RocketStatus,
        TableColumn::MissionStatus,
        TableColumn::Location,
        TableColumn::Price,
    ];

    pub const DEFAULT_VISIBLE: [TableColumn; 6] = [
        TableColumn::Company,
        TableColumn::Date,
        TableColumn::Mission,
        TableColumn::Rocket,
        TableColumn::MissionStatus,
        TableColumn::Location,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TableColumn::Company => "Company",
            TableColumn::Date => "Date",
            TableColumn::Time => "Time",
            TableColumn::Mission => "Mission",
            TableColumn::Rocket => "Rocket",
            TableColumn::RocketStatus => "Rocket Status",
            TableColumn::MissionStatus => "Mission Status",
            TableColumn::Location => "Location",
            TableColumn::Price => "Price ($M)",
        }
    }

    /// Display text for this column of `mission`.
    pub fn cell(self, mission: &MissionRecord) -> String {
        match self {
            TableColumn::Company => mission.company.clone(),
            TableColumn::Date => mission.launch_date.format("%Y-%m-%d").to_string(),
            TableColumn::Time => mission
                .launch_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            TableColumn::Mission => mission.mission_name.clone(),
            TableColumn::Rocket => mission.rocket.clone(),
            TableColumn::RocketStatus => mission.rocket_status.to_string(),
            TableColumn::MissionStatus => mission.mission_status.to_string(),
            TableColumn::Location => mission.location.clone(),
            TableColumn::Price => mission.price.map(|p| format!("{p:.2}")).unwrap_or_default(),
        }
    }

    /// Order two missions by this column. Missing times and prices sort first.
    pub fn compare(self, a: &MissionRecord, b: &MissionRecord) -> Ordering {
        match self {
            TableColumn::Company => a.company.cmp(&b.company),
            TableColumn::Date => (a.launch_date, a.launch_time).cmp(&(b.launch_date, b.launch_time)),
            TableColumn::Time => a.launch_time.cmp(&b.launch_time),
            TableColumn::Mission => a.mission_name.cmp(&b.mission_name),
            TableColumn::Rocket => a.rocket.cmp(&b.rocket),
            TableColumn::RocketStatus => a.rocket_status.cmp(&b.rocket_status),
            TableColumn::MissionStatus => a.mission_status.cmp(&b.mission_status),
            TableColumn::Location => a.location.cmp(&b.location),
            TableColumn::Price => match (a.price, b.price) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (x, y) => x.is_some().cmp(&y.is_some()),
            },
        }
    }
}

/// Explorer sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: TableColumn,
    pub ascending: bool,
}

// ---------------------------------------------------------------------------
// Filter selection as edited by the side panel
// ---------------------------------------------------------------------------

/// What the user has ticked. Converted into a fresh [`FilterState`] on
/// every change.
#[derive(Debug, Clone)]
pub struct Selection {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Earliest and latest launch dates in the table.
    pub bounds: (NaiveDate, NaiveDate),
    pub companies: BTreeSet<String>,
    pub statuses: BTreeSet<MissionStatus>,
}

impl Selection {
    fn for_table(table: &MissionTable) -> Option<Self> {
        let bounds = table.date_bounds()?;
        let companies = top_companies_by_mission_count(table, DEFAULT_SELECTED_COMPANIES)
            .into_iter()
            .map(|(company, _)| company)
            .collect();
        Some(Selection {
            start: bounds.0,
            end: bounds.1,
            bounds,
            companies,
            statuses: MissionStatus::ALL.into_iter().collect(),
        })
    }

    /// Build the filter for this selection. Dimensions with nothing ticked,
    /// or everything ticked, are unrestricted.
    pub fn filter_state(&self, all_companies: &[String]) -> Result<FilterState> {
        let mut filters = FilterState::default();
        if (self.start, self.end) != self.bounds {
            let range = DateRange::new(self.start, self.end).context("invalid date range")?;
            filters = filters.with_date_range(range);
        }
        if !self.companies.is_empty() && self.companies.len() != all_companies.len() {
            filters = filters.with_companies(self.companies.iter().cloned());
        }
        if !self.statuses.is_empty() && self.statuses.len() != MissionStatus::ALL.len() {
            filters = filters.with_statuses(self.statuses.iter().copied());
        }
        Ok(filters)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub table: Option<MissionTable>,

    /// Every company in the table, sorted by name.
    pub all_companies: Vec<String>,

    /// Current side-panel selection.
    pub selection: Option<Selection>,

    /// Pipeline output for the current selection.
    pub derived: Option<Arc<Derived>>,

    cache: Option<DerivationCache>,

    /// Columns shown in the data explorer.
    pub visible_columns: BTreeSet<TableColumn>,

    pub sort: Option<SortOrder>,

    /// Explorer row order, as positions into the current view.
    pub row_order: Vec<usize>,

    pub company_colors: Option<ColorMap>,

    /// Length of the launch-volume ranking.
    pub top_companies: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(top_companies: usize) -> Self {
        Self {
            table: None,
            all_companies: Vec::new(),
            selection: None,
            derived: None,
            cache: None,
            visible_columns: TableColumn::DEFAULT_VISIBLE.into_iter().collect(),
            sort: None,
            row_order: Vec::new(),
            company_colors: None,
            top_companies,
            status_message: None,
        }
    }

    /// Load a dataset file and make it current.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let table = loader::load_file(path)
            .with_context(|| format!("loading {}", path.display()))?;
        self.set_dataset(table);
        Ok(())
    }

    /// Ingest a newly loaded table, initialise filters and colours.
    pub fn set_dataset(&mut self, table: MissionTable) {
        let companies: BTreeSet<&str> = table.records().iter().map(|m| m.company.as_str()).collect();
        self.all_companies = companies.iter().map(|c| c.to_string()).collect();
        self.company_colors = Some(ColorMap::new(companies));

        self.selection = Selection::for_table(&table);
        let top_n = self.top_companies;
        self.cache
            .get_or_insert_with(|| DerivationCache::new(table.clone(), top_n))
            .rebind(&table);
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the derived view after a selection change.
    pub fn refilter(&mut self) {
        let (Some(cache), Some(table)) = (&mut self.cache, &self.table) else {
            return;
        };
        let filters = match &self.selection {
            Some(selection) => match selection.filter_state(&self.all_companies) {
                Ok(filters) => filters,
                Err(e) => {
                    log::warn!("Keeping previous view: {e:#}");
                    self.status_message = Some(format!("{e:#}"));
                    return;
                }
            },
            // empty table: nothing to select from
            None => FilterState::default(),
        };
        cache.rebind(table);
        self.derived = Some(cache.get(&filters));
        self.status_message = None;
        self.resort();
    }

    /// Sort the explorer by `column`; a second click on the same column
    /// flips the direction.
    pub fn toggle_sort(&mut self, column: TableColumn) {
        self.sort = Some(match self.sort {
            Some(sort) if sort.column == column => SortOrder {
                column,
                ascending: !sort.ascending,
            },
            _ => SortOrder {
                column,
                ascending: true,
            },
        });
        self.resort();
    }

    fn resort(&mut self) {
        let Some(derived) = &self.derived else {
            self.row_order.clear();
            return;
        };
        let rows: Vec<&MissionRecord> = derived.view.iter_missions().collect();
        let mut order: Vec<usize> = (0..rows.len()).collect();
        if let Some(sort) = self.sort {
            // stable: ties keep table order in both directions
            order.sort_by(|&a, &b| {
                let ord = sort.column.compare(rows[a], rows[b]);
                if sort.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        self.row_order = order;
    }

    pub fn set_company(&mut self, company: &str, selected: bool) {
        if let Some(selection) = &mut self.selection {
            if selected {
                selection.companies.insert(company.to_string());
            } else {
                selection.companies.remove(company);
            }
        }
        self.refilter();
    }

    /// Select every company (`true`) or none (`false`).
    pub fn set_all_companies(&mut self, selected: bool) {
        if let Some(selection) = &mut self.selection {
            selection.companies = if selected {
                self.all_companies.iter().cloned().collect()
            } else {
                BTreeSet::new()
            };
        }
        self.refilter();
    }

    pub fn set_status(&mut self, status: MissionStatus, selected: bool) {
        if let Some(selection) = &mut self.selection {
            if selected {
                selection.statuses.insert(status);
            } else {
                selection.statuses.remove(&status);
            }
        }
        self.refilter();
    }

    pub fn set_dates(&mut self, start: NaiveDate, end: NaiveDate) {
        if let Some(selection) = &mut self.selection {
            selection.start = start.clamp(selection.bounds.0, selection.bounds.1);
            selection.end = end.clamp(selection.bounds.0, selection.bounds.1);
        }
        self.refilter();
    }

    /// Widen the date range back to the full dataset.
    pub fn reset_dates(&mut self) {
        if let Some(bounds) = self.selection.as_ref().map(|s| s.bounds) {
            self.set_dates(bounds.0, bounds.1);
        }
    }

    pub fn set_column_visible(&mut self, column: TableColumn, visible: bool) {
        if visible {
            self.visible_columns.insert(column);
        } else {
            self.visible_columns.remove(&column);
        }
    }

    /// Write the currently visible missions to `path` as CSV.
    pub fn export_filtered(&self, path: &Path) -> Result<()> {
        let derived = self.derived.as_ref().context("no dataset loaded")?;
        loader::save_csv(path, &derived.view)
            .with_context(|| format!("exporting to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use space_missions::data::RocketStatus;

    use super::*;

    fn mission(company: &str, date: &str, status: MissionStatus) -> MissionRecord {
        MissionRecord {
            company: company.to_string(),
            location: "Vandenberg SFB, California, USA".to_string(),
            launch_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            launch_time: None,
            rocket: "Delta II".to_string(),
            mission_name: format!("{company}-{date}"),
            rocket_status: RocketStatus::Retired,
            price: None,
            mission_status: status,
        }
    }

    fn loaded() -> AppState {
        let mut rows = Vec::new();
        for (i, company) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
            // company A flies most, F least
            for n in 0..(6 - i) {
                rows.push(mission(company, &format!("20{:02}-01-0{}", 10 + i, n + 1), MissionStatus::Success));
            }
        }
        rows.push(mission("A", "2016-02-01", MissionStatus::Failure));
        let mut state = AppState::new(15);
        state.set_dataset(MissionTable::new(rows));
        state
    }

    fn visible(state: &AppState) -> usize {
        state.derived.as_ref().map(|d| d.view.mission_count()).unwrap_or(0)
    }

    #[test]
    fn loading_preselects_busiest_companies() {
        let state = loaded();
        let selection = state.selection.as_ref().unwrap();
        assert_eq!(
            selection.companies.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["A", "B", "C", "D", "E"]
        );
        assert_eq!(visible(&state), state.table.as_ref().unwrap().len() - 1);
    }

    #[test]
    fn selecting_everything_removes_restrictions() {
        let mut state = loaded();
        state.set_all_companies(true);
        let selection = state.selection.as_ref().unwrap();
        assert!(selection.filter_state(&state.all_companies).unwrap().is_unrestricted());
    }

    #[test]
    fn selecting_nothing_shows_every_mission() {
        let mut state = loaded();
        let total = state.table.as_ref().unwrap().len();
        state.set_all_companies(false);
        let selection = state.selection.as_ref().unwrap();
        assert!(selection.filter_state(&state.all_companies).unwrap().is_unrestricted());
        assert_eq!(visible(&state), total);

        for status in MissionStatus::ALL {
            state.set_status(status, false);
        }
        assert_eq!(visible(&state), total);
    }

    #[test]
    fn status_toggles_filter_the_view() {
        let mut state = loaded();
        state.set_status(MissionStatus::Success, false);
        assert_eq!(visible(&state), 1);
        assert_eq!(state.derived.as_ref().unwrap().summary.overall_success_rate, 0.0);
    }

    #[test]
    fn reversed_dates_keep_previous_view() {
        let mut state = loaded();
        state.set_all_companies(true);
        let before = visible(&state);

        let late = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let early = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        state.set_dates(late, early);
        assert_eq!(visible(&state), before);
        assert!(state.status_message.is_some());

        state.reset_dates();
        assert!(state.status_message.is_none());
        assert_eq!(visible(&state), before);
    }

    fn explorer_companies(state: &AppState) -> Vec<String> {
        let view = &state.derived.as_ref().unwrap().view;
        state
            .row_order
            .iter()
            .map(|&i| view.get(i).unwrap().company.clone())
            .collect()
    }

    #[test]
    fn explorer_rows_follow_table_order_until_sorted() {
        let state = loaded();
        assert_eq!(state.row_order, (0..visible(&state)).collect::<Vec<_>>());
    }

    #[test]
    fn clicking_a_column_sorts_then_reverses() {
        let mut state = loaded();
        state.toggle_sort(TableColumn::Company);
        let ascending = explorer_companies(&state);
        assert_eq!(ascending.first().map(String::as_str), Some("A"));
        assert_eq!(ascending.last().map(String::as_str), Some("E"));

        state.toggle_sort(TableColumn::Company);
        assert_eq!(state.sort.map(|s| s.ascending), Some(false));
        let descending = explorer_companies(&state);
        assert_eq!(descending.first().map(String::as_str), Some("E"));
        assert_eq!(descending.last().map(String::as_str), Some("A"));

        state.toggle_sort(TableColumn::Date);
        assert_eq!(state.sort, Some(SortOrder { column: TableColumn::Date, ascending: true }));
    }

    #[test]
    fn sort_survives_refiltering() {
        let mut state = loaded();
        state.toggle_sort(TableColumn::MissionStatus);
        state.toggle_sort(TableColumn::MissionStatus);
        state.set_all_companies(true);
        assert_eq!(state.row_order.len(), visible(&state));

        let view = &state.derived.as_ref().unwrap().view;
        let first = view.get(state.row_order[0]).unwrap();
        assert_eq!(first.mission_status, MissionStatus::Failure);
    }

    #[test]
    fn missing_prices_sort_first() {
        let mut priced = mission("A", "2020-01-01", MissionStatus::Success);
        priced.price = Some(62.0);
        let cheap = MissionRecord { price: Some(7.5), ..priced.clone() };
        let unpriced = mission("A", "2020-01-01", MissionStatus::Success);

        let column = TableColumn::Price;
        assert_eq!(column.compare(&unpriced, &cheap), Ordering::Less);
        assert_eq!(column.compare(&cheap, &priced), Ordering::Less);
        assert_eq!(column.compare(&priced, &unpriced), Ordering::Greater);
        assert_eq!(column.compare(&unpriced, &unpriced), Ordering::Equal);
    }

    #[test]
    fn exported_view_matches_visible_rows() {
        let state = loaded();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_space_missions.csv");
        state.export_filtered(&path).unwrap();

        let reloaded = loader::load_file(&path).unwrap();
        assert_eq!(reloaded.len(), visible(&state));
    }

    #[test]
    fn export_without_data_fails() {
        let state = AppState::new(15);
        assert!(state.export_filtered(Path::new("unused.csv")).is_err());
    }
}
