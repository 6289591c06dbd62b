use std::collections::BTreeSet;

use super::model::{DateRange, FilteredView, MissionRecord, MissionStatus, MissionTable};

// ---------------------------------------------------------------------------
// Filter predicate: which missions the user wants to see
// ---------------------------------------------------------------------------

/// The active restrictions. A `None` dimension places no restriction.
///
/// A present but empty set selects nothing, so every row fails it.
/// Values are replaced, never mutated: the builder methods return a new state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub date_range: Option<DateRange>,
    pub companies: Option<BTreeSet<String>>,
    pub statuses: Option<BTreeSet<MissionStatus>>,
}

impl FilterState {
    pub fn with_date_range(self, range: DateRange) -> Self {
        FilterState {
            date_range: Some(range),
            ..self
        }
    }

    pub fn with_companies<I, S>(self, companies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterState {
            companies: Some(companies.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    pub fn with_statuses(self, statuses: impl IntoIterator<Item = MissionStatus>) -> Self {
        FilterState {
            statuses: Some(statuses.into_iter().collect()),
            ..self
        }
    }

    /// Whether no dimension is restricted.
    pub fn is_unrestricted(&self) -> bool {
        self.date_range.is_none() && self.companies.is_none() && self.statuses.is_none()
    }

    /// A mission passes when it satisfies every active dimension
    /// (and any one selected value within a dimension).
    pub fn matches(&self, mission: &MissionRecord) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains(mission.launch_date) {
                return false;
            }
        }
        if let Some(companies) = &self.companies {
            if !companies.contains(&mission.company) {
                return false;
            }
        }
        if let Some(statuses) = &self.statuses {
            if !statuses.contains(&mission.mission_status) {
                return false;
            }
        }
        true
    }
}

/// Select the rows of `table` that pass every active filter.
///
/// The table is untouched; the returned view shares its storage.
pub fn apply_filters(table: &MissionTable, filters: &FilterState) -> FilteredView {
    if filters.is_unrestricted() {
        return FilteredView::full(table);
    }
    let indices = table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, m)| filters.matches(m))
        .map(|(i, _)| i)
        .collect();
    FilteredView::new(table.clone(), indices)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::model::{Missions, RocketStatus};

    fn mission(company: &str, date: &str, status: MissionStatus) -> MissionRecord {
        MissionRecord {
            company: company.to_string(),
            location: "Baikonur Cosmodrome, Kazakhstan".to_string(),
            launch_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            launch_time: None,
            rocket: "Soyuz".to_string(),
            mission_name: format!("{company} {date}"),
            rocket_status: RocketStatus::Active,
            price: None,
            mission_status: status,
        }
    }

    fn table() -> MissionTable {
        MissionTable::new(vec![
            mission("RVSN USSR", "1961-04-12", MissionStatus::Success),
            mission("NASA", "1969-07-16", MissionStatus::Success),
            mission("NASA", "1986-01-28", MissionStatus::Failure),
            mission("SpaceX", "2006-03-24", MissionStatus::Failure),
            mission("SpaceX", "2020-05-30", MissionStatus::Success),
        ])
    }

    fn names(view: &FilteredView) -> Vec<&str> {
        view.iter_missions().map(|m| m.mission_name.as_str()).collect()
    }

    #[test]
    fn empty_filter_is_identity() {
        let table = table();
        let view = apply_filters(&table, &FilterState::default());
        assert_eq!(view.len(), table.len());
        assert!(view.iter_missions().eq(table.iter_missions()));
        assert!(view.table().same_table(&table));
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let range = DateRange::parse("1969-07-16", "2006-03-24").unwrap();
        let view = apply_filters(&table(), &FilterState::default().with_date_range(range));
        assert_eq!(
            names(&view),
            vec!["NASA 1969-07-16", "NASA 1986-01-28", "SpaceX 2006-03-24"]
        );
    }

    #[test]
    fn dimensions_combine_with_and_values_with_or() {
        let filters = FilterState::default()
            .with_companies(["NASA", "SpaceX"])
            .with_statuses([MissionStatus::Success]);
        let view = apply_filters(&table(), &filters);
        assert_eq!(names(&view), vec!["NASA 1969-07-16", "SpaceX 2020-05-30"]);
        assert_eq!(view.indices(), &[1, 4]);
    }

    #[test]
    fn empty_selection_hides_everything() {
        let filters = FilterState::default().with_companies(Vec::<String>::new());
        assert!(apply_filters(&table(), &filters).is_empty());
    }

    #[test]
    fn company_match_is_case_sensitive() {
        let filters = FilterState::default().with_companies(["nasa"]);
        assert!(apply_filters(&table(), &filters).is_empty());
    }

    #[test]
    fn builders_leave_other_dimensions_alone() {
        let range = DateRange::parse("2000-01-01", "2000-12-31").unwrap();
        let filters = FilterState::default()
            .with_statuses([MissionStatus::Failure])
            .with_date_range(range);
        assert_eq!(filters.date_range, Some(range));
        assert!(filters.companies.is_none());
        assert_eq!(filters.statuses.map(|s| s.len()), Some(1));
    }
}
