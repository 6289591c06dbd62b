//! Analytical queries over a mission collection.
//!
//! Every function is pure and generic over [`Missions`], so the same code
//! runs on the full table, a filtered view, or a plain slice of records.
//! Company names and statuses are matched exactly (case-sensitive).

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};

use super::error::QueryError;
use super::model::{DateRange, MissionRecord, MissionStatus, Missions};

// ---------------------------------------------------------------------------
// Counts and rates
// ---------------------------------------------------------------------------

/// Number of missions flown by `company`. Unknown or empty names give 0.
pub fn mission_count_by_company<M: Missions + ?Sized>(missions: &M, company: &str) -> usize {
    missions
        .iter_missions()
        .filter(|m| m.company == company)
        .count()
}

/// Percentage (0–100, two decimals) of `company`'s missions that succeeded.
///
/// A company with no missions has a rate of `0.0`.
pub fn success_rate<M: Missions + ?Sized>(missions: &M, company: &str) -> f64 {
    success_percentage(missions.iter_missions().filter(|m| m.company == company))
}

/// Success rate across every mission in the collection, same convention as
/// [`success_rate`].
pub fn overall_success_rate<M: Missions + ?Sized>(missions: &M) -> f64 {
    success_percentage(missions.iter_missions())
}

fn success_percentage<'a>(missions: impl Iterator<Item = &'a MissionRecord>) -> f64 {
    let (total, succeeded) = missions.fold((0usize, 0usize), |(total, ok), m| {
        (total + 1, ok + usize::from(m.mission_status.is_success()))
    });
    if total == 0 {
        return 0.0;
    }
    round2(succeeded as f64 / total as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Date windows
// ---------------------------------------------------------------------------

/// Names of missions launched within `[start, end]`, oldest first.
///
/// Missions sharing a launch date keep their collection order.
pub fn missions_by_date_range<M: Missions + ?Sized>(
    missions: &M,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<&str>, QueryError> {
    let range = DateRange::new(start, end)?;
    Ok(missions_in_range(missions, range))
}

/// [`missions_by_date_range`] over an already validated range.
pub fn missions_in_range<M: Missions + ?Sized>(missions: &M, range: DateRange) -> Vec<&str> {
    let mut hits: Vec<&MissionRecord> = missions
        .iter_missions()
        .filter(|m| range.contains(m.launch_date))
        .collect();
    // stable: equal dates stay in collection order
    hits.sort_by_key(|m| m.launch_date);
    hits.into_iter().map(|m| m.mission_name.as_str()).collect()
}

/// Number of missions launched during calendar `year`.
pub fn missions_by_year<M: Missions + ?Sized>(missions: &M, year: i32) -> usize {
    missions
        .iter_missions()
        .filter(|m| m.launch_date.year() == year)
        .count()
}

/// Mean missions per calendar year over `[start_year, end_year]`, two decimals.
pub fn average_missions_per_year<M: Missions + ?Sized>(
    missions: &M,
    start_year: i32,
    end_year: i32,
) -> Result<f64, QueryError> {
    if start_year > end_year {
        return Err(QueryError::invalid_argument(format!(
            "start year {start_year} is after end year {end_year}"
        )));
    }
    let total = missions
        .iter_missions()
        .filter(|m| (start_year..=end_year).contains(&m.launch_date.year()))
        .count();
    let years = i64::from(end_year) - i64::from(start_year) + 1;
    Ok(round2(total as f64 / years as f64))
}

// ---------------------------------------------------------------------------
// Rankings and distributions
// ---------------------------------------------------------------------------

/// Mission count per company.
pub fn company_mission_counts<M: Missions + ?Sized>(missions: &M) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for m in missions.iter_missions() {
        *counts.entry(m.company.as_str()).or_insert(0) += 1;
    }
    counts
}

/// The `n` busiest companies, most missions first; equal counts are ordered
/// by company name.
pub fn top_companies_by_mission_count<M: Missions + ?Sized>(
    missions: &M,
    n: usize,
) -> Vec<(String, usize)> {
    if n == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(&str, usize)> = company_mission_counts(missions).into_iter().collect();
    // BTreeMap iteration is already name-ascending, so a stable sort on the
    // count keeps the alphabetical tie-break.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(n)
        .map(|(company, count)| (company.to_string(), count))
        .collect()
}

/// Occurrences of every status present in the collection.
///
/// Statuses that never occur have no entry.
pub fn mission_status_count<M: Missions + ?Sized>(missions: &M) -> BTreeMap<MissionStatus, usize> {
    let mut counts = BTreeMap::new();
    for m in missions.iter_missions() {
        *counts.entry(m.mission_status).or_insert(0) += 1;
    }
    counts
}

/// The most frequently launched rocket. Ties go to the rocket that appears
/// first in the collection.
pub fn most_used_rocket<M: Missions + ?Sized>(missions: &M) -> Result<&str, QueryError> {
    // rocket -> (count, first position)
    let mut usage: HashMap<&str, (usize, usize)> = HashMap::new();
    for (pos, m) in missions.iter_missions().enumerate() {
        usage.entry(m.rocket.as_str()).or_insert((0, pos)).0 += 1;
    }
    usage
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(rocket, _)| rocket)
        .ok_or(QueryError::EmptyDataset)
}

/// Number of distinct companies.
pub fn unique_company_count<M: Missions + ?Sized>(missions: &M) -> usize {
    company_mission_counts(missions).len()
}

/// Number of distinct rockets.
pub fn unique_rocket_count<M: Missions + ?Sized>(missions: &M) -> usize {
    missions
        .iter_missions()
        .map(|m| m.rocket.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

// ---------------------------------------------------------------------------
// Per-year series
// ---------------------------------------------------------------------------

/// Mission count per calendar year, for years with at least one launch.
pub fn mission_count_by_year<M: Missions + ?Sized>(missions: &M) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for m in missions.iter_missions() {
        *counts.entry(m.launch_date.year()).or_insert(0) += 1;
    }
    counts
}

/// Success rate per calendar year, computed like [`success_rate`].
pub fn success_rate_by_year<M: Missions + ?Sized>(missions: &M) -> BTreeMap<i32, f64> {
    let mut by_year: BTreeMap<i32, Vec<&MissionRecord>> = BTreeMap::new();
    for m in missions.iter_missions() {
        by_year.entry(m.launch_date.year()).or_default().push(m);
    }
    by_year
        .into_iter()
        .map(|(year, rows)| (year, success_percentage(rows.into_iter())))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::RocketStatus;

    fn mission(
        company: &str,
        date: &str,
        rocket: &str,
        name: &str,
        status: MissionStatus,
    ) -> MissionRecord {
        MissionRecord {
            company: company.to_string(),
            location: "LC-39A, Kennedy Space Center, Florida, USA".to_string(),
            launch_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            launch_time: None,
            rocket: rocket.to_string(),
            mission_name: name.to_string(),
            rocket_status: RocketStatus::Active,
            price: None,
            mission_status: status,
        }
    }

    fn scenario() -> Vec<MissionRecord> {
        vec![
            mission("SpaceX", "2020-01-01", "Falcon 9", "Starlink L2", MissionStatus::Success),
            mission("SpaceX", "2020-06-01", "Falcon Heavy", "Demo", MissionStatus::Failure),
            mission("NASA", "1969-07-16", "Saturn V", "Apollo 11", MissionStatus::Success),
        ]
    }

    #[test]
    fn counts_missions_per_company() {
        let table = scenario();
        assert_eq!(mission_count_by_company(&table, "SpaceX"), 2);
        assert_eq!(mission_count_by_company(&table, "NASA"), 1);
        assert_eq!(mission_count_by_company(&table, "spacex"), 0);
        assert_eq!(mission_count_by_company(&table, ""), 0);
    }

    #[test]
    fn success_rate_is_rounded_percentage() {
        let mut table = scenario();
        assert_eq!(success_rate(&table, "SpaceX"), 50.0);
        assert_eq!(success_rate(&table, "NASA"), 100.0);

        table.push(mission("SpaceX", "2021-01-01", "Falcon 9", "CRS-21", MissionStatus::Success));
        assert_eq!(success_rate(&table, "SpaceX"), 66.67);
    }

    #[test]
    fn success_rate_of_unknown_company_is_zero() {
        assert_eq!(success_rate(&scenario(), "Blue Origin"), 0.0);
        assert_eq!(overall_success_rate(&Vec::<MissionRecord>::new()), 0.0);
    }

    #[test]
    fn date_range_is_inclusive_and_chronological() {
        let table = vec![
            mission("A", "1957-11-03", "R-7", "Sputnik-2", MissionStatus::Success),
            mission("A", "1957-10-04", "R-7", "Sputnik-1", MissionStatus::Success),
            mission("B", "1957-12-06", "Vanguard", "Vanguard TV3", MissionStatus::Failure),
            mission("B", "1958-02-01", "Juno I", "Explorer 1", MissionStatus::Success),
        ];
        let start = NaiveDate::from_ymd_opt(1957, 10, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(1957, 12, 6).unwrap();
        assert_eq!(
            missions_by_date_range(&table, start, end).unwrap(),
            vec!["Sputnik-1", "Sputnik-2", "Vanguard TV3"]
        );
    }

    #[test]
    fn date_range_ties_keep_table_order() {
        let table = vec![
            mission("A", "2000-01-02", "R", "second-day", MissionStatus::Success),
            mission("A", "2000-01-01", "R", "first", MissionStatus::Success),
            mission("B", "2000-01-01", "R", "also-first", MissionStatus::Success),
        ];
        let range = DateRange::parse("2000-01-01", "2000-01-02").unwrap();
        assert_eq!(
            missions_in_range(&table, range),
            vec!["first", "also-first", "second-day"]
        );
    }

    #[test]
    fn reversed_date_range_is_invalid() {
        let start = NaiveDate::from_ymd_opt(2020, 2, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let err = missions_by_date_range(&scenario(), start, end).unwrap_err();
        assert!(matches!(err, QueryError::InvalidArgument { .. }));
    }

    #[test]
    fn top_companies_break_ties_alphabetically() {
        let table = vec![
            mission("Roscosmos", "2000-01-01", "Soyuz", "a", MissionStatus::Success),
            mission("CASC", "2000-01-01", "Long March", "b", MissionStatus::Success),
            mission("Arianespace", "2000-01-01", "Ariane 5", "c", MissionStatus::Success),
            mission("Roscosmos", "2000-01-02", "Soyuz", "d", MissionStatus::Success),
        ];
        assert_eq!(
            top_companies_by_mission_count(&table, 2),
            vec![("Roscosmos".to_string(), 2), ("Arianespace".to_string(), 1)]
        );
        assert_eq!(top_companies_by_mission_count(&table, 0), Vec::new());
        assert_eq!(top_companies_by_mission_count(&table, 10).len(), 3);
    }

    #[test]
    fn status_count_omits_absent_statuses() {
        let counts = mission_status_count(&scenario());
        assert_eq!(
            counts.into_iter().collect::<Vec<_>>(),
            vec![(MissionStatus::Success, 2), (MissionStatus::Failure, 1)]
        );
    }

    #[test]
    fn counts_missions_by_year() {
        let table = scenario();
        assert_eq!(missions_by_year(&table, 2020), 2);
        assert_eq!(missions_by_year(&table, 1969), 1);
        assert_eq!(missions_by_year(&table, 2050), 0);
        assert_eq!(missions_by_year(&table, i32::MIN), 0);
    }

    #[test]
    fn most_used_rocket_prefers_first_appearance_on_ties() {
        assert_eq!(most_used_rocket(&scenario()), Ok("Falcon 9"));

        let table = vec![
            mission("A", "2000-01-01", "Zenit", "a", MissionStatus::Success),
            mission("A", "2000-01-01", "Atlas", "b", MissionStatus::Success),
            mission("A", "2000-01-01", "Atlas", "c", MissionStatus::Success),
            mission("A", "2000-01-01", "Zenit", "d", MissionStatus::Success),
        ];
        assert_eq!(most_used_rocket(&table), Ok("Zenit"));
    }

    #[test]
    fn most_used_rocket_requires_missions() {
        assert_eq!(
            most_used_rocket(&Vec::<MissionRecord>::new()),
            Err(QueryError::EmptyDataset)
        );
    }

    #[test]
    fn average_missions_per_year_spans_inclusive_years() {
        let table = scenario();
        assert_eq!(average_missions_per_year(&table, 2020, 2020), Ok(2.0));
        assert_eq!(average_missions_per_year(&table, 2019, 2021), Ok(0.67));
        assert_eq!(average_missions_per_year(&table, 1969, 2020), Ok(0.06));
        assert!(average_missions_per_year(&table, 2021, 2020).is_err());
    }

    #[test]
    fn yearly_series_cover_only_active_years() {
        let table = scenario();
        assert_eq!(
            mission_count_by_year(&table).into_iter().collect::<Vec<_>>(),
            vec![(1969, 1), (2020, 2)]
        );
        assert_eq!(
            success_rate_by_year(&table).into_iter().collect::<Vec<_>>(),
            vec![(1969, 100.0), (2020, 50.0)]
        );
        assert_eq!(unique_company_count(&table), 2);
        assert_eq!(unique_rocket_count(&table), 3);
    }
}
