// Shared fixtures for the space-missions integration tests
#![allow(dead_code)]

use chrono::NaiveDate;
use space_missions::data::{MissionRecord, MissionStatus, MissionTable, RocketStatus};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn mission(company: &str, launch: &str, rocket: &str, status: MissionStatus) -> MissionRecord {
    MissionRecord {
        company: company.to_string(),
        location: "Cape Canaveral, Florida, USA".to_string(),
        launch_date: date(launch),
        launch_time: None,
        rocket: rocket.to_string(),
        mission_name: format!("{company} {launch} {rocket}"),
        rocket_status: RocketStatus::Active,
        price: None,
        mission_status: status,
    }
}

/// The three-row table used throughout the query examples.
pub fn scenario_table() -> MissionTable {
    MissionTable::new(vec![
        mission("SpaceX", "2020-01-01", "Falcon 9", MissionStatus::Success),
        mission("SpaceX", "2020-06-01", "Falcon Heavy", MissionStatus::Failure),
        mission("NASA", "1969-07-16", "Saturn V", MissionStatus::Success),
    ])
}

/// A small multi-decade table with repeated rockets and every status.
pub fn history_table() -> MissionTable {
    MissionTable::new(vec![
        mission("RVSN USSR", "1957-10-04", "Sputnik 8K71PS", MissionStatus::Success),
        mission("RVSN USSR", "1957-11-03", "Sputnik 8K71PS", MissionStatus::Success),
        mission("US Navy", "1957-12-06", "Vanguard", MissionStatus::Failure),
        mission("AMBA", "1958-02-01", "Juno I", MissionStatus::Success),
        mission("US Navy", "1958-02-05", "Vanguard", MissionStatus::Failure),
        mission("NASA", "1969-07-16", "Saturn V", MissionStatus::Success),
        mission("NASA", "1970-04-11", "Saturn V", MissionStatus::PartialFailure),
        mission("Arianespace", "1996-06-04", "Ariane 5 G", MissionStatus::Failure),
        mission("Arianespace", "2002-12-11", "Ariane 5 ECA", MissionStatus::Failure),
        mission("SpaceX", "2016-09-01", "Falcon 9 Block 3", MissionStatus::PrelaunchFailure),
        mission("SpaceX", "2020-05-30", "Falcon 9 Block 5", MissionStatus::Success),
        mission("SpaceX", "2020-11-16", "Falcon 9 Block 5", MissionStatus::Success),
    ])
}
