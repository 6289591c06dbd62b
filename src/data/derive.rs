use std::collections::BTreeMap;

use super::model::{MissionStatus, Missions};
use super::query;

/// Number of companies in the ranking chart unless configured otherwise.
pub const DEFAULT_TOP_COMPANIES: usize = 15;

// ---------------------------------------------------------------------------
// Summary panel
// ---------------------------------------------------------------------------

/// Headline numbers for a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total_missions: usize,
    pub successful_missions: usize,
    /// Percent, rounded to 2 decimals.
    pub overall_success_rate: f64,
    pub unique_company_count: usize,
    pub unique_rocket_count: usize,
}

impl Summary {
    /// Success percentage from the raw counts, unrounded.
    pub fn exact_success_rate(&self) -> f64 {
        if self.total_missions == 0 {
            return 0.0;
        }
        self.successful_missions as f64 / self.total_missions as f64 * 100.0
    }
}

/// Compute the summary panel from the query functions, so the panel always
/// agrees with direct query results.
pub fn derive_summary<M: Missions + ?Sized>(view: &M) -> Summary {
    let statuses = query::mission_status_count(view);
    Summary {
        total_missions: view.mission_count(),
        successful_missions: statuses.get(&MissionStatus::Success).copied().unwrap_or(0),
        overall_success_rate: query::overall_success_rate(view),
        unique_company_count: query::unique_company_count(view),
        unique_rocket_count: query::unique_rocket_count(view),
    }
}

// ---------------------------------------------------------------------------
// Chart aggregates
// ---------------------------------------------------------------------------

/// Data behind the four report charts. Ordered containers only, so two
/// derivations from the same view compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Year → success rate (percent).
    pub success_rate_by_year: BTreeMap<i32, f64>,
    /// Busiest companies, most missions first.
    pub top_companies: Vec<(String, usize)>,
    pub status_distribution: BTreeMap<MissionStatus, usize>,
    /// Year → number of launches.
    pub missions_by_year: BTreeMap<i32, usize>,
}

pub fn derive_chart_series<M: Missions + ?Sized>(view: &M) -> ChartSeries {
    derive_chart_series_with(view, DEFAULT_TOP_COMPANIES)
}

/// Like [`derive_chart_series`] with an explicit ranking length.
pub fn derive_chart_series_with<M: Missions + ?Sized>(view: &M, top_n: usize) -> ChartSeries {
    ChartSeries {
        success_rate_by_year: query::success_rate_by_year(view),
        top_companies: query::top_companies_by_mission_count(view, top_n),
        status_distribution: query::mission_status_count(view),
        missions_by_year: query::mission_count_by_year(view),
    }
}
