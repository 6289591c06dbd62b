/// Data layer: core types, loading, querying, filtering and derivation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → MissionTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ MissionTable  │  Arc<[MissionRecord]>, immutable
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState predicates → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌─────────┐
///   │  derive   │ ───▶ │  query   │  counts, rates, rankings
///   └──────────┘      └─────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  FilterState → {view, summary, charts}
///   └──────────┘
/// ```

pub mod cache;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod query;

pub use cache::{DerivationCache, Derived};
pub use derive::{derive_chart_series, derive_summary, ChartSeries, Summary};
pub use error::{LoadError, QueryError};
pub use filter::{apply_filters, FilterState};
pub use model::{
    DateRange, FilteredView, MissionRecord, MissionStatus, MissionTable, Missions, RocketStatus,
};
