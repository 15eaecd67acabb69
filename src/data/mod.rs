/// Data layer: typed records, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → AccidentDataset   (cache: load once)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ AccidentDataset │  Vec<AccidentRecord>, domains, bounds
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐      ┌────────┐
///   │  filter   │ ──▶ │ aggregate  │      │  heat   │
///   └──────────┘      └───────────┘      └────────┘
///   predicates →       grouped counts     (lat, lon) points
///   record subset      for charts         for the heat layer
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod heat;
pub mod loader;
pub mod model;
