/// Data layer: core types, loading, and the crossfilter index.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<FacultyRecord>
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ Crossfilter  │  dimensions (sorted key index) + filters
///   └─────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  per-key accumulators, updated add/remove-wise
///   └───────────┘
/// ```
pub mod aggregate;
pub mod crossfilter;
pub mod loader;
pub mod model;
