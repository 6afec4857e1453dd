/// Data layer: row loading and series assembly.
///
/// Architecture:
/// ```text
///  result.csv / points.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  comma-separated floats → Row stream
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  model    │  ColumnRoles → SeriesSet / MarkerRoles → MarkerSet
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
