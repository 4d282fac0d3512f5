/// Data layer: core types, loading, and row selection.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  named columns of CellValue, unique-value index
///   └──────────┘
///        │  split_target("Class")
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Array2<f64> features + Vec<String> labels
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  take rows by index, count classes → fold subsets
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
