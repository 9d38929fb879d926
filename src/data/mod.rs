/// Data layer: core types, loading, cleaning, and aggregation.
///
/// Architecture:
/// ```text
///  .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  resolve path, parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Row>, column index
///   └──────────┘
///        │
///        ├── filter       valid emails only          (copy)
///        ├── impute       fill missing grades         (copy)
///        ├── scoring      add `score` column          (in place)
///        ├── correlation  gender × over-40 means      (rewrites `age`)
///        └── histogram    age bins → ChartSurface     (read only)
/// ```

pub mod correlation;
pub mod error;
pub mod filter;
pub mod histogram;
pub mod impute;
pub mod loader;
pub mod model;
pub mod scoring;

#[cfg(test)]
mod test_support;
