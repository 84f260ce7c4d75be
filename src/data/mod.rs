/// Data layer: core types, loading, filtering, aggregation, ranking.
///
/// Architecture:
/// ```text
///   sales_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → SalesDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ SalesDataset  │  Vec<Record>, distinct-value index
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  conjunctive FilterSpec → matching records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐   ┌────────┐
///   │ aggregate  │──▶│  rank   │  group/sum → top-N
///   └───────────┘   └────────┘
/// ```
///
/// Every function here is pure: same dataset and inputs, same output. The
/// presentation layer (the report binary, or any future UI) is the only
/// caller and re-invokes the pipeline per interaction.

pub mod aggregate;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod rank;
