//! Data layer: core types, loading, and filtering.
//!
//! Architecture:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → HrDataset   (or DataLoadError)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │  HrDataset    │  Vec<Employee>, observed domains
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  FilterCriteria → FilteredView (row indices)
//!   └──────────┘
//! ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
