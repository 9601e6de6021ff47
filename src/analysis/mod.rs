//! Pitch aggregation and statistics
//!
//! Cleaning, time bucketing, usage counting and per-pitch-type summaries.

pub mod bucket;
pub mod catalog;
pub mod cleaning;
pub mod series;
pub mod summary;
pub mod usage;

pub use bucket::{bucketize, BucketStrategy, Bucketed, TimeBucket};
pub use catalog::PitchTypeCatalog;
pub use cleaning::{clean, Cleaned, CleaningStats};
pub use series::{daily_means, PitchTypeSeries, SeriesPoint};
pub use summary::{summarize, OutingTotals, PitchTypeSummary, SeasonSummary};
pub use usage::{FillPolicy, UsageRow, UsageTable};
