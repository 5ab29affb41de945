//! Aggregates submitted benchmark results into per-group HTML comparison reports.

pub mod aggregate;
pub mod context;
pub mod error;
pub mod group;
pub mod normalize;
pub mod report;
pub mod results;
pub mod summary;
pub mod validate;

pub use aggregate::{aggregate, AggregateOptions, AggregateOutcome};
pub use error::{AggregateError, IdentityError, LoadError};
pub use group::{group_results, Group, GroupKey, ToolInstance, ToolKey, ToolRuns};
pub use normalize::{normalize, Metric, NormalizedMetrics};
pub use results::{RawResult, RunIdentity, RunSlot, SchemaVersion};
pub use summary::{summarize, ExecutiveSummary, FastestApi};
pub use validate::{validate_result_file, ValidationReport};
