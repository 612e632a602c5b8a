//! Query translation and pagination
//!
//! Translates raw HTTP query parameters into a store-neutral read plan:
//! filter conditions, sort order, field projection, and offset/limit
//! pagination with next/prev markers.

pub mod filter;
pub mod pagination;
pub mod params;
pub mod plan;
pub mod sort;

pub use filter::{Comparison, Condition, QueryFilter};
pub use pagination::{PageMarkers, PaginationPlan};
pub use params::{QueryParams, RESERVED_KEYS};
pub use plan::{QueryPlan, ReadPlan, count_matching, execute_plan};
pub use sort::{ProjectionSpec, SortDirection, SortSpec};
