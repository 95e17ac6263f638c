//! Query module: parameter normalization, the generic list engine, and the page envelope.
//!
//! Every list endpoint goes through the same pipeline:
//! `RawQuery` -> `QueryParams` (clamped) -> filter -> stable sort -> slice -> `Page<T>`.
//! Nothing here returns an error.

mod engine;
mod page;
mod params;

pub use engine::{Listable, list_page, newest_first, query_page};
pub use page::{Page, PageWindow};
pub use params::{ALL, DEFAULT_PAGE_SIZE, QueryParams, RawQuery};
