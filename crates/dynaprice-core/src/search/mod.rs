//! Search module.
//!
//! Contains the name filter, sort keys, pagination and the collection store
//! that combines them.

mod collection;
mod filter;
mod query;
mod results;

pub use collection::ProductCollection;
pub use filter::NameFilter;
pub use query::SortKey;
pub use results::{page_range, total_pages, PageCursor, PageInfo, PAGE_SIZE};
