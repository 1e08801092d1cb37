//! The alert details table: columns, per-column filters, single-column sort,
//! and projection of records into display rows.

mod column;
mod filter;
mod sort;
mod view;

pub use column::{Column, ColumnParseError};
pub use filter::{FilterError, Predicate, RecordFilter};
pub use sort::{Direction, SortState};
pub use view::{DisplayRow, TableView};
