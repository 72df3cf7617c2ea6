pub mod search_condition;
pub mod search_filter;
pub mod search_value;

pub use search_condition::SearchCondition;
pub use search_filter::{FilterType, SearchFilter, SortOrder};
pub use search_value::{RangeValue, SearchValue};
