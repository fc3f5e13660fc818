mod add;
mod delete;
mod get;
mod search;
mod update;

pub use add::*;
pub use delete::*;
pub use get::*;
pub use search::*;
pub use update::*;

use crate::errors::ProductError;

/// Path ids must be plain integers.
pub(crate) fn parse_id(raw: &str) -> Result<i32, ProductError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ProductError::invalid_id())
}
