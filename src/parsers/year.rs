//! Year text parsing

use crate::types::{AirdashError, Result};

/// Parse a user-entered year.
///
/// Surrounding whitespace is ignored. Anything that is not a whole number
/// (empty text, decimals, letters) is rejected with `InvalidYear` so the
/// caller decides how to report it.
pub fn parse_year(input: &str) -> Result<i32> {
    input
        .trim()
        .parse::<i32>()
        .map_err(|_| AirdashError::InvalidYear {
            input: input.to_string(),
        })
}
