use std::convert::TryFrom;

use anyhow::{anyhow, Result};

pub fn to_u64(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("{field} contains negative value {value}"))
}

/// SQLite stores an empty quantity as NULL-or-empty; callers only ever see a string.
pub fn quantity_from_column(value: Option<String>) -> String {
    value.unwrap_or_default()
}
