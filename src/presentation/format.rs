use thiserror::Error;
use time::PrimitiveDateTime;

use crate::domain::posts::{DISPLAY_TIMESTAMP_FORMAT, STORED_TIMESTAMP_FORMAT};

#[derive(Debug, Error)]
pub enum DateFormatError {
    #[error("timestamp `{raw}` does not match `YYYY-MM-DD HH:MM:SS`")]
    Parse {
        raw: String,
        #[source]
        source: time::error::Parse,
    },
    #[error("timestamp `{raw}` could not be rendered")]
    Render {
        raw: String,
        #[source]
        source: time::error::Format,
    },
}

/// Turn a stored `created_at` into its display form, e.g.
/// `2024-01-05 15:45:00` into `January 05, 2024 at 03:45 PM`.
///
/// An empty input yields an empty string. Timestamps are naive and are not
/// shifted into any zone.
pub fn format_date(raw: &str) -> Result<String, DateFormatError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let parsed =
        PrimitiveDateTime::parse(raw, STORED_TIMESTAMP_FORMAT).map_err(|source| {
            DateFormatError::Parse {
                raw: raw.to_string(),
                source,
            }
        })?;

    parsed
        .format(DISPLAY_TIMESTAMP_FORMAT)
        .map_err(|source| DateFormatError::Render {
            raw: raw.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn afternoon_timestamp() {
        insta::assert_snapshot!(
            format_date("2024-01-05 15:45:00").unwrap(),
            @"January 05, 2024 at 03:45 PM"
        );
    }

    #[test]
    fn midnight_and_noon_use_twelve() {
        assert_eq!(
            format_date("2023-11-30 00:07:59").unwrap(),
            "November 30, 2023 at 12:07 AM"
        );
        assert_eq!(
            format_date("2023-06-01 12:00:00").unwrap(),
            "June 01, 2023 at 12:00 PM"
        );
    }

    #[test]
    fn empty_is_empty() {
        assert_eq!(format_date("").unwrap(), "");
    }

    #[test]
    fn malformed_is_an_error() {
        for raw in ["2024-01-05", "2024-01-05T15:45:00", "yesterday", "2024-13-01 00:00:00"] {
            assert!(
                matches!(format_date(raw), Err(DateFormatError::Parse { .. })),
                "input {raw}"
            );
        }
    }
}
