//! HTTP route families

use crate::error::{ApiError, ApiResult};

pub mod brand;
pub mod health;
pub mod reports;

/// Parse a path id: must be a positive integer, 400 otherwise
pub(crate) fn parse_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_positive_integers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_rejects_zero_negative_and_garbage() {
        assert!(parse_id("0").is_err());
        assert!(parse_id("-3").is_err());
        assert!(parse_id("abc").is_err());
        assert!(parse_id("1.5").is_err());
    }
}
