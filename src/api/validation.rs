use super::{ApiError, CounterRequest};
use crate::domain::{CounterDirection, CounterField};

pub fn validate_counter_field(raw: &str) -> Result<CounterField, ApiError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "views" => Ok(CounterField::Views),
        "likes" => Ok(CounterField::Likes),
        other => Err(ApiError::validation(format!(
            "Invalid counter: '{other}'. Counter must be 'views' or 'likes'"
        ))),
    }
}

/// Reads the optional `{increment}` body of a counter request. An empty
/// body counts as an increment.
pub fn validate_counter_body(body: &[u8]) -> Result<CounterDirection, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CounterDirection::Increment);
    }
    let request: CounterRequest = serde_json::from_slice(body)
        .map_err(|e| ApiError::validation(format!("Invalid increment: {e}")))?;
    Ok(CounterDirection::from_increment(request.increment))
}
