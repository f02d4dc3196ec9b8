use crate::model::*;

use super::EngineError;

pub(crate) fn now_ms() -> Ms {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Ms)
        .unwrap_or(0)
}

/// Check a reservation request window against the clock, in the order
/// callers observe: past start, then empty window, then reversed window.
pub(crate) fn validate_request(start: Ms, end: Ms, now: Ms) -> Result<(), EngineError> {
    if start < now {
        return Err(EngineError::PastStart { start, now });
    }
    if start == end {
        return Err(EngineError::DegenerateInterval(start));
    }
    if end < start {
        return Err(EngineError::InvalidRange { start, end });
    }
    Ok(())
}

/// Turn a day count into an absolute end timestamp. Any positive count is
/// accepted as long as the end still fits in `Ms`.
pub(crate) fn end_after_days(start: Ms, days: i64) -> Result<Ms, EngineError> {
    if days <= 0 {
        return Err(EngineError::NonPositiveDuration(days));
    }
    days.checked_mul(DAY)
        .and_then(|span| start.checked_add(span))
        .ok_or(EngineError::LimitExceeded("timestamp overflow"))
}
