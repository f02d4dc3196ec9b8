use ulid::Ulid;

use crate::model::Ms;

#[derive(Debug)]
pub enum EngineError {
    DuplicateUnit(Ulid),
    UnitNotFound(Ulid),
    ReservationNotFound(Ulid),
    InvalidRange { start: Ms, end: Ms },
    MissingUnit,
    PastStart { start: Ms, now: Ms },
    DegenerateInterval(Ms),
    NonPositiveDuration(i64),
    LimitExceeded(&'static str),
}

impl EngineError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::DuplicateUnit(_) => "duplicate_unit",
            EngineError::UnitNotFound(_) => "unit_not_found",
            EngineError::ReservationNotFound(_) => "reservation_not_found",
            EngineError::InvalidRange { .. } => "invalid_range",
            EngineError::MissingUnit => "missing_unit",
            EngineError::PastStart { .. } => "past_start",
            EngineError::DegenerateInterval(_) => "degenerate_interval",
            EngineError::NonPositiveDuration(_) => "non_positive_duration",
            EngineError::LimitExceeded(_) => "limit_exceeded",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::DuplicateUnit(id) => write!(f, "duplicate unit cannot be added: {id}"),
            EngineError::UnitNotFound(id) => write!(f, "unit not found: {id}"),
            EngineError::ReservationNotFound(id) => write!(f, "reservation not found: {id}"),
            EngineError::InvalidRange { start, end } => {
                write!(f, "end {end} cannot be before start {start}")
            }
            EngineError::MissingUnit => write!(f, "reservation requires a unit"),
            EngineError::PastStart { start, now } => {
                write!(f, "start {start} is in the past (now {now})")
            }
            EngineError::DegenerateInterval(at) => {
                write!(f, "start and end must differ (both {at})")
            }
            EngineError::NonPositiveDuration(days) => {
                write!(f, "number of days must be positive, got {days}")
            }
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}
