use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::engine::EngineError;

/// Unix milliseconds. The only time type.
pub type Ms = i64;

pub const HOUR: Ms = 3_600_000;
pub const DAY: Ms = 24 * HOUR;

/// A time window. Overlap is strict on both sides, so back-to-back windows
/// (one's end equal to the other's start) never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Ms,
    pub end: Ms,
}

impl Span {
    pub fn new(start: Ms, end: Ms) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    pub fn duration_ms(&self) -> Ms {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The closed set of unit categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sedan,
    Suv,
    Van,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Sedan, Category::Suv, Category::Van];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sedan => "sedan",
            Category::Suv => "suv",
            Category::Van => "van",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rentable unit. Two units are the same unit only if their ids match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    id: Ulid,
    category: Category,
}

impl Unit {
    pub fn new(category: Category) -> Self {
        Self {
            id: Ulid::new(),
            category,
        }
    }

    pub fn id(&self) -> Ulid {
        self.id
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A unit assigned to a time window.
///
/// The id is fixed at construction. The unit and the window can be edited
/// afterwards without changing it, so compare reservations by id only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    id: Ulid,
    unit: Unit,
    start: Ms,
    end: Ms,
}

impl Reservation {
    pub fn new(start: Ms, end: Ms, unit: Option<Unit>) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvalidRange { start, end });
        }
        let unit = unit.ok_or(EngineError::MissingUnit)?;
        Ok(Self {
            id: Ulid::new(),
            unit,
            start,
            end,
        })
    }

    pub fn id(&self) -> Ulid {
        self.id
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn start(&self) -> Ms {
        self.start
    }

    pub fn end(&self) -> Ms {
        self.end
    }

    pub fn span(&self) -> Span {
        Span {
            start: self.start,
            end: self.end,
        }
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    pub fn set_start(&mut self, start: Ms) {
        self.start = start;
    }

    pub fn set_end(&mut self, end: Ms) {
        self.end = end;
    }
}

impl PartialEq for Reservation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Reservation {}

/// Change feed record, broadcast per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    UnitAdded {
        unit: Unit,
    },
    UnitRemoved {
        unit: Unit,
        /// Reservations dropped along with the unit (cascading removal only).
        purged: usize,
    },
    ReservationCreated {
        reservation: Reservation,
    },
    /// A recorded reservation was edited; carries the new state.
    ReservationUpdated {
        reservation: Reservation,
    },
}

impl Event {
    pub fn category(&self) -> Category {
        match self {
            Event::UnitAdded { unit } | Event::UnitRemoved { unit, .. } => unit.category(),
            Event::ReservationCreated { reservation }
            | Event::ReservationUpdated { reservation } => reservation.unit().category(),
        }
    }
}
