use crate::model::*;

// ── Availability Resolution ───────────────────────────────────────

/// True if `[s1, e1)` and `[s2, e2)` share any instant.
///
/// Both comparisons are strict: a window ending exactly where another starts
/// does not overlap it, which is what lets bookings run back-to-back.
pub fn overlaps(s1: Ms, e1: Ms, s2: Ms, e2: Ms) -> bool {
    s1 < e2 && s2 < e1
}

/// True if no reservation on `unit` overlaps `[start, end)`.
pub fn unit_is_free(unit: &Unit, reservations: &[Reservation], start: Ms, end: Ms) -> bool {
    !reservations
        .iter()
        .filter(|r| r.unit() == *unit)
        .any(|r| overlaps(start, end, r.start(), r.end()))
}

/// First-fit scan: the earliest unit in `units` that is free for the whole
/// window, or `None` if every unit is busy.
///
/// Linear in units × reservations. An interval index per unit would speed
/// this up, but must keep the first-fit insertion-order choice.
pub fn find_available(
    units: &[Unit],
    reservations: &[Reservation],
    start: Ms,
    end: Ms,
) -> Option<Unit> {
    units
        .iter()
        .find(|unit| unit_is_free(unit, reservations, start, end))
        .copied()
}
