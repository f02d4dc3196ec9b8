use std::time::Instant;

use tracing::{debug, info};
use ulid::Ulid;

use crate::model::*;
use crate::observability::{self, OUTCOME_CREATED, OUTCOME_UNAVAILABLE};

use super::availability::find_available;
use super::validate::{end_after_days, now_ms, validate_request};
use super::{Engine, EngineError};

impl Engine {
    // ── Inventory ────────────────────────────────────────────

    pub async fn add_unit(&self, unit: Unit) -> Result<(), EngineError> {
        let mut guard = self.state.write().await;
        guard.store.insert(unit)?;
        info!(unit = %unit.id(), category = %unit.category(), "unit added");
        self.publish(&guard, &Event::UnitAdded { unit });
        Ok(())
    }

    /// Create a fresh unit of `category` and add it. A fresh id never
    /// collides, so this cannot fail.
    pub async fn add_unit_of(&self, category: Category) -> Unit {
        let unit = Unit::new(category);
        let mut guard = self.state.write().await;
        guard.store.push(unit);
        info!(unit = %unit.id(), %category, "unit added");
        self.publish(&guard, &Event::UnitAdded { unit });
        unit
    }

    /// Add units one at a time. Stops at the first failure; units added
    /// before it stay in the inventory.
    pub async fn add_units(&self, units: Vec<Unit>) -> Result<(), EngineError> {
        for unit in units {
            self.add_unit(unit).await?;
        }
        Ok(())
    }

    pub async fn add_units_of(&self, category: Category, count: usize) -> Vec<Unit> {
        let mut added = Vec::with_capacity(count);
        for _ in 0..count {
            added.push(self.add_unit_of(category).await);
        }
        added
    }

    /// Remove a unit from inventory. Its reservations stay in the ledger.
    /// Returns false if the unit wasn't in inventory.
    pub async fn remove_unit(&self, unit: &Unit) -> bool {
        let mut guard = self.state.write().await;
        if !guard.store.remove(unit) {
            return false;
        }
        info!(unit = %unit.id(), category = %unit.category(), "unit removed");
        self.publish(&guard, &Event::UnitRemoved { unit: *unit, purged: 0 });
        true
    }

    /// Returns how many of `units` were actually removed.
    pub async fn remove_units(&self, units: &[Unit]) -> usize {
        let mut removed = 0;
        for unit in units {
            if self.remove_unit(unit).await {
                removed += 1;
            }
        }
        removed
    }

    /// Remove a unit and purge its reservations from the ledger.
    /// Returns the number of reservations purged.
    pub async fn remove_unit_cascading(&self, unit: &Unit) -> usize {
        let mut guard = self.state.write().await;
        let was_present = guard.store.remove(unit);
        let purged = guard.ledger.purge_unit(unit);
        if !was_present && purged == 0 {
            return 0;
        }
        info!(unit = %unit.id(), purged, "unit removed with reservations");
        self.publish(&guard, &Event::UnitRemoved { unit: *unit, purged });
        purged
    }

    /// Look a unit up by id and remove it, cascading if asked.
    /// Returns the number of reservations purged.
    pub async fn remove_unit_by_id(&self, id: Ulid, cascade: bool) -> Result<usize, EngineError> {
        let mut guard = self.state.write().await;
        let unit = guard.store.find(id).ok_or(EngineError::UnitNotFound(id))?;
        guard.store.remove(&unit);
        let purged = if cascade {
            guard.ledger.purge_unit(&unit)
        } else {
            0
        };
        info!(unit = %id, purged, "unit removed");
        self.publish(&guard, &Event::UnitRemoved { unit, purged });
        Ok(purged)
    }

    // ── Reservations ─────────────────────────────────────────

    /// Reserve a unit of `category` for `[start, end)`.
    ///
    /// `Ok(None)` means every unit of the category is busy for some part of
    /// the window. Invalid input is an `Err` and leaves state untouched.
    pub async fn request_reservation(
        &self,
        start: Ms,
        end: Ms,
        category: Category,
    ) -> Result<Option<Reservation>, EngineError> {
        let started = Instant::now();
        if let Err(e) = validate_request(start, end, now_ms()) {
            observability::record_rejection(category, &e);
            return Err(e);
        }

        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let Some(unit) = find_available(
            state.store.units_of(category),
            state.ledger.as_slice(),
            start,
            end,
        ) else {
            debug!(%category, start, end, "no unit available");
            observability::record_request(
                category,
                OUTCOME_UNAVAILABLE,
                started.elapsed().as_secs_f64(),
            );
            return Ok(None);
        };

        let reservation = Reservation::new(start, end, Some(unit))?;
        state.ledger.append(reservation.clone());
        info!(
            reservation = %reservation.id(),
            unit = %unit.id(),
            %category,
            start,
            end,
            "reservation created"
        );
        self.publish(
            state,
            &Event::ReservationCreated {
                reservation: reservation.clone(),
            },
        );
        observability::record_request(category, OUTCOME_CREATED, started.elapsed().as_secs_f64());
        Ok(Some(reservation))
    }

    /// Edit a recorded reservation in place. The id is kept; the unit and
    /// window are taken as `edit` leaves them, without re-checking overlap,
    /// so moving a booking frees its old window for later requests.
    pub async fn edit_reservation(
        &self,
        id: Ulid,
        edit: impl FnOnce(&mut Reservation),
    ) -> Result<Reservation, EngineError> {
        let mut guard = self.state.write().await;
        let reservation = guard
            .ledger
            .get_mut(id)
            .ok_or(EngineError::ReservationNotFound(id))?;
        edit(reservation);
        let updated = reservation.clone();
        info!(
            reservation = %id,
            unit = %updated.unit().id(),
            start = updated.start(),
            end = updated.end(),
            "reservation updated"
        );
        self.publish(
            &guard,
            &Event::ReservationUpdated {
                reservation: updated.clone(),
            },
        );
        Ok(updated)
    }

    /// Reserve a unit of `category` for `days` whole days from `start`.
    pub async fn request_reservation_days(
        &self,
        start: Ms,
        days: i64,
        category: Category,
    ) -> Result<Option<Reservation>, EngineError> {
        let end = match end_after_days(start, days) {
            Ok(end) => end,
            Err(e) => {
                observability::record_rejection(category, &e);
                return Err(e);
            }
        };
        self.request_reservation(start, end, category).await
    }
}
