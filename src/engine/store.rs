use std::collections::BTreeMap;

use ulid::Ulid;

use crate::model::*;

use super::EngineError;

/// Category → units, in insertion order. Owns every unit in the fleet.
#[derive(Debug, Clone)]
pub struct InventoryStore {
    units: BTreeMap<Category, Vec<Unit>>,
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InventoryStore {
    /// One empty sequence per category.
    pub fn new() -> Self {
        let units = Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
        Self { units }
    }

    pub fn insert(&mut self, unit: Unit) -> Result<(), EngineError> {
        if self.units_of(unit.category()).contains(&unit) {
            return Err(EngineError::DuplicateUnit(unit.id()));
        }
        self.push(unit);
        Ok(())
    }

    /// Append without the duplicate check. Only for units minted by the caller.
    pub(crate) fn push(&mut self, unit: Unit) {
        self.units.entry(unit.category()).or_default().push(unit);
    }

    /// Remove a unit from its category. Returns false if it wasn't there.
    pub fn remove(&mut self, unit: &Unit) -> bool {
        let Some(seq) = self.units.get_mut(&unit.category()) else {
            return false;
        };
        match seq.iter().position(|u| u == unit) {
            Some(pos) => {
                seq.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn units_of(&self, category: Category) -> &[Unit] {
        self.units.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len_of(&self, category: Category) -> usize {
        self.units_of(category).len()
    }

    pub fn find(&self, id: Ulid) -> Option<Unit> {
        self.units.values().flatten().find(|u| u.id() == id).copied()
    }

    pub fn snapshot(&self) -> BTreeMap<Category, Vec<Unit>> {
        self.units.clone()
    }
}

/// Every reservation ever created, in creation order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    reservations: Vec<Reservation>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, reservation: Reservation) {
        self.reservations.push(reservation);
    }

    pub fn as_slice(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    pub fn get_mut(&mut self, id: Ulid) -> Option<&mut Reservation> {
        self.reservations.iter_mut().find(|r| r.id() == id)
    }

    pub fn for_unit<'a>(&'a self, unit: &'a Unit) -> impl Iterator<Item = &'a Reservation> {
        self.reservations.iter().filter(move |r| r.unit() == *unit)
    }

    /// Drop every reservation on `unit`. Returns how many were dropped.
    pub fn purge_unit(&mut self, unit: &Unit) -> usize {
        let before = self.reservations.len();
        self.reservations.retain(|r| r.unit() != *unit);
        before - self.reservations.len()
    }
}

/// Everything a single engine lock guards.
#[derive(Debug, Clone, Default)]
pub struct FleetState {
    pub store: InventoryStore,
    pub ledger: Ledger,
}
