use std::collections::BTreeMap;

use crate::model::*;

use super::availability::find_available;
use super::Engine;

impl Engine {
    /// The unit a request for `[start, end)` would get right now, without
    /// validating the window or reserving anything.
    pub async fn find_available(&self, start: Ms, end: Ms, category: Category) -> Option<Unit> {
        let guard = self.state.read().await;
        find_available(
            guard.store.units_of(category),
            guard.ledger.as_slice(),
            start,
            end,
        )
    }

    pub async fn units_of(&self, category: Category) -> Vec<Unit> {
        self.state.read().await.store.units_of(category).to_vec()
    }

    /// Every category, including empty ones.
    pub async fn inventory(&self) -> BTreeMap<Category, Vec<Unit>> {
        self.state.read().await.store.snapshot()
    }

    /// The full ledger in creation order.
    pub async fn reservations(&self) -> Vec<Reservation> {
        self.state.read().await.ledger.as_slice().to_vec()
    }

    pub async fn reservations_for(&self, unit: &Unit) -> Vec<Reservation> {
        self.state
            .read()
            .await
            .ledger
            .for_unit(unit)
            .cloned()
            .collect()
    }
}
