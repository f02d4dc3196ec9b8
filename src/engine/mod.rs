mod availability;
mod error;
mod mutations;
mod queries;
mod store;
mod validate;

pub use availability::{find_available, overlaps, unit_is_free};
pub use error::EngineError;
pub use store::{FleetState, InventoryStore, Ledger};

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::Event;
use crate::notify::NotifyHub;
use crate::observability;

/// The rental system: inventory plus reservation ledger behind one lock.
///
/// Resolving a free unit and appending the reservation happen under the same
/// write guard, so concurrent requests cannot double-book a unit.
pub struct Engine {
    pub(super) state: RwLock<FleetState>,
    pub notify: Arc<NotifyHub>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Arc::new(NotifyHub::new()))
    }
}

impl Engine {
    pub fn new(notify: Arc<NotifyHub>) -> Self {
        Self {
            state: RwLock::new(FleetState::default()),
            notify,
        }
    }

    /// Drop every unit and reservation, leaving one empty sequence per category.
    pub async fn reset(&self) {
        let mut guard = self.state.write().await;
        *guard = FleetState::default();
        for category in crate::model::Category::ALL {
            observability::set_units_active(category, 0);
        }
        observability::set_ledger_size(0);
    }

    /// Update gauges + notify after a committed change. Caller holds the lock.
    pub(super) fn publish(&self, state: &FleetState, event: &Event) {
        let category = event.category();
        observability::set_units_active(category, state.store.len_of(category));
        observability::set_ledger_size(state.ledger.len());
        self.notify.send(event);
    }
}
