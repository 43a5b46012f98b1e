//! Pointer half of the simulator
//!
//! Reports the mouse state last observed by the event pump. Polling is
//! infallible: with no new events the previous state is returned.

use eikon_ui::{PointerSource, PointerState};

use crate::Shared;

/// Polled by the UI runtime for the current mouse state.
pub struct SimPointer {
    shared: Shared,
}

impl SimPointer {
    pub(crate) fn new(shared: Shared) -> Self {
        Self { shared }
    }
}

impl PointerSource for SimPointer {
    fn read(&mut self) -> PointerState {
        self.shared.borrow().pointer
    }
}
