//! Pointer dispatch
//!
//! Translates polled pointer states into widget interactions. A press
//! latches the button under the cursor; releasing over the same button
//! produces a click, releasing anywhere else cancels.

use embedded_graphics::prelude::*;

use crate::backend::PointerState;
use crate::widget::{WidgetId, WidgetTree};

/// Events surfaced to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiEvent {
    /// A button was pressed and released without leaving it.
    Clicked(WidgetId),
}

/// Press/release tracking across input polls.
#[derive(Default)]
pub(crate) struct PointerDispatch {
    prev: PointerState,
    /// Button currently held down, if any.
    active: Option<WidgetId>,
}

impl PointerDispatch {
    /// Feed one polled state. Returns an event on a completed click, and
    /// whether any widget changed visual state.
    pub fn dispatch(
        &mut self,
        tree: &mut WidgetTree,
        state: PointerState,
    ) -> (Option<UiEvent>, bool) {
        let mut event = None;
        let mut changed = false;
        let point = Point::new(state.x, state.y);

        if state.pressed && !self.prev.pressed {
            if let Some(id) = tree.hit_test(point) {
                tree.set_pressed(id, true);
                self.active = Some(id);
                changed = true;
            }
        } else if !state.pressed && self.prev.pressed {
            if let Some(id) = self.active.take() {
                tree.set_pressed(id, false);
                changed = true;
                if tree.hit_test(point) == Some(id) {
                    event = Some(UiEvent::Clicked(id));
                }
            }
        }

        self.prev = state;
        (event, changed)
    }
}
