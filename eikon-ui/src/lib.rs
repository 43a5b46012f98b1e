//! Widget runtime for pixel displays
//!
//! This crate provides:
//! - `DisplayBackend` / `PointerSource` seams for display and input drivers
//! - A bounded widget tree (screen, button, label) rendered through
//!   `embedded-graphics`
//! - An explicitly advanced millisecond tick counter and the timer engine
//!   that drives input polling and redraw
//!
//! # Architecture
//!
//! The host owns time and the loop. It advances the tick counter with
//! [`Ui::tick_inc`] and calls [`Ui::timer_handler`]; the runtime polls the
//! registered pointer source, updates widget state, and hands rendered
//! frames to the registered display backend. Nothing here blocks, sleeps,
//! or reads a clock.
//!
//! Backends can be real display hardware or a desktop simulator - the
//! runtime does not care which.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod buffer;
pub mod input;
pub mod style;
pub mod tick;
mod timer;
pub mod ui;
pub mod widget;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, PointerSource, PointerState};
pub use buffer::DrawBuffer;
pub use input::UiEvent;
pub use style::Theme;
pub use tick::tick_elapsed;
pub use ui::{Ui, UiConfig, UiError};
pub use widget::{Align, WidgetId, MAX_WIDGETS};
