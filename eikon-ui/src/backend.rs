//! Display and input seams
//!
//! The runtime talks to the outside world through two traits: a display
//! backend that accepts rendered pixel regions, and a pointer source
//! polled for the current input state. Implementations can be display
//! hardware drivers or a desktop simulator.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::primitives::Rectangle;

/// Errors a display backend can report from a flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The backend failed to present the frame.
    Present,
    /// The pixel slice does not cover the flushed region.
    SizeMismatch,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DisplayError::Present => write!(f, "backend failed to present the frame"),
            DisplayError::SizeMismatch => write!(f, "pixel data does not cover the flushed region"),
        }
    }
}

impl core::error::Error for DisplayError {}

/// Receives rendered frames from the runtime.
pub trait DisplayBackend {
    /// Hand a rendered region to the display.
    ///
    /// `pixels` is row-major and covers exactly `area`.
    fn flush(&mut self, area: Rectangle, pixels: &[Rgb888]) -> Result<(), DisplayError>;
}

/// Pointer state as reported by an input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PointerState {
    /// Horizontal position in pixels, display coordinates.
    pub x: i32,
    /// Vertical position in pixels, display coordinates.
    pub y: i32,
    /// Primary button held down.
    pub pressed: bool,
}

/// Polled for the current pointer state.
///
/// Infallible: a backend with nothing new to report returns the
/// previous state.
pub trait PointerSource {
    /// Return the most recent pointer state.
    fn read(&mut self) -> PointerState;
}
