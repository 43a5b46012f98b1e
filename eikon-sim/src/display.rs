//! Display half of the simulator
//!
//! Converts flushed `Rgb888` regions into the surface's RGBA byte layout
//! and presents the frame.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{error, trace};

use eikon_ui::{DisplayBackend, DisplayError};

use crate::Shared;

/// Receives rendered frames from the UI runtime.
pub struct SimDisplay {
    shared: Shared,
}

impl SimDisplay {
    pub(crate) fn new(shared: Shared) -> Self {
        Self { shared }
    }
}

impl DisplayBackend for SimDisplay {
    fn flush(&mut self, area: Rectangle, pixels: &[Rgb888]) -> Result<(), DisplayError> {
        let mut shared = self.shared.borrow_mut();
        let shared = &mut *shared;

        let expected = (area.size.width as usize) * (area.size.height as usize);
        if pixels.len() != expected || !fits(&area, shared.width, shared.height) {
            return Err(DisplayError::SizeMismatch);
        }

        blit_region(shared.pixels.frame_mut(), shared.width, &area, pixels);
        trace!("flushed {}x{} region", area.size.width, area.size.height);

        shared.pixels.render().map_err(|err| {
            error!("present failed: {err}");
            DisplayError::Present
        })
    }
}

/// Whole region inside a `width` x `height` surface.
fn fits(area: &Rectangle, width: u32, height: u32) -> bool {
    area.top_left.x >= 0
        && area.top_left.y >= 0
        && (area.top_left.x as u32) + area.size.width <= width
        && (area.top_left.y as u32) + area.size.height <= height
}

/// Copy a row-major `Rgb888` region into an RGBA frame of `frame_width`
/// pixels per row. The caller has bounds-checked `area`.
fn blit_region(frame: &mut [u8], frame_width: u32, area: &Rectangle, pixels: &[Rgb888]) {
    let row_len = area.size.width as usize;
    for (row, chunk) in pixels.chunks_exact(row_len).enumerate() {
        let y = area.top_left.y as usize + row;
        let mut idx = (y * frame_width as usize + area.top_left.x as usize) * 4;
        for color in chunk {
            frame[idx..idx + 4].copy_from_slice(&[color.r(), color.g(), color.b(), 0xFF]);
            idx += 4;
        }
    }
}
