//! Owned draw buffer
//!
//! A runtime-sized framebuffer the widget tree renders into. The buffer
//! implements [`DrawTarget`] so widgets can use `embedded-graphics`
//! primitives directly; each redraw ends with the pixel data being handed
//! to the display backend in one flush.

use alloc::vec;
use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Framebuffer sized from the configured resolution.
///
/// Out-of-bounds draws are clipped, never an error.
pub struct DrawBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl DrawBuffer {
    /// Allocate a buffer for the given resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb888::BLACK; (width as usize) * (height as usize)],
        }
    }

    /// Fill the whole buffer with one color.
    pub fn fill(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    /// Horizontal resolution in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Vertical resolution in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The full-buffer region, as passed to a full-screen flush.
    pub fn region(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(self.width, self.height))
    }

    /// Row-major pixel data.
    pub fn data(&self) -> &[Rgb888] {
        &self.pixels
    }

    /// Read one pixel, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb888> {
        if x < self.width && y < self.height {
            self.pixels
                .get((y as usize) * (self.width as usize) + (x as usize))
                .copied()
        } else {
            None
        }
    }
}

impl OriginDimensions for DrawBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for DrawBuffer {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && point.y >= 0
                && (point.x as u32) < self.width
                && (point.y as u32) < self.height
            {
                let idx = (point.y as usize) * (self.width as usize) + (point.x as usize);
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let buf = DrawBuffer::new(32, 16);
        assert_eq!(buf.width(), 32);
        assert_eq!(buf.height(), 16);
        assert_eq!(buf.data().len(), 32 * 16);
        assert_eq!(buf.region(), Rectangle::new(Point::zero(), Size::new(32, 16)));
    }

    #[test]
    fn test_fill() {
        let mut buf = DrawBuffer::new(8, 8);
        let red = Rgb888::new(0xFF, 0, 0);
        buf.fill(red);
        assert!(buf.data().iter().all(|&p| p == red));
    }

    #[test]
    fn test_draw_pixel_row_major() {
        let mut buf = DrawBuffer::new(8, 4);
        let green = Rgb888::new(0, 0xFF, 0);
        buf.draw_iter([Pixel(Point::new(2, 1), green)]).ok();
        assert_eq!(buf.pixel(2, 1), Some(green));
        assert_eq!(buf.data()[8 + 2], green);
    }

    #[test]
    fn test_out_of_bounds_draws_are_clipped() {
        let mut buf = DrawBuffer::new(4, 4);
        let white = Rgb888::WHITE;
        buf.draw_iter([
            Pixel(Point::new(-1, 0), white),
            Pixel(Point::new(0, -1), white),
            Pixel(Point::new(4, 0), white),
            Pixel(Point::new(0, 4), white),
        ])
        .ok();
        assert!(buf.data().iter().all(|&p| p == Rgb888::BLACK));
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let buf = DrawBuffer::new(4, 4);
        assert_eq!(buf.pixel(4, 0), None);
        assert_eq!(buf.pixel(0, 4), None);
    }
}
