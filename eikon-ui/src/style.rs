//! Theme colors
//!
//! One flat color set for the whole tree. The default palette is a
//! violet accent on a dark navy backdrop.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;

/// Color set applied to the widget tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Screen background.
    pub background: Rgb888,
    /// Button fill, released.
    pub button: Rgb888,
    /// Button fill while pressed.
    pub button_pressed: Rgb888,
    /// Label text.
    pub text: Rgb888,
}

impl Theme {
    /// Build a theme from an accent and a backdrop; the pressed shade is
    /// derived from the accent.
    pub fn new(button: Rgb888, background: Rgb888, text: Rgb888) -> Self {
        Self {
            background,
            button,
            button_pressed: darken(button),
            text,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(
            Rgb888::new(0x77, 0x44, 0xBB),
            Rgb888::new(0x14, 0x14, 0x3C),
            Rgb888::WHITE,
        )
    }
}

/// Pressed-state shade: two thirds of each channel.
fn darken(color: Rgb888) -> Rgb888 {
    Rgb888::new(
        (color.r() as u16 * 2 / 3) as u8,
        (color.g() as u16 * 2 / 3) as u8,
        (color.b() as u16 * 2 / 3) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let theme = Theme::default();
        assert_eq!(theme.button, Rgb888::new(0x77, 0x44, 0xBB));
        assert_eq!(theme.background, Rgb888::new(0x14, 0x14, 0x3C));
    }

    #[test]
    fn test_pressed_shade_is_darker() {
        let theme = Theme::default();
        assert!(theme.button_pressed.r() < theme.button.r());
        assert!(theme.button_pressed.g() < theme.button.g());
        assert!(theme.button_pressed.b() < theme.button.b());
    }

    #[test]
    fn test_darken_black_stays_black() {
        assert_eq!(darken(Rgb888::BLACK), Rgb888::BLACK);
    }
}
