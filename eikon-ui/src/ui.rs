//! UI runtime
//!
//! [`Ui`] owns the widget tree, the draw buffer, the tick counter and the
//! two built-in timers. The host registers a display backend and a
//! pointer source once, then drives the runtime from its loop:
//!
//! ```ignore
//! ui.tick_inc(elapsed_ms);
//! ui.timer_handler()?;
//! ```
//!
//! The input timer polls the pointer source and dispatches presses and
//! releases; the refresh timer redraws the tree into the buffer and
//! flushes it to the display whenever something changed.

use embedded_graphics::prelude::*;

use crate::backend::{DisplayBackend, DisplayError, PointerSource};
use crate::buffer::DrawBuffer;
use crate::input::{PointerDispatch, UiEvent};
use crate::style::Theme;
use crate::timer::PeriodicTimer;
use crate::widget::{Align, WidgetId, WidgetTree};

/// Resolution and timer periods for a runtime instance.
///
/// Owned by the host's startup code and handed to [`Ui::new`]; the draw
/// buffer is sized from it once, at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiConfig {
    /// Horizontal resolution in pixels.
    pub width: u32,
    /// Vertical resolution in pixels.
    pub height: u32,
    /// Pointer poll period in milliseconds.
    pub input_period_ms: u32,
    /// Redraw period in milliseconds.
    pub refresh_period_ms: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            width: 480,
            height: 320,
            input_period_ms: 30,
            refresh_period_ms: 33,
        }
    }
}

/// Errors from widget-tree operations and the timer handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UiError {
    /// The widget arena is full.
    TreeFull,
    /// The id does not name a live widget.
    UnknownWidget,
    /// The operation does not apply to this widget kind.
    KindMismatch,
    /// A backend is missing; registration must happen before the loop.
    NotRegistered,
    /// The display backend rejected a flush.
    Display(DisplayError),
}

impl From<DisplayError> for UiError {
    fn from(err: DisplayError) -> Self {
        UiError::Display(err)
    }
}

impl core::fmt::Display for UiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            UiError::TreeFull => write!(f, "widget arena is full"),
            UiError::UnknownWidget => write!(f, "unknown widget id"),
            UiError::KindMismatch => write!(f, "operation does not apply to this widget kind"),
            UiError::NotRegistered => write!(f, "display or pointer backend not registered"),
            UiError::Display(err) => write!(f, "display flush failed: {err}"),
        }
    }
}

impl core::error::Error for UiError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            UiError::Display(err) => Some(err),
            _ => None,
        }
    }
}

/// The widget runtime, generic over its display and pointer backends.
pub struct Ui<D, P> {
    config: UiConfig,
    theme: Theme,
    tree: WidgetTree,
    buffer: DrawBuffer,
    display: Option<D>,
    pointer: Option<P>,
    dispatch: PointerDispatch,
    input_timer: PeriodicTimer,
    refresh_timer: PeriodicTimer,
    tick: u32,
    dirty: bool,
    pending: Option<UiEvent>,
}

impl<D: DisplayBackend, P: PointerSource> Ui<D, P> {
    /// Initialize the runtime; allocates the draw buffer for the
    /// configured resolution.
    pub fn new(config: UiConfig, theme: Theme) -> Self {
        Self {
            config,
            theme,
            tree: WidgetTree::new(),
            buffer: DrawBuffer::new(config.width, config.height),
            display: None,
            pointer: None,
            dispatch: PointerDispatch::default(),
            input_timer: PeriodicTimer::new(config.input_period_ms),
            refresh_timer: PeriodicTimer::new(config.refresh_period_ms),
            tick: 0,
            dirty: true,
            pending: None,
        }
    }

    /// Register the display half of the backend.
    pub fn register_display(&mut self, display: D) {
        self.display = Some(display);
    }

    /// Register the pointer half of the backend.
    pub fn register_pointer(&mut self, pointer: P) {
        self.pointer = Some(pointer);
    }

    /// The root screen widget.
    pub fn screen(&self) -> WidgetId {
        self.tree.root()
    }

    /// Create a button under `parent`.
    pub fn create_button(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.dirty = true;
        self.tree.create_button(parent)
    }

    /// Create an empty label under `parent`.
    pub fn create_label(&mut self, parent: WidgetId) -> Result<WidgetId, UiError> {
        self.dirty = true;
        self.tree.create_label(parent)
    }

    /// Replace a label's text.
    pub fn set_label_text(&mut self, id: WidgetId, text: &str) -> Result<(), UiError> {
        self.dirty = true;
        self.tree.set_label_text(id, text)
    }

    /// Center a widget within its parent.
    pub fn center(&mut self, id: WidgetId) -> Result<(), UiError> {
        self.dirty = true;
        self.tree.set_align(id, Align::Center)
    }

    /// Advance the internal millisecond clock.
    pub fn tick_inc(&mut self, ms: u32) {
        self.tick = self.tick.wrapping_add(ms);
    }

    /// Current tick reading.
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Run due timers: poll the pointer, then redraw and flush when the
    /// tree changed.
    pub fn timer_handler(&mut self) -> Result<(), UiError> {
        let now = self.tick;
        if self.input_timer.poll(now) {
            self.poll_input()?;
        }
        if self.refresh_timer.poll(now) && self.dirty {
            self.refresh()?;
        }
        Ok(())
    }

    /// Take the most recent click event, if any. Latest wins; the slot is
    /// cleared on read.
    pub fn take_event(&mut self) -> Option<UiEvent> {
        self.pending.take()
    }

    fn poll_input(&mut self) -> Result<(), UiError> {
        let pointer = self.pointer.as_mut().ok_or(UiError::NotRegistered)?;
        let state = pointer.read();
        if self.dirty {
            // Hit-testing needs current bounds
            self.tree
                .layout(Size::new(self.config.width, self.config.height));
        }
        let (event, changed) = self.dispatch.dispatch(&mut self.tree, state);
        if changed {
            self.dirty = true;
        }
        if event.is_some() {
            self.pending = event;
        }
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), UiError> {
        self.tree
            .layout(Size::new(self.config.width, self.config.height));
        self.buffer.fill(self.theme.background);
        self.tree.draw(&mut self.buffer, &self.theme);

        let display = self.display.as_mut().ok_or(UiError::NotRegistered)?;
        display.flush(self.buffer.region(), self.buffer.data())?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::PointerState;

    use alloc::vec::Vec;
    use embedded_graphics::pixelcolor::Rgb888;
    use embedded_graphics::primitives::Rectangle;

    /// Records every flush it receives.
    struct RecordingDisplay {
        flushes: Vec<(Rectangle, usize)>,
        frame: Vec<Rgb888>,
        width: u32,
    }

    impl RecordingDisplay {
        fn new(width: u32) -> Self {
            Self {
                flushes: Vec::new(),
                frame: Vec::new(),
                width,
            }
        }

        fn pixel(&self, x: u32, y: u32) -> Rgb888 {
            self.frame[(y * self.width + x) as usize]
        }
    }

    impl DisplayBackend for RecordingDisplay {
        fn flush(&mut self, area: Rectangle, pixels: &[Rgb888]) -> Result<(), DisplayError> {
            self.flushes.push((area, pixels.len()));
            self.frame.clear();
            self.frame.extend_from_slice(pixels);
            Ok(())
        }
    }

    /// Replays a scripted sequence of pointer states, then holds the last.
    struct ScriptedPointer {
        states: Vec<PointerState>,
        next: usize,
    }

    impl ScriptedPointer {
        fn new(states: &[PointerState]) -> Self {
            Self {
                states: states.iter().copied().collect(),
                next: 0,
            }
        }
    }

    impl PointerSource for ScriptedPointer {
        fn read(&mut self) -> PointerState {
            let idx = self.next.min(self.states.len() - 1);
            self.next += 1;
            self.states[idx]
        }
    }

    fn demo_ui(states: &[PointerState]) -> Ui<RecordingDisplay, ScriptedPointer> {
        let config = UiConfig {
            width: 100,
            height: 100,
            input_period_ms: 30,
            refresh_period_ms: 33,
        };
        let mut ui = Ui::new(config, Theme::default());
        ui.register_display(RecordingDisplay::new(100));
        ui.register_pointer(ScriptedPointer::new(states));

        let btn = ui.create_button(ui.screen()).unwrap();
        let lbl = ui.create_label(btn).unwrap();
        ui.set_label_text(lbl, "Hi").unwrap();
        ui.center(lbl).unwrap();
        ui.center(btn).unwrap();
        ui
    }

    fn idle() -> PointerState {
        PointerState::default()
    }

    #[test]
    fn test_tick_inc_wraps() {
        let mut ui = demo_ui(&[idle()]);
        ui.tick_inc(u32::MAX);
        ui.tick_inc(2);
        assert_eq!(ui.tick(), 1);
    }

    #[test]
    fn test_nothing_fires_before_first_period() {
        let mut ui = demo_ui(&[idle()]);
        ui.tick_inc(20);
        ui.timer_handler().unwrap();
        let display = ui.display.as_ref().unwrap();
        assert!(display.flushes.is_empty());
    }

    #[test]
    fn test_refresh_flushes_full_region_once() {
        let mut ui = demo_ui(&[idle()]);
        ui.tick_inc(40);
        ui.timer_handler().unwrap();

        let display = ui.display.as_ref().unwrap();
        assert_eq!(display.flushes.len(), 1);
        let (area, len) = display.flushes[0];
        assert_eq!(area.size, Size::new(100, 100));
        assert_eq!(len, 100 * 100);

        // Clean tree: the next due refresh does not flush again
        ui.tick_inc(40);
        ui.timer_handler().unwrap();
        assert_eq!(ui.display.as_ref().unwrap().flushes.len(), 1);
    }

    #[test]
    fn test_rendered_colors() {
        let mut ui = demo_ui(&[idle()]);
        ui.tick_inc(40);
        ui.timer_handler().unwrap();

        let theme = Theme::default();
        let display = ui.display.as_ref().unwrap();
        // Corner is backdrop; (35, 50) is button fill left of the label
        assert_eq!(display.pixel(0, 0), theme.background);
        assert_eq!(display.pixel(35, 50), theme.button);
    }

    #[test]
    fn test_click_sequence_end_to_end() {
        // Poll 1: press on the button, poll 2: release on it
        let press = PointerState {
            x: 50,
            y: 50,
            pressed: true,
        };
        let release = PointerState {
            x: 50,
            y: 50,
            pressed: false,
        };
        let mut ui = demo_ui(&[press, release]);
        let btn_id = WidgetId(1);

        // First input poll latches the press, refresh paints pressed
        ui.tick_inc(40);
        ui.timer_handler().unwrap();
        let theme = Theme::default();
        assert_eq!(
            ui.display.as_ref().unwrap().pixel(35, 50),
            theme.button_pressed
        );
        assert_eq!(ui.take_event(), None);

        // Second input poll releases over the button: a click
        ui.tick_inc(40);
        ui.timer_handler().unwrap();
        assert_eq!(ui.take_event(), Some(UiEvent::Clicked(btn_id)));
        assert_eq!(ui.display.as_ref().unwrap().pixel(35, 50), theme.button);
        // The slot is cleared on read
        assert_eq!(ui.take_event(), None);
    }

    #[test]
    fn test_handler_without_backends_errors() {
        let mut ui: Ui<RecordingDisplay, ScriptedPointer> =
            Ui::new(UiConfig::default(), Theme::default());
        ui.tick_inc(40);
        assert_eq!(ui.timer_handler(), Err(UiError::NotRegistered));
    }
}
