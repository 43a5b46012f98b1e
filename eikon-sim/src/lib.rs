//! Desktop simulator backend
//!
//! Opens a fixed-size window with a software framebuffer and adapts it to
//! the `eikon-ui` display and pointer seams. The window and its pixel
//! surface are shared between three handles:
//!
//! - [`Simulator`] - owns the event loop; the host calls
//!   [`Simulator::pump_events`] every loop iteration to keep the window
//!   responsive and the pointer state current
//! - [`SimDisplay`] - receives flushed frames and presents them
//! - [`SimPointer`] - reports the last observed mouse state
//!
//! Nothing here blocks: the event pump drains whatever is pending and
//! returns.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, info};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::{Window, WindowBuilder};

use eikon_ui::PointerState;

mod display;
mod pointer;

pub use display::SimDisplay;
pub use pointer::SimPointer;

/// Errors raised while bringing up the simulator window.
#[derive(Debug)]
pub enum SimError {
    /// Window creation failed.
    Window(winit::error::OsError),
    /// Pixel surface creation failed.
    Surface(pixels::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Window(err) => write!(f, "window creation failed: {err}"),
            SimError::Surface(err) => write!(f, "pixel surface creation failed: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Window(err) => Some(err),
            SimError::Surface(err) => Some(err),
        }
    }
}

impl From<winit::error::OsError> for SimError {
    fn from(err: winit::error::OsError) -> Self {
        SimError::Window(err)
    }
}

impl From<pixels::Error> for SimError {
    fn from(err: pixels::Error) -> Self {
        SimError::Surface(err)
    }
}

/// State shared between the event pump and the two backend handles.
pub(crate) struct SimShared {
    pub pixels: Pixels,
    pub width: u32,
    pub height: u32,
    pub pointer: PointerState,
    pub quit: bool,
}

pub(crate) type Shared = Rc<RefCell<SimShared>>;

/// The simulator window and its event loop.
pub struct Simulator {
    event_loop: EventLoop<()>,
    // The pixel surface holds the window's raw handle; the window must
    // stay alive as long as the shared surface does.
    _window: Window,
    shared: Shared,
}

impl Simulator {
    /// Open the simulator window and return it together with its display
    /// and pointer halves.
    pub fn new(
        width: u32,
        height: u32,
        title: &str,
    ) -> Result<(Self, SimDisplay, SimPointer), SimError> {
        let event_loop = EventLoop::new();
        let window = WindowBuilder::new()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(false)
            .build(&event_loop)?;

        let surface = SurfaceTexture::new(width, height, &window);
        let pixels = Pixels::new(width, height, surface)?;
        info!("simulator window up ({width}x{height})");

        let shared = Rc::new(RefCell::new(SimShared {
            pixels,
            width,
            height,
            pointer: PointerState::default(),
            quit: false,
        }));

        let display = SimDisplay::new(shared.clone());
        let pointer = SimPointer::new(shared.clone());
        let simulator = Self {
            event_loop,
            _window: window,
            shared,
        };
        Ok((simulator, display, pointer))
    }

    /// Drain pending window events without blocking.
    ///
    /// Returns `false` once the window was asked to close.
    pub fn pump_events(&mut self) -> bool {
        let shared = self.shared.clone();
        self.event_loop.run_return(|event, _, control_flow| {
            match event {
                Event::WindowEvent { event, .. } => {
                    let mut shared = shared.borrow_mut();
                    match event {
                        WindowEvent::CloseRequested => {
                            info!("close requested");
                            shared.quit = true;
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            shared.pointer.x = position.x as i32;
                            shared.pointer.y = position.y as i32;
                        }
                        WindowEvent::MouseInput {
                            state,
                            button: MouseButton::Left,
                            ..
                        } => {
                            let pressed = state == ElementState::Pressed;
                            debug!(
                                "mouse {} at ({}, {})",
                                if pressed { "down" } else { "up" },
                                shared.pointer.x,
                                shared.pointer.y
                            );
                            shared.pointer.pressed = pressed;
                        }
                        _ => {}
                    }
                }
                Event::MainEventsCleared => {
                    // One full pass over the queue is enough; hand
                    // control back to the host loop.
                    *control_flow = ControlFlow::Exit;
                }
                _ => {}
            }
        });
        !self.shared.borrow().quit
    }
}
