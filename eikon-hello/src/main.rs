//! Eikon hello-world demo
//!
//! Brings up the desktop simulator, builds a one-button widget tree and
//! drives the UI runtime from a polling loop timed by a monotonic clock:
//! pump window events, advance the tick counter by the measured elapsed
//! time, run the timer handler, sleep briefly, repeat.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};

use eikon_sim::{SimDisplay, SimPointer, Simulator};
use eikon_ui::{tick_elapsed, Ui, UiEvent};

mod clock;
mod config;

use clock::MonotonicClock;
use config::Config;

fn main() -> Result<()> {
    // Always enable some form of logging
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let config = config::load();

    let (mut simulator, mut ui) = driver_init(&config)?;
    create_ui(&mut ui)?;

    info!("begin main loop");
    run_loop(&mut simulator, &mut ui, &config)
}

/// One-time backend bring-up: open the simulator window and register its
/// display and pointer halves with a fresh runtime.
fn driver_init(config: &Config) -> Result<(Simulator, Ui<SimDisplay, SimPointer>)> {
    let (simulator, display, pointer) = Simulator::new(
        config.display.width,
        config.display.height,
        &config.display.title,
    )
    .context("failed to open the simulator window")?;

    let theme = config.theme().context("invalid theme colors")?;
    let mut ui = Ui::new(config.ui_config(), theme);
    ui.register_display(display);
    ui.register_pointer(pointer);
    info!("drivers registered");

    Ok((simulator, ui))
}

/// One-time construction of the static widget tree.
fn create_ui(ui: &mut Ui<SimDisplay, SimPointer>) -> Result<()> {
    let button = ui.create_button(ui.screen())?;
    let label = ui.create_label(button)?;

    ui.set_label_text(label, "Hello world!")?;

    ui.center(label)?;
    ui.center(button)?;
    Ok(())
}

/// The polling loop. The previous clock reading is loop state, threaded
/// through iterations.
fn run_loop(
    simulator: &mut Simulator,
    ui: &mut Ui<SimDisplay, SimPointer>,
    config: &Config,
) -> Result<()> {
    let clock = MonotonicClock::new();
    let mut last_ms = clock.now_ms();

    while simulator.pump_events() {
        let now_ms = clock.now_ms();
        ui.tick_inc(tick_elapsed(last_ms, now_ms));
        last_ms = now_ms;

        ui.timer_handler().context("timer handler failed")?;

        if let Some(UiEvent::Clicked(id)) = ui.take_event() {
            debug!("button clicked: {id:?}");
        }

        thread::sleep(Duration::from_millis(config.timing.loop_sleep_ms));
    }

    info!("window closed, shutting down");
    Ok(())
}
