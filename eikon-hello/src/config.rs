//! Demo configuration
//!
//! TOML-backed settings with an embedded default document. An
//! `eikon.toml` in the working directory overrides the defaults when it
//! parses and validates; anything else falls back with a warning.

use anyhow::{anyhow, bail, Context, Result};
use embedded_graphics::pixelcolor::Rgb888;
use log::{error, info, warn};
use serde::Deserialize;

use eikon_ui::{Theme, UiConfig};

/// Default configuration compiled into the binary.
const EMBEDDED_CONFIG: &str = include_str!("../eikon.toml");

/// Override file looked up in the working directory.
const CONFIG_PATH: &str = "eikon.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub display: DisplayConfig,
    pub timing: TimingConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Horizontal resolution in pixels.
    pub width: u32,
    /// Vertical resolution in pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Pointer poll period in milliseconds.
    pub input_period_ms: u32,
    /// Redraw period in milliseconds.
    pub refresh_period_ms: u32,
    /// Host loop sleep between iterations, in milliseconds.
    pub loop_sleep_ms: u64,
}

/// Colors as `#RRGGBB` strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    pub background: String,
    pub button: String,
    pub text: String,
}

impl Config {
    /// Runtime configuration for `Ui::new`.
    pub fn ui_config(&self) -> UiConfig {
        UiConfig {
            width: self.display.width,
            height: self.display.height,
            input_period_ms: self.timing.input_period_ms,
            refresh_period_ms: self.timing.refresh_period_ms,
        }
    }

    /// Resolve the theme color strings.
    pub fn theme(&self) -> Result<Theme> {
        Ok(Theme::new(
            parse_hex_color(&self.theme.button)?,
            parse_hex_color(&self.theme.background)?,
            parse_hex_color(&self.theme.text)?,
        ))
    }
}

/// Parse a TOML configuration document.
pub fn parse_config(input: &str) -> Result<Config> {
    let config: Config = toml::from_str(input).context("invalid configuration document")?;
    config.theme().context("invalid theme colors")?;
    Ok(config)
}

/// Load `eikon.toml` from the working directory, or fall back to the
/// embedded defaults.
pub fn load() -> Config {
    if let Ok(text) = std::fs::read_to_string(CONFIG_PATH) {
        match parse_config(&text) {
            Ok(config) => {
                info!("loaded configuration from {CONFIG_PATH}");
                return config;
            }
            Err(err) => {
                warn!("ignoring {CONFIG_PATH}: {err:#}");
            }
        }
    } else {
        info!("no {CONFIG_PATH} in the working directory, using embedded defaults");
    }
    embedded_config()
}

/// The compiled-in default configuration.
fn embedded_config() -> Config {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(err) => {
            // Only reachable if the embedded document was edited into an
            // invalid state; keep the demo runnable regardless.
            error!("embedded configuration is invalid ({err:#}), using fallback");
            fallback_config()
        }
    }
}

/// Last-resort hardcoded configuration.
fn fallback_config() -> Config {
    Config {
        display: DisplayConfig {
            width: 480,
            height: 320,
            title: "Eikon demo".into(),
        },
        timing: TimingConfig {
            input_period_ms: 30,
            refresh_period_ms: 33,
            loop_sleep_ms: 5,
        },
        theme: ThemeConfig {
            background: "#14143C".into(),
            button: "#7744BB".into(),
            text: "#FFFFFF".into(),
        },
    }
}

/// Parse `#RRGGBB` into a color.
fn parse_hex_color(s: &str) -> Result<Rgb888> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| anyhow!("color {s:?} is missing the '#' prefix"))?;
    if hex.len() != 6 {
        bail!("color {s:?} must be #RRGGBB");
    }
    let value =
        u32::from_str_radix(hex, 16).with_context(|| format!("color {s:?} is not valid hex"))?;
    Ok(Rgb888::new(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}
