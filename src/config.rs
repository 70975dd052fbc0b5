use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;

use crate::error::ConfigError;

const APP_DIR_NAME: &str = "classic-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default playable width in coordinate units.
pub const DEFAULT_GRID_WIDTH: u16 = 700;

/// Default playable height in coordinate units.
pub const DEFAULT_GRID_HEIGHT: u16 = 700;

/// Default side length of one square cell.
pub const DEFAULT_CELL_SIZE: u16 = 50;

/// Default number of snake segments at the start of a round.
pub const DEFAULT_INITIAL_LENGTH: u16 = 3;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 150;

/// Upper bound on how long the driver blocks waiting for input before redrawing.
pub const MAX_INPUT_POLL_MS: u64 = 16;

/// Terminal columns used to draw one grid cell, keeping cells roughly square.
pub const TERMINAL_COLUMNS_PER_CELL: u16 = 2;

/// Glyph drawn for each snake segment.
pub const GLYPH_SNAKE_SEGMENT: &str = "██";

/// Glyph drawn for the food cell.
pub const GLYPH_FOOD: &str = "()";

/// Geometry and pacing of one game.
///
/// All coordinates in the game are multiples of `cell_size`; `width` and
/// `height` bound the playable area in the same units.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub cell_size: u16,
    pub initial_length: u16,
    pub tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            cell_size: DEFAULT_CELL_SIZE,
            initial_length: DEFAULT_INITIAL_LENGTH,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl GameConfig {
    /// Number of cell columns across the grid.
    #[must_use]
    pub fn columns(&self) -> u16 {
        self.width / self.cell_size.max(1)
    }

    /// Number of cell rows down the grid.
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.height / self.cell_size.max(1)
    }

    /// Cell side length as a signed coordinate step.
    #[must_use]
    pub fn step(&self) -> i32 {
        i32::from(self.cell_size)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks that the grid is quantized by the cell size and the starting
    /// snake fits on column 0 below row 0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        for (dimension, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value % self.cell_size != 0 {
                return Err(ConfigError::MisalignedDimension {
                    dimension,
                    value,
                    cell_size: self.cell_size,
                });
            }
        }

        let rows = self.rows();
        if self.initial_length == 0 || self.initial_length >= rows {
            return Err(ConfigError::InitialLengthOutOfRange {
                length: self.initial_length,
                rows,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        Ok(())
    }

    /// Returns a copy with every present override applied.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(cell_size) = overrides.cell_size {
            self.cell_size = cell_size;
        }
        if let Some(initial_length) = overrides.initial_length {
            self.initial_length = initial_length;
        }
        if let Some(tick_interval_ms) = overrides.tick_interval_ms {
            self.tick_interval_ms = tick_interval_ms;
        }
        self
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ConfigOverrides {
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub cell_size: Option<u16>,
    pub initial_length: Option<u16>,
    pub tick_interval_ms: Option<u64>,
}

/// Returns the platform-correct user config path, if the platform has one.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

/// Resolves the base configuration before CLI overrides.
///
/// An explicit path must exist. The per-user file is optional and falls back
/// to defaults when absent.
pub fn load_config(explicit: Option<&Path>) -> Result<GameConfig, ConfigError> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => match user_config_path() {
            Some(path) => load_optional_config(&path),
            None => Ok(GameConfig::default()),
        },
    }
}

fn load_optional_config(path: &Path) -> Result<GameConfig, ConfigError> {
    match load_config_from_path(path) {
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Ok(GameConfig::default())
        }
        other => other,
    }
}

fn load_config_from_path(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str::<GameConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Palette {
    pub snake: Color,
    pub food: Color,
    pub field_bg: Color,
    pub border: Color,
    pub text: Color,
    pub game_over: Color,
    pub hint: Color,
}

/// Green snake, red food on black.
pub const CLASSIC_PALETTE: Palette = Palette {
    snake: Color::Green,
    food: Color::Red,
    field_bg: Color::Black,
    border: Color::White,
    text: Color::White,
    game_over: Color::Red,
    hint: Color::DarkGray,
};
