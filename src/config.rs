//! Board geometry and user configuration.
//!
//! Everything in the config file is optional. When `board_size` is left out the
//! host fits the largest square board into the terminal.

use std::path::{Path, PathBuf};
use std::{fs, time::Duration};

use log::warn;
use rand::Rng;
use serde::Deserialize;

use crate::snake::Cell;

pub const DEFAULT_CELL_SIZE: i32 = 20;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Environment variable consulted when no path is given on the command line.
pub const CONFIG_ENV_VAR: &str = "GRID_SNAKE_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Size of one cell and of the square board, both in the same units.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    cell_size: i32,
    board_size: i32,
}

impl Geometry {
    pub fn new(cell_size: i32, board_size: i32) -> Result<Self, ConfigError> {
        if cell_size <= 0 {
            return Err(ConfigError::Invalid {
                key: "cell_size",
                reason: format!("must be positive, got {}", cell_size),
            });
        }
        if board_size < cell_size {
            return Err(ConfigError::Invalid {
                key: "board_size",
                reason: format!("{} is smaller than one cell ({})", board_size, cell_size),
            });
        }

        let geometry = Geometry { cell_size, board_size };
        if !geometry.is_aligned() {
            warn!(
                "board size {} is not a multiple of cell size {}, the last row and column are partial",
                board_size, cell_size
            );
        }
        Ok(geometry)
    }

    /// Square board of `columns` whole cells.
    pub fn with_columns(cell_size: i32, columns: i32) -> Result<Self, ConfigError> {
        Geometry::new(cell_size, cell_size.saturating_mul(columns))
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn board_size(&self) -> i32 {
        self.board_size
    }

    pub fn is_aligned(&self) -> bool {
        self.board_size % self.cell_size == 0
    }

    /// Cells per side whose origin lies on the board, partial ones included.
    pub fn columns(&self) -> i32 {
        self.board_size / self.cell_size + (self.board_size % self.cell_size != 0) as i32
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.board_size).contains(&cell.x) && (0..self.board_size).contains(&cell.y)
    }

    /// Grid index of `cell` along each axis.
    pub fn index_of(&self, cell: Cell) -> (i32, i32) {
        (cell.x / self.cell_size, cell.y / self.cell_size)
    }

    /// A cell drawn uniformly over the whole grid.
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        let columns = self.columns();
        Cell::new(
            rng.gen_range(0..columns) * self.cell_size,
            rng.gen_range(0..columns) * self.cell_size,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cell_size: i32,
    pub board_size: Option<i32>,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cell_size: DEFAULT_CELL_SIZE,
            board_size: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Config::from_toml_str(&source)
    }

    /// Loads `path` if given, else the file named by `$GRID_SNAKE_CONFIG`,
    /// else the defaults.
    pub fn discover(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        match path.or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from)) {
            Some(path) => Config::load(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "tick_interval_ms",
                reason: "must be positive".to_string(),
            });
        }
        match self.board_size {
            Some(board_size) => Geometry::new(self.cell_size, board_size).map(|_| ()),
            None => Geometry::new(self.cell_size, self.cell_size).map(|_| ()),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// The configured board, or the largest square of `max_columns` cells.
    pub fn geometry(&self, max_columns: i32) -> Result<Geometry, ConfigError> {
        match self.board_size {
            Some(board_size) => Geometry::new(self.cell_size, board_size),
            None => Geometry::with_columns(self.cell_size, max_columns),
        }
    }
}
