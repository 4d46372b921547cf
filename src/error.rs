use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("terminal error: {0}")]
    Terminal(#[from] crossterm::ErrorKind),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("a board of {columns}x{columns} cells does not fit a {width}x{height} terminal")]
    BoardTooLarge { columns: i32, width: u16, height: u16 },
}

pub type Result<T> = std::result::Result<T, Error>;
