use std::path::PathBuf;

use anyhow::Context;
use grid_snake::{game::SnakeGame, Config};

fn main() -> anyhow::Result<()> {
    // RUST_LOG raises the level; redirect stderr while playing.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::discover(path).context("loading configuration")?;

    let mut game = SnakeGame::new(config).context("opening the terminal")?;
    game.initialize().context("preparing the board")?;

    if game.show_intro()? {
        game.play()?;
    }

    game.shutdown()?;
    Ok(())
}
