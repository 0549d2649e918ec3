use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use arcade_snake::app::App;
use arcade_snake::feedback::spawn_voice;
use arcade_snake::game::GameConfig;
use arcade_snake::highscore::JsonFileStore;
use arcade_snake::logging;
use arcade_snake::render::BoardView;
use arcade_snake::session::Session;

#[derive(Parser)]
#[command(name = "arcade_snake")]
#[command(version, about = "Arcade Snake with a persisted highscore list")]
struct Cli {
    /// Arena width in pixels (one cell is 20 px)
    #[arg(long, default_value = "400")]
    width: u32,

    /// Arena height in pixels
    #[arg(long, default_value = "400")]
    height: u32,

    /// File holding the highscore list
    #[arg(long, default_value = "snake_highscores.json")]
    highscores: PathBuf,

    /// File receiving log output
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,

    /// Move immediately when a turn is accepted instead of on the next tick
    #[arg(long)]
    instant_turns: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_file)?;

    // Create game configuration from CLI arguments
    let config = GameConfig {
        instant_turns: cli.instant_turns,
        ..GameConfig::new(cli.width, cli.height)
    };

    let (announcer, voice) = spawn_voice();
    let session = Session::new(
        config,
        JsonFileStore::new(cli.highscores),
        BoardView::new(),
        announcer,
    )
    .context("Invalid arena size")?;

    let mut app = App::new(session);
    let result = app.run().await;

    // Dropping the session closes the announcer channel; let the voice finish
    drop(app);
    let _ = voice.await;

    result
}
