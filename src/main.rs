use std::io;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use torus_life::Universe;
use torus_life::config::Config;
use torus_life::driver::Driver;
use torus_life::driver::StopHandle;
use torus_life::render::Canvas;

use terminal::Terminal;

mod terminal;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_args(std::env::args().skip(1)).context("Invalid arguments")?;
    info!(?config, "starting");

    let mut universe = Universe::seeded(config.width, config.height, &config.seed)
        .context("Failed to create universe")?;

    let canvas = Canvas::for_grid(
        config.width,
        config.height,
        config.cell_size,
        config.gridlines,
    );

    let mut term = Terminal::enter(canvas).context("Failed to set up terminal")?;

    let stop = StopHandle::new();
    let input = terminal::spawn_input(stop.clone());

    let frames = Driver::new(config.frame_time())
        .with_generations(config.generations)
        .run(&mut universe, &mut term, &stop);

    stop.stop();
    let input = input.join();

    // restore the terminal before anything is reported
    drop(term);

    match input {
        Ok(res) => res.context("Failed to read terminal input")?,
        Err(_) => anyhow::bail!("Input thread panicked"),
    }

    let frames = frames?;
    info!(frames, generation = universe.generation(), "done");

    Ok(())
}
