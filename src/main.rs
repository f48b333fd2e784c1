//! This crate contains the source code for the binary for the game dreadmaze.

#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use std::io;

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use dreadmaze::{config::Cli, logging, print_maze, App};

fn main() -> Result<()> {
    install()?;

    let cli = Cli::parse();
    logging::init(cli.log_level, cli.log_file.as_deref())?;
    let settings = cli.settings()?;

    if cli.print {
        return print_maze(&settings, &mut io::stdout().lock());
    }

    let mut app = App::new(settings)?;
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
