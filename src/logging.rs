//! Logger setup.

use std::{fs::File, path::Path};

use color_eyre::eyre::Result;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Installs the global logger.
///
/// `level` is the default for every module, and any directives in the `RUST_LOG` environment
/// variable are applied on top of it, so `RUST_LOG=debug` raises the level past `level`.
/// While the terminal interface owns the screen, anything written to stderr would tear through
/// the drawing, so a `file` can be given to collect the log there instead.
///
/// # Errors
///
/// This function returns an error if the log file cannot be created or a logger has already been
/// installed.
pub fn init(level: LevelFilter, file: Option<&Path>) -> Result<()> {
    let mut builder = builder(level, Env::default());

    if let Some(path) = file {
        let _ = builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }

    builder.try_init()?;

    Ok(())
}

/// Creates a builder filtering at `level`, overridden by the directives found through `env`.
fn builder(level: LevelFilter, env: Env<'_>) -> Builder {
    let mut builder = Builder::new();
    let _ = builder.filter_level(level).parse_env(env);

    builder
}
