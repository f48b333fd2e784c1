//! Command-line configuration.
//!
//! This module contains the [`Cli`] arguments parsed with clap, the validated [`Settings`] the
//! rest of the program runs with, and the maze size presets offered in the options menu.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::{ensure, Result};
use log::LevelFilter;

use crate::{
    game::{DEFAULT_COOLDOWN, DEFAULT_TIME_LIMIT},
    maze,
};

/// Maze sizes the options menu cycles through, as `(rows, cols)`.
pub(crate) const SIZE_PRESETS: [(usize, usize); 4] = [(11, 11), (21, 21), (31, 31), (41, 41)];

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// Number of maze rows, outer wall included.
    #[arg(short, long, default_value_t = 21)]
    pub rows: usize,
    /// Number of maze columns, outer wall included.
    #[arg(short, long, default_value_t = 21)]
    pub cols: usize,
    /// Seed for a reproducible sequence of mazes.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Seconds the player has to reach the exit once the round starts.
    #[arg(short, long, default_value_t = DEFAULT_TIME_LIMIT.as_secs())]
    pub time_limit: u64,
    /// Seconds to wait after losing before the round resets.
    #[arg(long, default_value_t = DEFAULT_COOLDOWN.as_secs())]
    pub cooldown: u64,
    /// Print a single maze to stdout and exit instead of starting the game.
    #[arg(short, long)]
    pub print: bool,
    /// Most verbose log level to emit.
    #[arg(long, default_value_t = LevelFilter::Warn)]
    pub log_level: LevelFilter,
    /// File to write logs to instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Longest time limit or cooldown accepted, in seconds.
const MAX_SECONDS: u64 = 24 * 60 * 60;

impl Cli {
    /// Checks the arguments and turns them into [`Settings`].
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze dimensions are too small, the time limit is
    /// zero, or either timing is longer than a day.
    pub fn settings(&self) -> Result<Settings> {
        maze::validate_dimensions(self.rows, self.cols)?;
        ensure!(self.time_limit > 0, "time limit must be at least one second");
        ensure!(
            self.time_limit <= MAX_SECONDS,
            "time limit must be at most {MAX_SECONDS} seconds"
        );
        ensure!(
            self.cooldown <= MAX_SECONDS,
            "cooldown must be at most {MAX_SECONDS} seconds"
        );

        Ok(Settings {
            rows: self.rows,
            cols: self.cols,
            seed: self.seed,
            time_limit: Duration::from_secs(self.time_limit),
            cooldown: Duration::from_secs(self.cooldown),
        })
    }
}

/// Validated settings for generating and playing mazes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Number of maze rows.
    pub rows: usize,
    /// Number of maze columns.
    pub cols: usize,
    /// Seed for the maze random source, drawn from the system when absent.
    pub seed: Option<u64>,
    /// Time available once a round starts.
    pub time_limit: Duration,
    /// Pause after losing before the round resets.
    pub cooldown: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 21,
            cols: 21,
            seed: None,
            time_limit: DEFAULT_TIME_LIMIT,
            cooldown: DEFAULT_COOLDOWN,
        }
    }
}

impl Settings {
    /// Switches to the size preset after the current size, wrapping around. A size that is not
    /// a preset moves to the first preset.
    pub(crate) fn cycle_size(&mut self) {
        let next = SIZE_PRESETS
            .iter()
            .position(|&size| size == (self.rows, self.cols))
            .and_then(|idx| SIZE_PRESETS.get(idx + 1))
            .or_else(|| SIZE_PRESETS.first())
            .copied();

        if let Some((rows, cols)) = next {
            self.rows = rows;
            self.cols = cols;
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["dreadmaze"]).expect("no arguments should parse");
        let settings = cli.settings().expect("defaults should be valid");

        assert_eq!(settings, Settings::default());
        assert!(!cli.print);
        assert_eq!(cli.log_level, LevelFilter::Warn);
        assert_eq!(cli.log_file, None);
    }

    #[test]
    fn test_cli_all_arguments() {
        let cli = Cli::try_parse_from([
            "dreadmaze",
            "--rows",
            "15",
            "-c",
            "31",
            "--seed",
            "7",
            "-t",
            "45",
            "--cooldown",
            "2",
            "--print",
            "--log-level",
            "debug",
            "--log-file",
            "maze.log",
        ])
        .expect("arguments should parse");
        let settings = cli.settings().expect("arguments should be valid");

        assert_eq!(settings.rows, 15);
        assert_eq!(settings.cols, 31);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.time_limit, Duration::from_secs(45));
        assert_eq!(settings.cooldown, Duration::from_secs(2));
        assert!(cli.print);
        assert_eq!(cli.log_level, LevelFilter::Debug);
        assert_eq!(cli.log_file, Some(PathBuf::from("maze.log")));
    }

    #[test]
    fn test_cli_rejects_small_maze() {
        let cli = Cli::try_parse_from(["dreadmaze", "--rows", "4"]).expect("arguments should parse");

        assert!(cli.settings().is_err());
    }

    #[test]
    fn test_cli_rejects_zero_time_limit() {
        let cli =
            Cli::try_parse_from(["dreadmaze", "--time-limit", "0"]).expect("arguments should parse");

        assert!(cli.settings().is_err());
    }

    #[test]
    fn test_cli_rejects_huge_timings() {
        let max = u64::MAX.to_string();

        let cli = Cli::try_parse_from(["dreadmaze", "--cooldown", max.as_str()])
            .expect("arguments should parse");
        assert!(cli.settings().is_err());

        let cli = Cli::try_parse_from(["dreadmaze", "--time-limit", max.as_str()])
            .expect("arguments should parse");
        assert!(cli.settings().is_err());

        let cli = Cli::try_parse_from(["dreadmaze", "--cooldown", "86400"])
            .expect("arguments should parse");
        assert!(cli.settings().is_ok());
    }

    #[test]
    fn test_cli_rejects_bad_log_level() {
        let result = Cli::try_parse_from(["dreadmaze", "--log-level", "loud"]);

        assert!(result.is_err());
    }

    #[test]
    fn test_cycle_size() {
        let mut settings = Settings::default();

        settings.cycle_size();
        assert_eq!((settings.rows, settings.cols), (31, 31));
        settings.cycle_size();
        assert_eq!((settings.rows, settings.cols), (41, 41));
        settings.cycle_size();
        assert_eq!((settings.rows, settings.cols), (11, 11));

        settings.rows = 9;
        settings.cycle_size();
        assert_eq!((settings.rows, settings.cols), (11, 11));
    }
}
