//! Core application state and logic for the maze game.

use std::{
    io::{self, Write},
    time::Instant,
};

use color_eyre::eyre::{OptionExt as _, Result};
use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng as _};
use ratatui::{
    crossterm::{
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
    },
    layout::Rect,
    DefaultTerminal,
};

use crate::{
    config::Settings,
    events,
    game::{Outcome, Session},
    maze::{self, Grid, Position},
    solver,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the maze game.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    pub(crate) screen: Screen,
    /// Maze dimensions and round timings in effect.
    pub(crate) settings: Settings,
    /// Random source every maze of this run is drawn from.
    pub(crate) rng: StdRng,
    /// Round being played on the current maze.
    pub(crate) session: Session,
    /// Area the maze was drawn in during the last redraw.
    ///
    /// This field is `None` until the in-game screen has been drawn, or when the terminal was too
    /// small to draw the maze. Pointer events are mapped to grid cells through it.
    pub(crate) maze_area: Option<Rect>,
    /// Shortest route from the entrance to the exit, revealed once the round is won.
    pub(crate) solution: Vec<Position>,
}

impl App {
    /// Creates the application and generates the first maze.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configured maze dimensions are invalid.
    pub fn new(settings: Settings) -> Result<Self> {
        let seed = resolve_seed(settings.seed);
        info!("maze seed: {seed}");

        let mut rng = StdRng::seed_from_u64(seed);
        let grid = maze::generate(settings.rows, settings.cols, &mut rng)?;
        let session = Session::new(grid, settings.time_limit, settings.cooldown);

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            settings,
            rng,
            session,
            maze_area: None,
            solution: Vec::new(),
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function captures the mouse, then handles user input and updates the application state
    /// until the exit condition is `true`. Mouse capture is released before returning, whether the
    /// loop ended normally or not.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        execute!(io::stdout(), EnableMouseCapture)?;
        let result = self.run_loop(terminal);
        execute!(io::stdout(), DisableMouseCapture)?;

        result
    }

    /// Draws and processes events until the exit flag is raised.
    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(|err| io::Error::new(io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Moves to another screen.
    pub(crate) fn switch(&mut self, screen: Screen) {
        debug!("screen {:?} -> {screen:?}", self.screen);
        self.screen = screen;
    }

    /// Replaces the maze with a freshly generated one using the current settings.
    ///
    /// # Errors
    ///
    /// This function returns an error if the configured maze dimensions are invalid.
    pub(crate) fn new_maze(&mut self) -> Result<()> {
        let grid = maze::generate(self.settings.rows, self.settings.cols, &mut self.rng)?;
        self.session.regenerate(grid);
        self.solution.clear();

        Ok(())
    }

    /// Reacts to what an input or clock tick did to the round.
    pub(crate) fn record(&mut self, outcome: Outcome) {
        if outcome == Outcome::Won {
            let grid = self.session.grid();
            self.solution =
                solver::shortest_path(grid, Grid::ENTRANCE, grid.exit()).unwrap_or_default();
        }
    }

    /// Advances the round clock.
    pub(crate) fn tick(&mut self, now: Instant) {
        let outcome = self.session.tick(now);
        self.record(outcome);
    }
}

/// Generates one maze from the settings and writes it to `out`, followed by a summary line.
///
/// The summary names the dimensions, the seed the maze was drawn with, so it can be reproduced
/// with `--seed`, and the number of steps on the shortest route from the entrance to the exit.
///
/// # Errors
///
/// This function returns an error if the maze dimensions are invalid or writing fails.
pub fn print_maze<W: Write>(settings: &Settings, out: &mut W) -> Result<()> {
    let seed = resolve_seed(settings.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let grid = maze::generate(settings.rows, settings.cols, &mut rng)?;

    let path = solver::shortest_path(&grid, Grid::ENTRANCE, grid.exit())
        .ok_or_eyre("generated maze has no route from the entrance to the exit")?;

    writeln!(out, "{grid}")?;
    writeln!(
        out,
        "{}x{} maze, seed {seed}, {} steps from entrance to exit",
        grid.rows(),
        grid.cols(),
        path.len().saturating_sub(1)
    )?;

    Ok(())
}

/// Returns the configured seed, or draws one from the system so the run can still be reproduced
/// from the logs.
fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds settings for a small seeded maze.
    fn create_test_settings() -> Settings {
        Settings {
            rows: 11,
            cols: 11,
            seed: Some(3),
            ..Settings::default()
        }
    }

    #[test]
    fn test_new_app_starts_in_main_menu() {
        let app = App::new(create_test_settings()).expect("settings are valid");

        assert!(!app.exit);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
        assert_eq!(app.session.grid().rows(), 11);
        assert!(app.maze_area.is_none());
        assert!(app.solution.is_empty());
    }

    #[test]
    fn test_new_app_rejects_small_maze() {
        let settings = Settings {
            rows: 3,
            ..create_test_settings()
        };

        assert!(App::new(settings).is_err());
    }

    #[test]
    fn test_same_seed_same_first_maze() {
        let first = App::new(create_test_settings()).expect("settings are valid");
        let second = App::new(create_test_settings()).expect("settings are valid");

        assert_eq!(first.session.grid(), second.session.grid());
    }

    #[test]
    fn test_new_maze_uses_current_settings() {
        let mut app = App::new(create_test_settings()).expect("settings are valid");
        app.settings.rows = 15;
        app.settings.cols = 9;

        app.new_maze().expect("new size is valid");

        assert_eq!(app.session.grid().rows(), 15);
        assert_eq!(app.session.grid().cols(), 9);
    }

    #[test]
    fn test_win_reveals_solution() {
        let mut app = App::new(create_test_settings()).expect("settings are valid");
        let now = Instant::now();
        let exit = app.session.grid().exit();

        let started = app.session.visit(Grid::ENTRANCE, now);
        app.record(started);
        assert!(app.solution.is_empty());

        let won = app.session.visit(exit, now);
        app.record(won);
        assert_eq!(app.solution.first(), Some(&Grid::ENTRANCE));
        assert_eq!(app.solution.last(), Some(&exit));

        app.new_maze().expect("size is valid");
        assert!(app.solution.is_empty());
    }

    #[test]
    fn test_print_maze() {
        let mut out = Vec::new();

        print_maze(&create_test_settings(), &mut out).expect("printing to memory succeeds");

        let text = String::from_utf8(out).expect("maze text is valid UTF-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines.first().copied(), Some("# #########"));
        assert!(lines
            .last()
            .expect("summary line is present")
            .starts_with("11x11 maze, seed 3, "));
    }

    #[test]
    fn test_print_maze_is_reproducible() {
        let mut first = Vec::new();
        let mut second = Vec::new();

        print_maze(&create_test_settings(), &mut first).expect("printing to memory succeeds");
        print_maze(&create_test_settings(), &mut second).expect("printing to memory succeeds");

        assert_eq!(first, second);
    }
}
