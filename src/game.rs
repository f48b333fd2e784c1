//! Level session module.
//!
//! This module holds the rules of a round through the maze: the round starts once the player
//! touches the entrance, touching a wall or running out of time loses it, and reaching the exit
//! wins it. A lost round is followed by a cooldown, after which the same maze can be tried again.

use std::time::{Duration, Instant};

use log::info;

use crate::maze::{Cell, Direction, Grid, Position};

/// Default time the player has to get through the maze once the round starts.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Default pause after losing before the round can be played again.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(5);

/// Stage of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The maze is shown but the clock is not running until the entrance is touched.
    Waiting,
    /// The clock is running since the given instant.
    Running(Instant),
    /// The exit was reached.
    Won,
    /// A wall was touched or time ran out at the given instant; the round resets once the
    /// cooldown has passed since then.
    Lost(Instant),
}

/// Why a round was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Defeat {
    /// The player touched a wall.
    Wall,
    /// The time limit elapsed.
    Timeout,
}

/// What a single input did to the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The input had no effect.
    Ignored,
    /// The player moved within the maze without ending the round.
    Moved,
    /// The round started.
    Started,
    /// The round was won.
    Won,
    /// The round was lost.
    Lost(Defeat),
}

/// State of one maze level: the grid, the player and the clock.
#[derive(Debug)]
pub struct Session {
    /// Maze being played.
    grid: Grid,
    /// Current stage of the round.
    phase: Phase,
    /// Last cell the player stood on.
    player: Position,
    /// Time available once the round starts.
    time_limit: Duration,
    /// Pause between losing and the round resetting.
    cooldown: Duration,
    /// Reason for the last loss, kept until the round resets.
    defeat: Option<Defeat>,
}

impl Session {
    /// Starts a session on the given maze, waiting for the player to touch the entrance.
    #[must_use]
    pub const fn new(grid: Grid, time_limit: Duration, cooldown: Duration) -> Self {
        Self {
            grid,
            phase: Phase::Waiting,
            player: Grid::ENTRANCE,
            time_limit,
            cooldown,
            defeat: None,
        }
    }

    /// Returns the maze being played.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Returns the current stage of the round.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the cell the player last stood on.
    #[must_use]
    pub const fn player(&self) -> Position {
        self.player
    }

    /// Returns why the current round was lost, if it was.
    #[must_use]
    pub const fn defeat(&self) -> Option<Defeat> {
        self.defeat
    }

    /// Returns the time left in the round.
    ///
    /// A round that has not started yet has the full limit left; a won round keeps nothing
    /// meaningful and reports zero, as does a lost one.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Waiting => self.time_limit,
            Phase::Running(started) => self
                .time_limit
                .saturating_sub(now.saturating_duration_since(started)),
            Phase::Won | Phase::Lost(_) => Duration::ZERO,
        }
    }

    /// Returns the time left before a lost round resets, or zero in any other phase.
    #[must_use]
    pub fn cooldown_remaining(&self, now: Instant) -> Duration {
        match self.phase {
            Phase::Lost(lost_at) => self
                .cooldown
                .saturating_sub(now.saturating_duration_since(lost_at)),
            Phase::Waiting | Phase::Running(_) | Phase::Won => Duration::ZERO,
        }
    }

    /// Applies the player touching `pos`, which is how pointer movement drives the round.
    ///
    /// Touching the entrance zone starts a waiting round. Once running, open cells move the
    /// player, the exit wins and walls lose. Before the round starts only the entrance zone
    /// matters. Positions outside the grid and any touch after the round ended are ignored.
    pub fn visit(&mut self, pos: Position, now: Instant) -> Outcome {
        let Some(cell) = self.grid.cell(pos) else {
            return Outcome::Ignored;
        };

        match self.phase {
            Phase::Won | Phase::Lost(_) => Outcome::Ignored,
            Phase::Waiting if Grid::is_entrance_zone(pos) => {
                self.player = pos;
                self.phase = Phase::Running(now);
                info!("round started");
                Outcome::Started
            }
            Phase::Waiting => Outcome::Ignored,
            Phase::Running(_) if Grid::is_entrance_zone(pos) => {
                self.player = pos;
                Outcome::Moved
            }
            Phase::Running(_) => {
                if self.grid.is_exit(pos) {
                    self.player = pos;
                    self.phase = Phase::Won;
                    info!("exit reached");
                    return Outcome::Won;
                }

                match cell {
                    Cell::Open => {
                        self.player = pos;
                        Outcome::Moved
                    }
                    Cell::Wall => {
                        self.player = pos;
                        self.lose(Defeat::Wall, now);
                        Outcome::Lost(Defeat::Wall)
                    }
                }
            }
        }
    }

    /// Moves the player one cell in `direction`, which is how keyboard input drives the round.
    ///
    /// Steps off the grid are blocked. While waiting, steps into walls are blocked too, so the
    /// player can walk into the entrance zone without losing a round that has not started.
    pub fn step(&mut self, direction: Direction, now: Instant) -> Outcome {
        let Some(target) = self.player.neighbour(direction) else {
            return Outcome::Ignored;
        };

        match (self.phase, self.grid.cell(target)) {
            (_, None) | (Phase::Waiting, Some(Cell::Wall)) => Outcome::Ignored,
            (Phase::Waiting, Some(Cell::Open)) if !Grid::is_entrance_zone(target) => {
                self.player = target;
                Outcome::Moved
            }
            _ => self.visit(target, now),
        }
    }

    /// Advances the clock: a running round past its limit is lost, and a lost round past its
    /// cooldown resets to waiting on the same maze.
    pub fn tick(&mut self, now: Instant) -> Outcome {
        match self.phase {
            Phase::Running(started)
                if now.saturating_duration_since(started) >= self.time_limit =>
            {
                self.lose(Defeat::Timeout, now);
                Outcome::Lost(Defeat::Timeout)
            }
            Phase::Lost(lost_at) if now.saturating_duration_since(lost_at) >= self.cooldown => {
                self.reset();
                info!("cooldown over, round reset");
                Outcome::Ignored
            }
            Phase::Waiting | Phase::Running(_) | Phase::Won | Phase::Lost(_) => Outcome::Ignored,
        }
    }

    /// Abandons the current round, stopping its clock, and waits for the entrance again.
    pub fn abandon(&mut self) {
        if matches!(self.phase, Phase::Running(_)) {
            info!("round abandoned");
        }
        self.reset();
    }

    /// Swaps in a new maze and resets the round.
    pub fn regenerate(&mut self, grid: Grid) {
        self.grid = grid;
        self.reset();
    }

    /// Ends the round as lost and starts the cooldown.
    fn lose(&mut self, defeat: Defeat, now: Instant) {
        self.phase = Phase::Lost(now);
        self.defeat = Some(defeat);
        info!("round lost: {defeat:?}");
    }

    /// Puts the round back in its initial state.
    fn reset(&mut self) {
        self.phase = Phase::Waiting;
        self.player = Grid::ENTRANCE;
        self.defeat = None;
    }
}
