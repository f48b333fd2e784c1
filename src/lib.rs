//! A terminal maze level: enter through the green, reach the exit before time runs out.
//!
//! The library is split between the maze core and the terminal front-end that plays it. The core
//! is [`maze`], which generates perfect mazes with a randomized backtracker, and [`solver`], which
//! walks them. The [`game`] module holds the rules of a round, and the remaining private modules
//! render the screens and route input to those rules.

pub mod config;
pub mod game;
pub mod logging;
pub mod maze;
pub mod solver;

mod app;
mod events;
mod geometry;
mod types;
mod ui;

pub use app::{print_maze, App};
