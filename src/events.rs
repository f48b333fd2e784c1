//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind,
};

use crate::{
    geometry,
    maze::Direction,
    types::{MainMenuItem, OptionsMenuItem, Screen},
    App,
};

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard and mouse events and dispatches them to the appropriate
/// handler functions. It uses a timeout to avoid blocking the UI, and advances the round clock
/// after every poll so time runs out even while the player keeps still.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(Duration::from_millis(100))? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key)?,
            Event::Mouse(mouse) => handle_mouse(app, mouse),
            _ => {}
        }
    }

    if matches!(app.screen, Screen::InGame) {
        app.tick(Instant::now());
    }

    Ok(())
}

/// Dispatches a key press depending on the current screen.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) -> Result<()> {
    if matches!(app.screen, Screen::InGame) {
        return handle_game_key(app, key.code);
    }

    match key.code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char('j') | KeyCode::Down => handle_j_events(app),
        KeyCode::Char('k') | KeyCode::Up => handle_k_events(app),
        KeyCode::Char('l') | KeyCode::Enter => handle_l_events(app)?,
        KeyCode::Char('h') | KeyCode::Esc => handle_h_events(app),
        _ => {}
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation in menus.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(item) => app.switch(Screen::MainMenu(item.next())),
        Screen::OptionsMenu(item) => app.switch(Screen::OptionsMenu(item.next())),
        Screen::InGame => {}
    }
}

/// Handles 'k' key press events for upward navigation in menus.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(item) => app.switch(Screen::MainMenu(item.previous())),
        Screen::OptionsMenu(item) => app.switch(Screen::OptionsMenu(item.previous())),
        Screen::InGame => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items and moving
/// forward in the application flow. Selecting the size option cycles through the size presets and
/// draws a new maze of the chosen size right away.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => {
            app.switch(Screen::InGame);
        }
        Screen::MainMenu(MainMenuItem::Options) => {
            app.switch(Screen::OptionsMenu(OptionsMenuItem::Size));
        }
        Screen::MainMenu(MainMenuItem::Quit) => {
            app.exit = true;
        }
        Screen::OptionsMenu(OptionsMenuItem::Size) => {
            app.settings.cycle_size();
            app.new_maze()?;
        }
        Screen::OptionsMenu(OptionsMenuItem::Back) => {
            app.switch(Screen::MainMenu(MainMenuItem::Options));
        }
        Screen::InGame => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
pub(crate) fn handle_h_events(app: &mut App) {
    if matches!(app.screen, Screen::OptionsMenu(_)) {
        app.switch(Screen::MainMenu(MainMenuItem::Options));
    }
}

/// Handles key presses on the in-game screen.
///
/// Vim keys and arrows walk the player through the maze, 'n' draws a new maze, escape abandons the
/// round and returns to the main menu, and 'q' quits.
pub(crate) fn handle_game_key(app: &mut App, code: KeyCode) -> Result<()> {
    let direction = match code {
        KeyCode::Char('h') | KeyCode::Left => Direction::Left,
        KeyCode::Char('j') | KeyCode::Down => Direction::Down,
        KeyCode::Char('k') | KeyCode::Up => Direction::Up,
        KeyCode::Char('l') | KeyCode::Right => Direction::Right,
        KeyCode::Char('n') => return app.new_maze(),
        KeyCode::Char('q') => {
            app.exit = true;
            return Ok(());
        }
        KeyCode::Esc => {
            app.session.abandon();
            app.solution.clear();
            app.switch(Screen::MainMenu(MainMenuItem::StartGame));
            return Ok(());
        }
        _ => return Ok(()),
    };

    let outcome = app.session.step(direction, Instant::now());
    app.record(outcome);

    Ok(())
}

/// Handles pointer movement over the in-game screen.
///
/// The pointer position is translated to the maze cell under it using the area the maze was last
/// drawn in, and the player touches that cell.
pub(crate) fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if !matches!(app.screen, Screen::InGame)
        || !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_))
    {
        return;
    }

    let Some(pos) = app
        .maze_area
        .and_then(|area| geometry::pointer_to_cell(area, mouse.column, mouse.row))
    else {
        return;
    };

    let outcome = app.session.visit(pos, Instant::now());
    app.record(outcome);
}
