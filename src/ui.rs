//! User interface rendering functions for all application screens.

use std::{
    rc::Rc,
    time::{Duration, Instant},
};

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    config::Settings,
    game::{Defeat, Phase, Session},
    geometry,
    maze::{Cell, Grid, Position},
    types::{MainMenuItem, MenuType, OptionsMenuItem, Screen},
    App,
};

/// Text shown above the maze.
const TAGLINE: &str = "Enter through the green... and hope you aren't seen";

/// Remaining time under which the clock turns red.
const HURRY_THRESHOLD: Duration = Duration::from_secs(10);

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::OptionsMenu(item) => options_menu(frame, item, &app.settings),
        Screen::InGame => in_game(app, frame, Instant::now())?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and options menus.
///
/// This function creates the common layout and block structure used by both main and options menus.
/// The generic part includes the centered positioning and border styling, while the specific menu
/// content is handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    let space = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Percentage(20),
        Constraint::Percentage(40),
    ])
    .split(frame.area())[1];
    let space = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let layout = Layout::vertical([Constraint::Max(u16::from(menu.value() + 2))])
        .flex(Flex::Center)
        .split(space)[0];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders a list of menu entries, highlighting the one at `selected`.
fn menu_entries(frame: &mut Frame, slots: &[Rect], entries: &[String], selected: usize) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (idx, (slot, entry)) in slots.iter().zip(entries).enumerate() {
        let style = if idx == selected {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::styled(entry.as_str(), style).centered(), *slot);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game", "Options", and "Quit". It
/// highlights the currently selected option and provides visual feedback for user navigation.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));
    let entries = ["Start Game", "Options", "Quit"].map(str::to_owned);
    let selected = match item {
        MainMenuItem::StartGame => 0,
        MainMenuItem::Options => 1,
        MainMenuItem::Quit => 2,
    };

    menu_entries(frame, &inner_layout, &entries, selected);
}

/// Renders the options menu screen with the maze size and a way back.
pub(crate) fn options_menu(frame: &mut Frame, item: OptionsMenuItem, settings: &Settings) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::OptionsMenu(2));
    let entries = [
        format!("Size: {}x{}", settings.rows, settings.cols),
        "Return".to_owned(),
    ];
    let selected = match item {
        OptionsMenuItem::Size => 0,
        OptionsMenuItem::Back => 1,
    };

    menu_entries(frame, &inner_layout, &entries, selected);
}

/// Renders the in-game screen with the maze, the clock and the end-of-round overlays.
///
/// The maze is centred in the space left between the tagline and the tooltip. The area it ends up
/// in is stored in the [`App`] so pointer events can be mapped back to grid cells. If the terminal
/// is too small for the maze, a notice is shown instead and pointer events are ignored.
///
/// # Errors
///
/// This function may return errors from layout retrieval or coordinate conversion operations.
pub(crate) fn in_game(app: &mut App, frame: &mut Frame, now: Instant) -> Result<()> {
    clear(frame);

    let overall_layout = Layout::vertical([
        Constraint::Length(2), // Tagline
        Constraint::Min(1),    // Maze area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());

    let tagline_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get tagline area from layout")?;
    let maze_content_area = *overall_layout
        .get(1)
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    frame.render_widget(
        Line::styled(TAGLINE, Style::default().fg(Color::Red)).centered(),
        tagline_area,
    );

    let grid = app.session.grid();
    let (width, height) = geometry::maze_extent(grid)?;

    if width > maze_content_area.width || height > maze_content_area.height {
        app.maze_area = None;
        let notice = Paragraph::new(format!(
            "The terminal is too small for a {}x{} maze; enlarge it or pick a smaller size.",
            grid.rows(),
            grid.cols()
        ))
        .centered()
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
        frame.render_widget(notice, maze_content_area);
    } else {
        let maze_area = geometry::centered_rect(maze_content_area, width, height);
        frame.render_widget(Paragraph::new(maze_lines(&app.session, &app.solution)), maze_area);
        app.maze_area = Some(maze_area);
    }

    let tooltip_block = Block::bordered()
        .title("(hjkl/arrows/mouse) move / (n) new maze / (esc) menu / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status_area = tooltip_block.inner(tooltip_area);
    frame.render_widget(tooltip_block, tooltip_area);
    frame.render_widget(status_line(&app.session, now).centered(), status_area);

    overlay(frame, maze_content_area, &app.session, now);

    Ok(())
}

/// Builds one line of coloured blocks per maze row.
fn maze_lines(session: &Session, solution: &[Position]) -> Vec<Line<'static>> {
    let grid = session.grid();
    let block = " ".repeat(geometry::CELL_WIDTH.into());

    grid.iter_rows()
        .enumerate()
        .map(|(row, cells)| {
            Line::from(
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        let color = cell_color(session, solution, Position::new(row, col), *cell);
                        Span::styled(block.clone(), Style::default().bg(color))
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

/// Picks the colour a cell is painted with.
fn cell_color(session: &Session, solution: &[Position], pos: Position, cell: Cell) -> Color {
    let grid = session.grid();

    if pos == session.player() && !matches!(session.phase(), Phase::Waiting) {
        Color::Red
    } else if pos == Grid::ENTRANCE {
        Color::Green
    } else if grid.is_exit(pos) {
        Color::Magenta
    } else if solution.contains(&pos) {
        Color::Yellow
    } else {
        match cell {
            Cell::Wall => Color::Blue,
            Cell::Open => Color::Gray,
        }
    }
}

/// Builds the status text shown under the maze.
fn status_line(session: &Session, now: Instant) -> Line<'static> {
    let remaining = session.remaining(now);
    let clock_style = if remaining < HURRY_THRESHOLD {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };

    let message = match session.phase() {
        Phase::Waiting => "Touch the green zone to start".to_owned(),
        Phase::Running(_) => "Find the exit".to_owned(),
        Phase::Won => "Level complete!".to_owned(),
        Phase::Lost(_) => format!(
            "Caught! Cooldown: {}s",
            whole_seconds(session.cooldown_remaining(now))
        ),
    };

    Line::from(vec![
        Span::styled(format!("Time: {}s", whole_seconds(remaining)), clock_style),
        Span::raw("  |  "),
        Span::styled(message, Style::default().fg(Color::Green)),
    ])
}

/// Draws the banner shown over the maze once a round has ended.
fn overlay(frame: &mut Frame, area: Rect, session: &Session, now: Instant) {
    let (title, body, color) = match session.phase() {
        Phase::Waiting | Phase::Running(_) => return,
        Phase::Won => (
            "Level Complete!",
            "(n) new maze / (esc) menu".to_owned(),
            Color::Green,
        ),
        Phase::Lost(_) => (
            match session.defeat() {
                Some(Defeat::Timeout) => "Out of time",
                Some(Defeat::Wall) | None => "You were seen",
            },
            format!(
                "Cooldown: {}s",
                whole_seconds(session.cooldown_remaining(now))
            ),
            Color::Red,
        ),
    };

    let popup = geometry::centered_rect(area, 36, 4);
    let block = Block::bordered()
        .title(title)
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Double)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    let text = Paragraph::new(body).centered().block(block);

    frame.render_widget(Clear, popup);
    frame.render_widget(text, popup);
}

/// Rounds a duration up to whole seconds, so the clock only reads zero once time is up.
fn whole_seconds(duration: Duration) -> u128 {
    duration.as_millis().div_ceil(1000)
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    use super::*;

    /// Creates a small seeded test app.
    fn create_test_app() -> App {
        let settings = Settings {
            rows: 11,
            cols: 11,
            seed: Some(2),
            ..Settings::default()
        };
        App::new(settings).expect("test settings are valid")
    }

    /// Creates a test terminal with known dimensions for UI testing.
    fn create_test_terminal() -> Terminal<TestBackend> {
        let backend = TestBackend::new(80, 24);
        Terminal::new(backend).expect("failed to create test terminal")
    }

    /// Joins the symbols of a buffer into one string per row.
    fn buffer_text(buffer: &Buffer) -> String {
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_main_menu() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();

        let frame = terminal
            .draw(|frame| draw(&mut app, frame).expect("drawing should succeed in test"))
            .expect("drawing main menu should succeed");

        let text = buffer_text(frame.buffer);
        assert!(text.contains("Main Menu"));
        assert!(text.contains("Start Game"));
        assert!(text.contains("Quit"));
    }

    #[test]
    fn test_draw_options_menu_shows_size() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::OptionsMenu(OptionsMenuItem::Size);

        let frame = terminal
            .draw(|frame| draw(&mut app, frame).expect("drawing should succeed in test"))
            .expect("drawing options menu should succeed");

        let text = buffer_text(frame.buffer);
        assert!(text.contains("Size: 11x11"));
        assert!(text.contains("Return"));
    }

    #[test]
    fn test_draw_in_game_sets_maze_area() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;

        let frame = terminal
            .draw(|frame| draw(&mut app, frame).expect("drawing should succeed in test"))
            .expect("drawing in-game screen should succeed");

        let area = app.maze_area.expect("an 11x11 maze fits in 80x24");
        assert_eq!((area.width, area.height), (22, 11));
        let text = buffer_text(frame.buffer);
        assert!(text.contains(TAGLINE));
        assert!(text.contains("Touch the green zone to start"));
        assert!(text.contains("Time: 30s"));
    }

    #[test]
    fn test_entrance_drawn_green() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        app.screen = Screen::InGame;

        let frame = terminal
            .draw(|frame| draw(&mut app, frame).expect("drawing should succeed in test"))
            .expect("drawing in-game screen should succeed");

        let area = app.maze_area.expect("an 11x11 maze fits in 80x24");
        let entrance = frame
            .buffer
            .cell((area.x + geometry::CELL_WIDTH, area.y))
            .expect("entrance lies inside the buffer");
        assert_eq!(entrance.bg, Color::Green);
        let corner = frame
            .buffer
            .cell((area.x, area.y))
            .expect("corner lies inside the buffer");
        assert_eq!(corner.bg, Color::Blue);
    }

    #[test]
    fn test_in_game_too_small_terminal() {
        let mut app = create_test_app();
        let mut terminal =
            Terminal::new(TestBackend::new(20, 10)).expect("failed to create test terminal");
        app.screen = Screen::InGame;
        app.maze_area = Some(Rect::new(0, 0, 1, 1));

        let frame = terminal
            .draw(|frame| draw(&mut app, frame).expect("drawing should succeed in test"))
            .expect("drawing in-game screen should succeed");

        assert!(app.maze_area.is_none());
        assert!(buffer_text(frame.buffer).contains("too"));
    }

    #[test]
    fn test_lost_overlay() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        let now = Instant::now();
        app.screen = Screen::InGame;
        let _ = app.session.visit(Grid::ENTRANCE, now);
        let _ = app.session.visit(Position::new(0, 0), now);

        let frame = terminal
            .draw(|frame| in_game(&mut app, frame, now).expect("drawing should succeed in test"))
            .expect("drawing in-game screen should succeed");

        let text = buffer_text(frame.buffer);
        assert!(text.contains("You were seen"));
        assert!(text.contains("Cooldown: 5s"));
    }

    #[test]
    fn test_won_overlay() {
        let mut app = create_test_app();
        let mut terminal = create_test_terminal();
        let now = Instant::now();
        app.screen = Screen::InGame;
        let exit = app.session.grid().exit();
        let started = app.session.visit(Grid::ENTRANCE, now);
        app.record(started);
        let won = app.session.visit(exit, now);
        app.record(won);

        let frame = terminal
            .draw(|frame| in_game(&mut app, frame, now).expect("drawing should succeed in test"))
            .expect("drawing in-game screen should succeed");

        assert!(buffer_text(frame.buffer).contains("Level Complete!"));
    }

    #[test]
    fn test_whole_seconds_rounds_up() {
        assert_eq!(whole_seconds(Duration::ZERO), 0);
        assert_eq!(whole_seconds(Duration::from_millis(1)), 1);
        assert_eq!(whole_seconds(Duration::from_millis(9_001)), 10);
        assert_eq!(whole_seconds(Duration::from_secs(30)), 30);
    }

    #[test]
    fn test_init_menu_main_menu() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, MenuType::MainMenu(3));
            assert_eq!(layout.len(), 3, "main menu should have 3 items");
        });

        assert!(result.is_ok(), "initializing main menu should succeed");
    }

    #[test]
    fn test_init_menu_options_menu() {
        let mut terminal = create_test_terminal();

        let result = terminal.draw(|frame| {
            let layout = init_menu(frame, MenuType::OptionsMenu(2));
            assert_eq!(layout.len(), 2, "options menu should have 2 items");
        });

        assert!(result.is_ok(), "initializing options menu should succeed");
    }
}
