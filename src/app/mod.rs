pub mod config;
pub mod logging;
mod renderer;

use std::io::{Stdout, Write};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

pub use config::{Cli, Config};
pub use renderer::{Renderer, RendererStatus};

use crate::{
    app::config::{
        DEFAULT_COLS, DEFAULT_DELAY_MS, DEFAULT_ROWS, DEFAULT_STRATEGY, clamp_delay, coerce_side,
        max_side,
    },
    generators::{get_rng, recursive_backtrack},
    maze::{Grid, Mark},
    solvers::{Strategy, solve_maze},
};

/// What to do once a maze has been solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextAction {
    Regenerate,
    ToggleStrategy,
    Quit,
}

impl std::fmt::Display for NextAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextAction::Regenerate => write!(f, "Regenerate"),
            NextAction::ToggleStrategy => write!(f, "Toggle algorithm"),
            NextAction::Quit => write!(f, "Quit"),
        }
    }
}

/// Interactive session: asks for whatever the command line left out, then loops
/// over generate, solve, and the follow-up menu.
#[derive(Debug, Default)]
pub struct App {
    rows: Option<u16>,
    cols: Option<u16>,
    strategy: Option<Strategy>,
    delay_ms: Option<u64>,
    seed: Option<u64>,
}

impl App {
    /// Available solving strategies, in menu order
    const STRATEGIES: [Strategy; 2] = [Strategy::Dfs, Strategy::Bfs];
    const NEXT_ACTIONS: [NextAction; 3] = [
        NextAction::Regenerate,
        NextAction::ToggleStrategy,
        NextAction::Quit,
    ];

    pub fn new(cli: &Cli) -> Self {
        Self {
            rows: cli.rows,
            cols: cli.cols,
            strategy: cli.strategy,
            delay_ms: cli.delay,
            seed: cli.seed,
        }
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        let config = match self.resolve_config(stdout)? {
            Some(config) => config,
            None => return Ok(()),
        };
        tracing::info!("Starting session with {:?}", config);

        let mut grid = Grid::new(config.rows, config.cols).map_err(std::io::Error::other)?;
        let mut rng = get_rng(config.seed);
        let mut strategy = config.strategy;
        let mut renderer = Renderer::new(config.delay);
        let (start, goal) = (config.start(), config.goal());

        loop {
            renderer.resume();
            if !renderer.check_size(&grid)? {
                return Ok(());
            }

            recursive_backtrack(&mut grid, &mut rng, |grid, step| {
                renderer.carve_step(grid, step, start, goal)
            });
            renderer.take_error()?;
            if renderer.status() == RendererStatus::Cancelled {
                tracing::info!("Generation animation cancelled, exiting");
                return Ok(());
            }

            renderer.show_status(
                &format!(
                    "Generated {}x{} maze. Enter: solve with {}, Esc: quit",
                    config.cols, config.rows, strategy
                ),
                Color::Green,
            )?;
            if !App::wait_for_enter()? {
                return Ok(());
            }
            renderer.show_status(
                "Enter: pause/resume  Up/Down: faster/slower  Esc: skip animation",
                Color::Cyan,
            )?;

            let solution = solve_maze(&mut grid, start, goal, strategy, &mut rng, &mut renderer)
                .map_err(std::io::Error::other)?;
            renderer.take_error()?;
            if renderer.status() == RendererStatus::Cancelled {
                tracing::info!("Solve animation cancelled by user");
            }

            // Redraw so a skipped animation still shows the final state
            renderer.draw_frame(&grid, start, goal)?;
            let explored = grid
                .marks()
                .iter()
                .filter(|(_, mark)| matches!(mark, Mark::Visited | Mark::OnPath))
                .count();
            let msg = match solution.path_len() {
                Some(len) => format!(
                    "{}: path of {} cells, {} cells explored",
                    strategy, len, explored
                ),
                None => format!("{}: no path found, {} cells explored", strategy, explored),
            };
            tracing::info!("{}", msg);
            renderer.show_status(&msg, Color::Green)?;

            match App::select_from_menu(
                stdout,
                "Solver finished (use arrow keys and Enter, or Esc to exit):",
                &App::NEXT_ACTIONS,
                0,
            )? {
                Some(NextAction::Regenerate) => {}
                Some(NextAction::ToggleStrategy) => {
                    strategy = strategy.toggled();
                    tracing::info!("Toggled algorithm to {}", strategy);
                }
                Some(NextAction::Quit) | None => break,
            }
        }
        tracing::info!("Exiting session");
        Ok(())
    }

    /// Fill in every parameter not given on the command line by asking the user.
    /// Returns None if the user cancels with Esc.
    fn resolve_config(&self, stdout: &mut Stdout) -> std::io::Result<Option<Config>> {
        let needs_prompt = self.rows.is_none()
            || self.cols.is_none()
            || self.strategy.is_none()
            || self.delay_ms.is_none();
        if needs_prompt {
            stdout.execute(style::PrintStyledContent(
                "MAZE VISUALIZER\r\n"
                    .with(Color::Yellow)
                    .attribute(Attribute::Reverse),
            ))?;
        }

        let (term_width, term_height) = terminal::size().unwrap_or((u16::MAX, u16::MAX));
        let max_cols = max_side(term_width, Renderer::CELL_WIDTH);
        let max_rows = max_side(term_height.saturating_sub(Renderer::RESERVED_ROWS), 1);

        let cols = match self.cols {
            Some(cols) => coerce_side(cols),
            None => match App::ask_side(stdout, "Columns", DEFAULT_COLS, max_cols)? {
                Some(cols) => cols,
                None => return Ok(None),
            },
        };
        let rows = match self.rows {
            Some(rows) => coerce_side(rows),
            None => match App::ask_side(stdout, "Rows", DEFAULT_ROWS, max_rows)? {
                Some(rows) => rows,
                None => return Ok(None),
            },
        };

        let strategy = match self.strategy {
            Some(strategy) => strategy,
            None => {
                let default_index = App::STRATEGIES
                    .iter()
                    .position(|&s| s == DEFAULT_STRATEGY)
                    .unwrap_or(0);
                match App::select_from_menu(
                    stdout,
                    "Select solving algorithm (use arrow keys and Enter, or Esc to exit):",
                    &App::STRATEGIES,
                    default_index,
                )? {
                    Some(strategy) => {
                        stdout.execute(style::PrintStyledContent(
                            format!("Selected solver: {}\r\n", strategy)
                                .with(Color::Green)
                                .attribute(Attribute::Bold),
                        ))?;
                        strategy
                    }
                    None => return Ok(None),
                }
            }
        };

        let delay_ms = match self.delay_ms {
            Some(ms) => clamp_delay(ms),
            None => {
                let validate = |s: &str| {
                    if s.is_empty() {
                        return Ok(DEFAULT_DELAY_MS);
                    }
                    s.parse::<u64>()
                        .map(clamp_delay)
                        .map_err(|_| "Please enter a delay in milliseconds (0..200).".to_string())
                };
                match App::prompt_with_validation(
                    stdout,
                    &format!("Animation delay in ms, smaller is faster (default {DEFAULT_DELAY_MS}): "),
                    validate,
                )? {
                    Some(ms) => ms,
                    None => return Ok(None),
                }
            }
        };

        Ok(Some(Config::new(rows, cols, strategy, delay_ms, self.seed)))
    }

    /// Ask for one side length. Empty input takes `default` (capped to `max`).
    fn ask_side(
        stdout: &mut Stdout,
        name: &str,
        default: u16,
        max: u16,
    ) -> std::io::Result<Option<u16>> {
        let default = coerce_side(default.min(max));
        let validate = |s: &str| {
            if s.is_empty() {
                return Ok(default);
            }
            let error_msg = format!(
                "Please enter a number up to {} (odd, at least {}).",
                max,
                config::MIN_SIDE
            );
            s.parse::<u16>()
                .map_err(|_| error_msg.clone())
                .and_then(|n| match n {
                    1.. if n <= max => Ok(coerce_side(n)),
                    _ => Err(error_msg),
                })
        };
        let prompt = format!("{} (odd, default {}, max {}): ", name, default, max);
        let side = App::prompt_with_validation(stdout, &prompt, validate)?;
        if let Some(side) = side {
            stdout.execute(style::PrintStyledContent(
                format!("{} set to {}\r\n", name, side)
                    .with(Color::Green)
                    .attribute(Attribute::Bold),
            ))?;
        }
        Ok(side)
    }

    /// Block until `code` is pressed.
    pub(crate) fn wait_for_key(code: KeyCode) -> std::io::Result<()> {
        loop {
            if let event::Event::Key(event::KeyEvent {
                code: pressed,
                kind,
                ..
            }) = event::read()?
            {
                if pressed == code && kind == event::KeyEventKind::Press {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Wait for Enter (returns true) or Esc (returns false).
    fn wait_for_enter() -> std::io::Result<bool> {
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Enter => return Ok(true),
                    KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }

    /// Get user input with real-time validation and feedback
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user inputs a valid input and presses Enter, where T is the validated type
    fn prompt_with_validation<F, T>(
        stdout: &mut Stdout,
        prompt: &str,
        validate: F,
    ) -> std::io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        stdout.flush()?;

        let mut input = String::new();

        let value = loop {
            // Re-render prompt line
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            stdout.queue(style::PrintStyledContent(
                prompt.with(Color::Cyan).attribute(Attribute::Bold),
            ))?;

            // Decide color based on validity
            let validation_result = validate(input.trim());
            match validation_result {
                Ok(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Green))?;
                }
                Err(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Red))?;
                }
            }

            queue!(stdout, style::Print(&input), style::ResetColor)?;

            stdout.queue(style::Print(" \r\n"))?;

            // Error message line (if any)
            if let Err(msg) = validation_result {
                stdout.queue(style::PrintStyledContent(
                    msg.with(Color::DarkGrey).attribute(Attribute::Dim),
                ))?;
            }

            stdout.flush()?;

            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Enter => match validate(input.trim()) {
                        Ok(n) => break Some(n),
                        Err(_) => continue,
                    },
                    KeyCode::Char(c) => {
                        if !c.is_whitespace() && !c.is_control() {
                            input.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Esc => {
                        // User cancelled input
                        break None;
                    }
                    _ => {}
                }
            }
        };
        // Cleanup
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(value)
    }

    /// Present a menu of options to the user and let them select one using arrow keys
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user selects an option and presses Enter, where T is the option type
    fn select_from_menu<T: std::fmt::Display + Copy>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
        initial: usize,
    ) -> std::io::Result<Option<T>> {
        if options.is_empty() {
            return Ok(None);
        }

        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;

        let mut selected = initial.min(options.len() - 1);

        let selected_option = loop {
            // Re-render prompt line
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            stdout.queue(style::PrintStyledContent(prompt.with(Color::Yellow)))?;

            for (i, option) in options.iter().enumerate() {
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::Reverse))?;
                }
                stdout.queue(style::Print(format!("\r\n{}. {}", i + 1, option)))?;
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::NoReverse))?;
                }
            }
            stdout.queue(style::Print("\r\n"))?;

            stdout.flush()?;

            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    // Only handle key press events
                    continue;
                }
                match code {
                    KeyCode::Up => {
                        selected = match selected {
                            0 => options.len() - 1,
                            _ => selected - 1,
                        };
                    }
                    KeyCode::Down => {
                        selected = if selected >= options.len() - 1 {
                            0
                        } else {
                            selected + 1
                        };
                    }
                    KeyCode::Enter => {
                        break Some(options[selected]);
                    }
                    KeyCode::Esc => {
                        break None;
                    }
                    _ => {}
                }
            }
        };
        // Cleanup
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(selected_option)
    }
}
