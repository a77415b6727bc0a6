use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    app::config::MAX_DELAY_MS,
    generators::CarveStep,
    maze::{Coord, Grid, Mark, Tile},
    solvers::{Observer, Snapshot},
};

const WALL: Color = Color::Rgb { r: 20, g: 28, b: 36 };
const EMPTY: Color = Color::Rgb { r: 240, g: 245, b: 250 };
const VISITED: Color = Color::Rgb { r: 16, g: 185, b: 129 };
const FRONTIER: Color = Color::Rgb { r: 96, g: 165, b: 250 };
const ON_PATH: Color = Color::Rgb { r: 244, g: 63, b: 94 };
const ENDPOINT: Color = Color::Rgb { r: 251, g: 191, b: 36 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererStatus {
    /// Frames are being drawn
    Running,
    /// The user pressed Esc; later frames are skipped
    Cancelled,
}

/// Paints grid snapshots to the terminal and paces the animation.
pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
    /// Time to wait after each solver snapshot
    delay: Duration,
    status: RendererStatus,
    /// First I/O error hit while observing, reported once the run is over
    error: Option<std::io::Error>,
    /// Terminal row right below the grid
    status_row: u16,
}

impl Renderer {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
    /// Rows kept free below the grid for the status line and menus.
    pub const RESERVED_ROWS: u16 = 6;
    const CELL: &'static str = "  ";

    pub fn new(delay: Duration) -> Self {
        Self {
            stdout: std::io::stdout(),
            delay,
            status: RendererStatus::Running,
            error: None,
            status_row: 0,
        }
    }

    pub fn status(&self) -> RendererStatus {
        self.status
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Re-enable drawing for a new round after a cancel.
    pub fn resume(&mut self) {
        self.status = RendererStatus::Running;
    }

    /// Returns the first error stored while observing, if any.
    pub fn take_error(&mut self) -> std::io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn paint(grid: &Grid, coord: Coord, start: Coord, goal: Coord) -> StyledContent<&'static str> {
        let color = if coord == start || coord == goal {
            ENDPOINT
        } else if grid.tile(coord) == Tile::Wall {
            WALL
        } else {
            match grid.mark(coord) {
                Mark::Unvisited => EMPTY,
                Mark::Frontier => FRONTIER,
                Mark::Visited => VISITED,
                Mark::OnPath => ON_PATH,
            }
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                Self::CELL.width(),
                Self::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        Self::CELL.on(color)
    }

    /// Terminal columns and rows needed for the grid plus the status line and menu below it.
    pub fn needed_size(grid: &Grid) -> (u16, u16) {
        (
            grid.cols() * Self::CELL_WIDTH,
            grid.rows() + Self::RESERVED_ROWS,
        )
    }

    /// Check if terminal size is sufficient for the given grid.
    /// If not, display a message and wait for user to press Esc, then return Ok(false)
    pub fn check_size(&mut self, grid: &Grid) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let (needed_width, needed_height) = Self::needed_size(grid);
        if term_width >= needed_width && term_height >= needed_height {
            return Ok(true);
        }
        tracing::warn!(
            "Terminal {}x{} too small for a {}x{} grid",
            term_width,
            term_height,
            grid.cols(),
            grid.rows()
        );
        let msg = format!(
            "Terminal size is too small ({}x{}) for the grid ({}x{} needed). Please restart with a smaller maze.\r\n",
            term_width, term_height, needed_width, needed_height
        );
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        self.stdout.flush()?;
        super::App::wait_for_key(KeyCode::Esc)?;
        self.status = RendererStatus::Cancelled;
        Ok(false)
    }

    /// Clear the screen and draw every cell.
    pub fn draw_frame(&mut self, grid: &Grid, start: Coord, goal: Coord) -> std::io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let coord = Coord::new(row, col);
                self.stdout
                    .queue(style::PrintStyledContent(Self::paint(grid, coord, start, goal)))?;
            }
            self.stdout.queue(style::Print("\r\n"))?;
        }
        self.status_row = grid.rows();
        self.stdout.flush()
    }

    fn queue_cell(
        &mut self,
        grid: &Grid,
        coord: Coord,
        start: Coord,
        goal: Coord,
    ) -> std::io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(coord.col * Self::CELL_WIDTH, coord.row),
            style::PrintStyledContent(Self::paint(grid, coord, start, goal))
        )
    }

    /// Print a line under the grid, cut to the terminal width.
    /// Leaves the cursor at the start of the following line.
    pub fn show_status(&mut self, text: &str, color: Color) -> std::io::Result<()> {
        let width = terminal::size().map(|(w, _)| w).unwrap_or(u16::MAX);
        let (line, _) = text.unicode_truncate(width as usize);
        queue!(
            self.stdout,
            cursor::MoveTo(0, self.status_row),
            terminal::Clear(ClearType::FromCursorDown),
            style::PrintStyledContent(line.with(color).attribute(Attribute::Bold)),
            style::Print("\r\n")
        )?;
        self.stdout.flush()
    }

    /// Feed one generator step to the screen.
    pub fn carve_step(&mut self, grid: &Grid, step: CarveStep, start: Coord, goal: Coord) {
        if self.status == RendererStatus::Cancelled || self.error.is_some() {
            return;
        }
        let result = match step {
            CarveStep::RoomsLaid => self.draw_frame(grid, start, goal),
            CarveStep::WallOpened(wall) => {
                self.paint_cells(grid, &[wall], start, goal, self.delay / 4)
            }
        };
        if let Err(e) = result {
            self.error = Some(e);
        }
    }

    /// Repaint `cells`, then wait for `delay`.
    fn paint_cells(
        &mut self,
        grid: &Grid,
        cells: &[Coord],
        start: Coord,
        goal: Coord,
        delay: Duration,
    ) -> std::io::Result<()> {
        for &coord in cells {
            self.queue_cell(grid, coord, start, goal)?;
        }
        self.stdout.flush()?;
        self.pace(delay)
    }

    /// Wait out `delay` while reacting to key presses.
    /// Enter pauses, Up/Down change speed, Esc cancels the rest of the animation.
    fn pace(&mut self, delay: Duration) -> std::io::Result<()> {
        let deadline = Instant::now() + delay;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(());
            }
            let event::Event::Key(key_event) = event::read()? else {
                continue;
            };
            if key_event.kind != event::KeyEventKind::Press {
                continue;
            }
            match key_event.code {
                KeyCode::Esc => {
                    tracing::debug!("[render] Esc key pressed, cancelling animation");
                    self.status = RendererStatus::Cancelled;
                    return Ok(());
                }
                KeyCode::Enter => {
                    tracing::debug!("[render] Paused");
                    if !self.wait_while_paused()? {
                        return Ok(());
                    }
                }
                KeyCode::Up => self.speed_up(),
                KeyCode::Down => self.slow_down(),
                _ => {}
            }
        }
    }

    /// Block until Enter (resume, returns true) or Esc (cancel, returns false).
    fn wait_while_paused(&mut self) -> std::io::Result<bool> {
        self.show_status("Paused. Enter: resume, Esc: stop animation", Color::Yellow)?;
        loop {
            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Enter => {
                        self.show_status("", Color::Reset)?;
                        tracing::debug!("[render] Resumed");
                        return Ok(true);
                    }
                    KeyCode::Esc => {
                        self.status = RendererStatus::Cancelled;
                        return Ok(false);
                    }
                    KeyCode::Up => self.speed_up(),
                    KeyCode::Down => self.slow_down(),
                    _ => {}
                }
            }
        }
    }

    fn speed_up(&mut self) {
        self.delay /= 2;
        tracing::debug!("[render] Delay now {:?}", self.delay);
    }

    fn slow_down(&mut self) {
        let max = Duration::from_millis(MAX_DELAY_MS);
        self.delay = (self.delay * 2).max(Duration::from_millis(1)).min(max);
        tracing::debug!("[render] Delay now {:?}", self.delay);
    }
}

impl Observer for Renderer {
    fn observe(&mut self, snapshot: &Snapshot<'_>) {
        // The solver keeps going after a cancel; only drawing stops
        if self.status == RendererStatus::Cancelled || self.error.is_some() {
            return;
        }
        let delay = self.delay;
        if let Err(e) = self.paint_cells(
            snapshot.grid,
            snapshot.changed,
            snapshot.start,
            snapshot.goal,
            delay,
        ) {
            self.error = Some(e);
        }
    }
}
