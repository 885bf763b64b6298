use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use glyphrain::{DrawInstruction, Rgb};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Black,
        }
    }
}

/// One terminal frame; one engine pixel per cell.
pub(crate) struct Frame {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl Frame {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }

    fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Later instructions overwrite earlier ones in the same cell.
    pub(crate) fn paint(&mut self, ins: &DrawInstruction) {
        let (Ok(x), Ok(y)) = (u16::try_from(ins.x_pixel), u16::try_from(ins.row_pixel)) else {
            return;
        };
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = Cell {
                ch: ins.glyph,
                fg: rgb(ins.color),
            };
        }
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// Kana take two terminal columns.
fn is_wide(ch: char) -> bool {
    ('\u{3000}'..='\u{30FF}').contains(&ch)
}

/// Runs `undo` when `result` is an error, then hands the result back.
fn undo_on_err<T>(result: anyhow::Result<T>, undo: impl FnOnce()) -> anyhow::Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: Frame,
    pub(crate) cur: Frame,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        terminal::enable_raw_mode()?;
        undo_on_err(Self::enter(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        })
    }

    fn enter() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            DisableLineWrap,
            EnableMouseCapture,
            cursor::Hide,
            SetBackgroundColor(Color::Black),
            Clear(ClearType::All)
        )?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: Frame::new(cols, rows),
            cur: Frame::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        execute!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            DisableMouseCapture,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize(&mut self, cols: u16, rows: u16) -> anyhow::Result<()> {
        self.cols = cols;
        self.rows = rows;
        self.prev = Frame::new(cols, rows);
        self.cur = Frame::new(cols, rows);
        queue!(
            self.out,
            SetBackgroundColor(Color::Black),
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    /// Writes the cells that changed since the last frame.
    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            SetBackgroundColor(Color::Black)
        )?;

        let mut last_fg = None;
        for y in 0..self.rows {
            let mut x = 0;
            while x < self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                let width = if is_wide(c.ch) { 2 } else { 1 };

                if c != self.prev.cells[i] {
                    queue!(self.out, cursor::MoveTo(x, y))?;
                    if last_fg != Some(c.fg) {
                        queue!(self.out, SetForegroundColor(c.fg))?;
                        last_fg = Some(c.fg);
                    }
                    queue!(self.out, Print(c.ch))?;
                }
                x = x.saturating_add(width);
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}
