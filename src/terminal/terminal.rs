use crate::terminal::input_event::{
    CursorPos, KeyCode, KeyEvent, KeyModifiers, PointerEvent, TerminalEvent, TerminalSize,
};
use crate::ui::span::SpanLine;
use crate::ui::style::Color;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEventKind,
    poll, read,
};
use crossterm::style::{
    Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::{cursor, execute, queue, terminal};
use std::io::{self, Stdout, Write};
use std::time::Duration;

/// Inline terminal surface: redraws one block of lines below the prompt row.
pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    /// Row of the block's first line, relative to the cursor row after a draw.
    cursor_row_in_block: u16,
    drawn_lines: u16,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self {
            stdout: io::stdout(),
            size: TerminalSize { width, height },
            cursor_row_in_block: 0,
            drawn_lines: 0,
        })
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn enter_raw_mode(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.stdout, EnableMouseCapture)
    }

    pub fn exit_raw_mode(&mut self) -> io::Result<()> {
        execute!(self.stdout, DisableMouseCapture)?;
        terminal::disable_raw_mode()
    }

    pub fn show_cursor(&mut self) -> io::Result<()> {
        execute!(self.stdout, cursor::Show)
    }

    pub fn poll(&self, timeout: Duration) -> io::Result<bool> {
        poll(timeout)
    }

    pub fn read_event(&mut self) -> io::Result<Option<TerminalEvent>> {
        let event = match read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                TerminalEvent::Key(map_key_event(key))
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                TerminalEvent::Pointer(PointerEvent {
                    col: mouse.column,
                    row: mouse.row,
                })
            }
            Event::Resize(width, height) => {
                self.size = TerminalSize { width, height };
                TerminalEvent::Resize(self.size)
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Cursor row of the block's first line on screen.
    pub fn block_origin_row(&self) -> io::Result<u16> {
        let (_, row) = cursor::position()?;
        Ok(row.saturating_sub(self.cursor_row_in_block))
    }

    /// Replaces the previously drawn block with `lines` and places the cursor
    /// at `cursor` (relative to the block).
    pub fn render_block(&mut self, lines: &[SpanLine], cursor: Option<CursorPos>) -> io::Result<()> {
        self.rewind_block()?;
        queue!(self.stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;

        for (idx, line) in lines.iter().enumerate() {
            if idx > 0 {
                queue!(self.stdout, Print("\r\n"))?;
            }
            self.queue_line(line)?;
        }
        self.drawn_lines = lines.len() as u16;
        let last_row = self.drawn_lines.saturating_sub(1);

        match cursor {
            Some(pos) => {
                let up = last_row.saturating_sub(pos.row);
                if up > 0 {
                    queue!(self.stdout, cursor::MoveUp(up))?;
                }
                queue!(self.stdout, cursor::MoveToColumn(pos.col), cursor::Show)?;
                self.cursor_row_in_block = pos.row.min(last_row);
            }
            None => {
                queue!(self.stdout, cursor::Hide)?;
                self.cursor_row_in_block = last_row;
            }
        }
        self.stdout.flush()
    }

    /// Clears the drawn block and leaves the cursor at its first row.
    pub fn clear_block(&mut self) -> io::Result<()> {
        self.rewind_block()?;
        queue!(self.stdout, terminal::Clear(terminal::ClearType::FromCursorDown))?;
        self.drawn_lines = 0;
        self.cursor_row_in_block = 0;
        self.stdout.flush()
    }

    fn rewind_block(&mut self) -> io::Result<()> {
        if self.cursor_row_in_block > 0 {
            queue!(self.stdout, cursor::MoveUp(self.cursor_row_in_block))?;
        }
        queue!(self.stdout, cursor::MoveToColumn(0))?;
        self.cursor_row_in_block = 0;
        Ok(())
    }

    fn queue_line(&mut self, line: &SpanLine) -> io::Result<()> {
        for span in line {
            let style = span.style;
            if let Some(fg) = style.color {
                queue!(self.stdout, SetForegroundColor(map_color(fg)))?;
            }
            if let Some(bg) = style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(bg)))?;
            }
            if style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }

            queue!(self.stdout, Print(&span.text))?;

            if !style.is_plain() {
                queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
            }
        }
        Ok(())
    }
}

fn map_color(color: Color) -> crossterm::style::Color {
    match color {
        Color::Reset => crossterm::style::Color::Reset,
        Color::Black => crossterm::style::Color::Black,
        Color::DarkGrey => crossterm::style::Color::DarkGrey,
        Color::Red => crossterm::style::Color::Red,
        Color::Green => crossterm::style::Color::Green,
        Color::Yellow => crossterm::style::Color::Yellow,
        Color::Blue => crossterm::style::Color::Blue,
        Color::Magenta => crossterm::style::Color::Magenta,
        Color::Cyan => crossterm::style::Color::Cyan,
        Color::White => crossterm::style::Color::White,
    }
}

fn map_key_event(event: crossterm::event::KeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(event.code),
        modifiers: map_key_modifiers(event.modifiers),
    }
}

fn map_key_code(code: crossterm::event::KeyCode) -> KeyCode {
    match code {
        crossterm::event::KeyCode::Char(ch) => KeyCode::Char(ch),
        crossterm::event::KeyCode::Backspace => KeyCode::Backspace,
        crossterm::event::KeyCode::Enter => KeyCode::Enter,
        crossterm::event::KeyCode::Esc => KeyCode::Esc,
        crossterm::event::KeyCode::Left => KeyCode::Left,
        crossterm::event::KeyCode::Right => KeyCode::Right,
        crossterm::event::KeyCode::Up => KeyCode::Up,
        crossterm::event::KeyCode::Down => KeyCode::Down,
        crossterm::event::KeyCode::Home => KeyCode::Home,
        crossterm::event::KeyCode::End => KeyCode::End,
        crossterm::event::KeyCode::Tab => KeyCode::Tab,
        crossterm::event::KeyCode::BackTab => KeyCode::BackTab,
        crossterm::event::KeyCode::Delete => KeyCode::Delete,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: crossterm::event::KeyModifiers) -> KeyModifiers {
    let mut mapped = KeyModifiers::NONE;
    if modifiers.contains(crossterm::event::KeyModifiers::SHIFT) {
        mapped |= KeyModifiers::SHIFT;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::CONTROL) {
        mapped |= KeyModifiers::CONTROL;
    }
    if modifiers.contains(crossterm::event::KeyModifiers::ALT) {
        mapped |= KeyModifiers::ALT;
    }
    mapped
}
