use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};

/// Full-screen surface that redraws only the rows that changed.
pub struct Terminal {
    stdout: io::Stdout,
    previous: Vec<String>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;

        Ok(Self {
            stdout,
            previous: Vec::new(),
        })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Wait up to `timeout` for input; `None` blocks until an event arrives.
    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Draw `lines` from the top of the screen, clearing rows that shrank away.
    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        let (_, height) = terminal::size()?;
        for y in 0..height as usize {
            let line = lines.get(y).map(String::as_str).unwrap_or("");
            let before = self.previous.get(y).map(String::as_str).unwrap_or("");
            if y < self.previous.len() && line == before {
                continue;
            }
            queue!(
                self.stdout,
                cursor::MoveTo(0, y as u16),
                terminal::Clear(ClearType::CurrentLine),
                Print(line)
            )?;
        }

        self.stdout.flush()?;
        self.previous = lines.iter().take(height as usize).cloned().collect();
        self.previous.resize(height as usize, String::new());
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
