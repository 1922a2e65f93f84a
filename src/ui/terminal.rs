use std::io::{self, Stderr};

use anyhow::Result;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;
use ratatui::{Terminal, TerminalOptions, Viewport};

use crate::prompt::TerminalRenderer;

/// Inline viewport on stderr, so stdout stays free for the answer and the
/// final frame remains in the scrollback.
pub struct CrosstermRenderer {
    terminal: Terminal<CrosstermBackend<Stderr>>,
    raw: bool,
}

impl CrosstermRenderer {
    pub fn new(height: u16) -> Result<Self> {
        enable_raw_mode()?;
        let backend = CrosstermBackend::new(io::stderr());
        let terminal = match Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        ) {
            Ok(terminal) => terminal,
            Err(err) => {
                let _ = disable_raw_mode();
                return Err(err.into());
            }
        };
        Ok(Self {
            terminal,
            raw: true,
        })
    }

    /// Leave raw mode and put the cursor back. Also runs on drop.
    pub fn restore(&mut self) -> Result<()> {
        if self.raw {
            self.raw = false;
            disable_raw_mode()?;
            self.terminal.show_cursor()?;
            eprintln!();
        }
        Ok(())
    }
}

impl Drop for CrosstermRenderer {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

impl TerminalRenderer for CrosstermRenderer {
    fn render(&mut self, frame: Text<'static>) -> Result<()> {
        self.terminal.draw(|f| {
            let area = f.area();
            f.render_widget(Paragraph::new(frame), area);
        })?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.terminal.clear()?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.terminal.hide_cursor()?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.terminal.show_cursor()?;
        Ok(())
    }
}
