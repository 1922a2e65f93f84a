use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::text::Text;

use crate::event::AppEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Done,
}

/// Where frames go. Every call receives the complete frame.
pub trait TerminalRenderer {
    fn render(&mut self, frame: Text<'static>) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    fn hide_cursor(&mut self) -> Result<()>;
    fn show_cursor(&mut self) -> Result<()>;
}

/// Ordered stream of terminal events. `None` means the stream has ended.
pub trait KeyEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

/// An interactive question composed by a host. The host supplies the event
/// source and the renderer; the prompt supplies state and frames.
pub trait Prompt {
    type Answer;

    fn render(&mut self) -> Text<'static>;
    fn handle_key(&mut self, key: KeyEvent) -> Flow;
    fn finalize(self) -> Option<Self::Answer>;

    /// Drive the prompt until it finishes or the events run out. Each event
    /// is fully handled and rendered before the next one is read, and no
    /// event is read after the prompt reports `Flow::Done`.
    fn run(
        mut self,
        events: &mut dyn KeyEventSource,
        renderer: &mut dyn TerminalRenderer,
    ) -> Result<Option<Self::Answer>>
    where
        Self: Sized,
    {
        renderer.hide_cursor()?;
        renderer.render(self.render())?;

        while let Some(event) = events.next_event()? {
            match event {
                AppEvent::Key(key) => {
                    let flow = self.handle_key(key);
                    renderer.render(self.render())?;
                    if flow == Flow::Done {
                        break;
                    }
                }
                AppEvent::Resize(_, _) => {
                    renderer.clear()?;
                    renderer.render(self.render())?;
                }
                AppEvent::Tick => {}
            }
        }

        renderer.show_cursor()?;
        Ok(self.finalize())
    }
}
