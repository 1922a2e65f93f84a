use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use tracing::warn;

use crate::prompt::KeyEventSource;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(u16, u16),
}

/// Reads terminal events on a background thread and hands them over one at
/// a time, in arrival order. The reader thread owns the only sender, so once
/// it stops the channel disconnects and the source ends.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self::with_reader(tick_rate, event::poll, event::read)
    }

    /// Spawn the reader thread over arbitrary poll/read functions.
    pub fn with_reader<P, R>(tick_rate: Duration, mut poll: P, mut read: R) -> Self
    where
        P: FnMut(Duration) -> io::Result<bool> + Send + 'static,
        R: FnMut() -> io::Result<Event> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                match poll(tick_rate) {
                    Ok(true) => match read() {
                        Ok(Event::Key(key)) => {
                            if tx.send(AppEvent::Key(key)).is_err() {
                                return;
                            }
                        }
                        Ok(Event::Resize(w, h)) => {
                            if tx.send(AppEvent::Resize(w, h)).is_err() {
                                return;
                            }
                        }
                        Ok(_) => {}
                        Err(err) => {
                            warn!(error = %err, "terminal event read failed");
                            return;
                        }
                    },
                    // Ticks let the thread notice a dropped receiver.
                    Ok(false) => {
                        if tx.send(AppEvent::Tick).is_err() {
                            return;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "terminal event poll failed");
                        return;
                    }
                }
            }
        });

        Self { rx }
    }

    /// Next event, or `None` once the reader thread has stopped.
    pub fn next(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }
}

impl KeyEventSource for EventHandler {
    fn next_event(&mut self) -> anyhow::Result<Option<AppEvent>> {
        Ok(self.next())
    }
}
