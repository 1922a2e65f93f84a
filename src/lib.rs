//! Keyboard-driven directory picker for the terminal.
//!
//! [`app::DirectoryPrompt`] is the widget. Hosts feed it key events through
//! [`prompt::KeyEventSource`] and draw its frames with a
//! [`prompt::TerminalRenderer`].

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod listing;
pub mod logging;
pub mod nav;
pub mod paths;
pub mod prompt;
pub mod ui;

pub use app::{DirectoryPrompt, Selection};
pub use config::{Config, PromptConfig};
pub use error::{ConfigurationError, ListError, PromptError};
pub use listing::{FileSystemProvider, FsEntry, LocalFs, MemoryFs};
pub use prompt::Prompt;
