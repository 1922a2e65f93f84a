use std::path::PathBuf;

use crossterm::event::KeyEvent;
use ratatui::text::Text;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::PromptConfig;
use crate::error::PromptError;
use crate::listing::FileSystemProvider;
use crate::nav::input;
use crate::nav::state::{NavigationState, Status};
use crate::paths;
use crate::prompt::{Flow, Prompt};
use crate::ui::frame::{self, FrameView};
use crate::ui::paginator::{Paginator, ScrollDamping};
use crate::ui::theme::Theme;

pub const DEFAULT_PAGE_SIZE: usize = 7;
pub const DEFAULT_MESSAGE: &str = "Select a directory";

/// The chosen directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// Relative to the base path, `/`-separated; `.` for the base itself.
    pub path: String,
    pub absolute: PathBuf,
}

/// Directory picker prompt. Holds exactly one navigation state and swaps it
/// for the next one after every accepted key.
pub struct DirectoryPrompt<F: FileSystemProvider> {
    state: NavigationState,
    fs: F,
    theme: Box<dyn Theme>,
    paginator: Paginator,
    message: String,
    base_display: String,
    page_size: usize,
    first_render: bool,
    error: Option<String>,
}

impl<F: FileSystemProvider> DirectoryPrompt<F> {
    pub fn new(config: &PromptConfig, fs: F, theme: Box<dyn Theme>) -> Result<Self, PromptError> {
        let state = NavigationState::new(config, &fs)?;
        let cwd = config.resolved_cwd()?;
        let base_display = paths::display_relative(&paths::relative(&cwd, state.base_path()));

        Ok(Self {
            state,
            fs,
            theme,
            paginator: Paginator::default(),
            message: DEFAULT_MESSAGE.to_string(),
            base_display,
            page_size: config.page_size_or(DEFAULT_PAGE_SIZE),
            first_render: true,
            error: None,
        })
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_damping(mut self, damping: ScrollDamping) -> Self {
        self.paginator = Paginator::new(damping);
        self
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Message of the last failed navigation, cleared by the next accepted key.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<F: FileSystemProvider> Prompt for DirectoryPrompt<F> {
    type Answer = Selection;

    fn render(&mut self) -> Text<'static> {
        let view = FrameView {
            message: &self.message,
            base_display: &self.base_display,
            page_size: self.page_size,
            first_render: self.first_render,
            error: self.error.as_deref(),
        };
        let text = frame::compose(&self.state, &mut self.paginator, &view, self.theme.as_ref());
        self.first_render = false;
        text
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if self.state.status() != Status::Browsing {
            return Flow::Done;
        }
        let Some(action) = input::route(&key, self.state.search_active()) else {
            return Flow::Continue;
        };

        match self.state.apply(action, &self.fs) {
            Ok(next) => {
                if next.current_path() != self.state.current_path() {
                    debug!(path = %next.current_path().display(), "directory changed");
                }
                self.state = next;
                self.error = None;
            }
            Err(err) => {
                warn!(error = %err, ?action, "navigation aborted");
                self.error = Some(err.to_string());
            }
        }

        match self.state.status() {
            Status::Browsing => Flow::Continue,
            Status::Answered => {
                info!(answer = %self.state.relative_path(), "directory chosen");
                Flow::Done
            }
            Status::Cancelled => {
                info!("prompt cancelled");
                Flow::Done
            }
        }
    }

    fn finalize(self) -> Option<Selection> {
        let path = self.state.answer()?;
        Some(Selection {
            path,
            absolute: self.state.current_path().to_path_buf(),
        })
    }
}
