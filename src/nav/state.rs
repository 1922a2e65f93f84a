use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::config::PromptConfig;
use crate::error::{ConfigurationError, ListError, PromptError};
use crate::listing::FileSystemProvider;
use crate::nav::choices::{self, ChoiceEntry, ChoiceList};
use crate::nav::search;
use crate::paths;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Browsing,
    Answered,
    Cancelled,
}

/// Everything a key press can ask the navigation state to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Act on the selected entry: choose, go back or drill in.
    Submit,
    Back,
    StartSearch,
    AppendSearchChar(char),
    RemoveSearchChar,
    EndSearch,
    Cancel,
}

/// Navigation state of one prompt session. Transitions never mutate in
/// place; each returns the next state and the caller swaps it in.
#[derive(Clone, Debug)]
pub struct NavigationState {
    base_path: PathBuf,
    current_path: PathBuf,
    depth: usize,
    selected: usize,
    search_active: bool,
    search_term: String,
    status: Status,
    choices: ChoiceList,
}

impl NavigationState {
    pub fn new(config: &PromptConfig, fs: &dyn FileSystemProvider) -> Result<Self, PromptError> {
        let base = config
            .base_path
            .as_deref()
            .ok_or(ConfigurationError::MissingBasePath)?;
        let cwd = config.resolved_cwd()?;

        let base_path = paths::absolutize(base, &cwd);
        let start = config.start_path.as_deref().unwrap_or(base);
        let current_path = paths::absolutize(start, &cwd);
        let depth = depth_below(&current_path, &base_path)?;

        let choices = choices::build(fs, &current_path, depth)?;
        debug!(base = %base_path.display(), current = %current_path.display(), depth, "navigation started");

        Ok(Self {
            base_path,
            current_path,
            depth,
            selected: initial_selection(depth),
            search_active: false,
            search_term: String::new(),
            status: Status::Browsing,
            choices,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn search_active(&self) -> bool {
        self.search_active
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn choices(&self) -> &ChoiceList {
        &self.choices
    }

    pub fn selected_entry(&self) -> Option<&ChoiceEntry> {
        self.choices.selectable_at(self.selected)
    }

    /// Current directory relative to the base path, `/`-separated.
    pub fn relative_path(&self) -> String {
        paths::display_relative(&paths::relative(&self.base_path, &self.current_path))
    }

    /// The chosen directory once the session has been answered.
    pub fn answer(&self) -> Option<String> {
        (self.status == Status::Answered).then(|| self.relative_path())
    }

    /// Apply one action. Only Drill and Back touch the filesystem; when their
    /// listing fails the error is returned and `self` stays valid.
    pub fn apply(&self, action: Action, fs: &dyn FileSystemProvider) -> Result<Self, ListError> {
        if self.status != Status::Browsing {
            return Ok(self.clone());
        }
        let next = match action {
            Action::MoveUp => self.move_up(),
            Action::MoveDown => self.move_down(),
            Action::Submit => self.submit(fs)?,
            Action::Back => self.back(fs)?,
            Action::StartSearch => self.start_search(),
            Action::AppendSearchChar(ch) => self.append_search_char(ch),
            Action::RemoveSearchChar => self.remove_search_char(),
            Action::EndSearch => self.end_search(),
            Action::Cancel => self.cancel(),
        };
        debug!(?action, selected = next.selected, depth = next.depth, "transition");
        Ok(next)
    }

    pub fn move_up(&self) -> Self {
        let count = self.choices.selectable_count();
        let selected = if self.selected > 0 {
            self.selected - 1
        } else {
            count.saturating_sub(1)
        };
        Self {
            selected,
            ..self.clone()
        }
    }

    pub fn move_down(&self) -> Self {
        let count = self.choices.selectable_count();
        let selected = if self.selected + 1 < count {
            self.selected + 1
        } else {
            0
        };
        Self {
            selected,
            ..self.clone()
        }
    }

    /// Dispatch on the selected entry.
    pub fn submit(&self, fs: &dyn FileSystemProvider) -> Result<Self, ListError> {
        match self.selected_entry() {
            Some(ChoiceEntry::ChooseHere) => Ok(self.choose()),
            Some(ChoiceEntry::Back) => self.back(fs),
            Some(ChoiceEntry::Directory { .. }) => self.drill(fs),
            _ => Ok(self.clone()),
        }
    }

    /// Enter the selected directory. Anything else selected is a no-op.
    pub fn drill(&self, fs: &dyn FileSystemProvider) -> Result<Self, ListError> {
        let Some(name) = self.selected_entry().and_then(|e| e.directory_name()) else {
            return Ok(self.clone());
        };
        let depth = self.depth + 1;
        let current_path = self.current_path.join(name);
        let choices = choices::build(fs, &current_path, depth)?;
        Ok(Self {
            current_path,
            depth,
            choices,
            selected: initial_selection(depth),
            search_active: false,
            search_term: String::new(),
            ..self.clone()
        })
    }

    /// Go up one level. At the base path this is a no-op. The selection is
    /// not consulted, so the `-` key goes up from any entry; Enter only
    /// reaches here through `submit` with Back selected.
    pub fn back(&self, fs: &dyn FileSystemProvider) -> Result<Self, ListError> {
        if self.depth == 0 {
            return Ok(self.clone());
        }
        let Some(parent) = self.current_path.parent() else {
            return Ok(self.clone());
        };
        let depth = self.depth - 1;
        let current_path = parent.to_path_buf();
        let choices = choices::build(fs, &current_path, depth)?;
        Ok(Self {
            current_path,
            depth,
            choices,
            selected: 0,
            search_active: false,
            search_term: String::new(),
            ..self.clone()
        })
    }

    /// Answer with the current directory. Only `submit` calls this, and only
    /// with Choose-this-directory selected.
    fn choose(&self) -> Self {
        if self.selected_entry() != Some(&ChoiceEntry::ChooseHere) {
            return self.clone();
        }
        Self {
            status: Status::Answered,
            search_active: false,
            ..self.clone()
        }
    }

    pub fn cancel(&self) -> Self {
        Self {
            status: Status::Cancelled,
            search_active: false,
            ..self.clone()
        }
    }

    pub fn start_search(&self) -> Self {
        if self.search_active {
            return self.clone();
        }
        Self {
            search_active: true,
            search_term: String::new(),
            ..self.clone()
        }
    }

    pub fn append_search_char(&self, ch: char) -> Self {
        if !self.search_active {
            return self.clone();
        }
        let mut search_term = self.search_term.clone();
        search_term.push(ch);
        self.with_search_term(search_term)
    }

    /// Drop the last search character. Emptying the term, or backspacing an
    /// already empty term, leaves search mode.
    pub fn remove_search_char(&self) -> Self {
        if !self.search_active {
            return self.clone();
        }
        let mut search_term = self.search_term.clone();
        if search_term.pop().is_none() || search_term.is_empty() {
            return self.end_search();
        }
        self.with_search_term(search_term)
    }

    pub fn end_search(&self) -> Self {
        Self {
            search_active: false,
            search_term: String::new(),
            ..self.clone()
        }
    }

    fn with_search_term(&self, search_term: String) -> Self {
        let selected = search::find_prefix(&self.choices, &search_term).unwrap_or(self.selected);
        Self {
            selected,
            search_term,
            ..self.clone()
        }
    }
}

/// Back sits in slot 0 below the base, so the cursor starts on ChooseHere.
fn initial_selection(depth: usize) -> usize {
    if depth > 0 { 1 } else { 0 }
}

/// Count the `..` steps from `current` up to `base`. Any other step means
/// `current` lies outside the base subtree.
fn depth_below(current: &Path, base: &Path) -> Result<usize, ConfigurationError> {
    let mut depth = 0;
    for component in paths::relative(current, base).components() {
        match component {
            Component::ParentDir => depth += 1,
            Component::CurDir => {}
            _ => {
                return Err(ConfigurationError::StartOutsideBase {
                    start: current.to_path_buf(),
                    base: base.to_path_buf(),
                });
            }
        }
    }
    Ok(depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{FsEntry, MemoryFs};

    fn fixture() -> MemoryFs {
        MemoryFs::new()
            .with_dir(
                "/proj",
                vec![FsEntry::dir("src"), FsEntry::dir("docs"), FsEntry::file("README.md")],
            )
            .with_dir("/proj/docs", vec![FsEntry::dir("api"), FsEntry::file("index.md")])
            .with_dir("/proj/docs/api", vec![])
            .with_dir("/proj/src", vec![FsEntry::dir("nav"), FsEntry::file("main.rs")])
            .with_dir("/proj/src/nav", vec![])
            .deny("/proj/secret")
    }

    fn config(base: &str, start: Option<&str>) -> PromptConfig {
        PromptConfig {
            base_path: Some(PathBuf::from(base)),
            cwd: Some(PathBuf::from("/")),
            start_path: start.map(PathBuf::from),
            page_size: None,
        }
    }

    fn state(base: &str, start: Option<&str>) -> NavigationState {
        NavigationState::new(&config(base, start), &fixture()).unwrap()
    }

    fn select_dir(state: &NavigationState, name: &str) -> NavigationState {
        let mut next = state.clone();
        while next.selected_entry().and_then(|e| e.directory_name()) != Some(name) {
            next = next.move_down();
        }
        next
    }

    #[test]
    fn starts_at_base() {
        let s = state("/proj", None);
        assert_eq!(s.depth(), 0);
        assert_eq!(s.selected(), 0);
        assert_eq!(s.selected_entry(), Some(&ChoiceEntry::ChooseHere));
        assert_eq!(s.status(), Status::Browsing);
        assert_eq!(s.relative_path(), ".");
    }

    #[test]
    fn start_below_base_sets_depth_and_back_entry() {
        let s = state("/proj", Some("/proj/src"));
        assert_eq!(s.depth(), 1);
        assert_eq!(s.selected(), 1);
        assert_eq!(s.choices().entries()[0], ChoiceEntry::Back);
        assert_eq!(s.choices().entries()[1], ChoiceEntry::ChooseHere);

        let deep = state("/proj", Some("/proj/src/nav"));
        assert_eq!(deep.depth(), 2);
        assert_eq!(deep.current_path(), Path::new("/proj/src/nav"));
    }

    #[test]
    fn relative_start_resolves_against_cwd() {
        let cfg = PromptConfig {
            base_path: Some(PathBuf::from("proj")),
            cwd: Some(PathBuf::from("/")),
            start_path: Some(PathBuf::from("proj/docs/../src")),
            page_size: None,
        };
        let s = NavigationState::new(&cfg, &fixture()).unwrap();
        assert_eq!(s.current_path(), Path::new("/proj/src"));
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn missing_base_path_is_a_configuration_error() {
        let cfg = PromptConfig::default();
        let err = NavigationState::new(&cfg, &fixture()).unwrap_err();
        assert!(matches!(
            err,
            PromptError::Configuration(ConfigurationError::MissingBasePath)
        ));
    }

    #[test]
    fn start_outside_base_is_rejected() {
        for start in ["/", "/other", "/proj/../elsewhere"] {
            let err = NavigationState::new(&config("/proj/src", Some(start)), &fixture()).unwrap_err();
            assert!(
                matches!(err, PromptError::Configuration(ConfigurationError::StartOutsideBase { .. })),
                "{start}"
            );
        }
    }

    #[test]
    fn unreadable_start_is_a_listing_error() {
        let err = NavigationState::new(&config("/proj", Some("/proj/secret")), &fixture()).unwrap_err();
        assert!(matches!(err, PromptError::Listing(_)));
    }

    #[test]
    fn moves_wrap_around() {
        let s = state("/proj", None);
        // ChooseHere, docs, src
        assert_eq!(s.move_up().selected(), 2);
        assert_eq!(s.move_down().move_down().move_down().selected(), 0);
        assert_eq!(s.move_down().move_up().selected(), 0);
    }

    #[test]
    fn drill_then_back_restores_path_and_list() {
        let fs = fixture();
        let s = state("/proj", None);
        let inside = select_dir(&s, "docs").drill(&fs).unwrap();
        assert_eq!(inside.current_path(), Path::new("/proj/docs"));
        assert_eq!(inside.depth(), 1);
        assert_eq!(inside.selected(), 1);

        let back = inside.back(&fs).unwrap();
        assert_eq!(back.current_path(), s.current_path());
        assert_eq!(back.depth(), 0);
        assert_eq!(back.selected(), 0);
        assert_eq!(back.choices(), s.choices());
    }

    #[test]
    fn back_at_base_is_noop() {
        let fs = fixture();
        let s = state("/proj", None).move_down();
        let after = s.back(&fs).unwrap();
        assert_eq!(after.current_path(), s.current_path());
        assert_eq!(after.selected(), s.selected());
    }

    #[test]
    fn submit_dispatches_on_selection() {
        let fs = fixture();
        let s = state("/proj", Some("/proj/docs"));

        let up = s.move_up().apply(Action::Submit, &fs).unwrap();
        assert_eq!(up.current_path(), Path::new("/proj"));

        let chosen = s.apply(Action::Submit, &fs).unwrap();
        assert_eq!(chosen.status(), Status::Answered);
        assert_eq!(chosen.answer().as_deref(), Some("docs"));

        let drilled = s.move_down().apply(Action::Submit, &fs).unwrap();
        assert_eq!(drilled.current_path(), Path::new("/proj/docs/api"));
        assert_eq!(drilled.depth(), 2);
    }

    #[test]
    fn drill_then_choose_answers_relative_path() {
        let fs = fixture();
        let s = state("/proj", None);
        let answered = select_dir(&s, "docs")
            .apply(Action::Submit, &fs)
            .and_then(|s| s.apply(Action::Submit, &fs))
            .unwrap();
        assert_eq!(answered.answer().as_deref(), Some("docs"));
    }

    #[test]
    fn choose_at_base_answers_dot() {
        let s = state("/proj", None).apply(Action::Submit, &fixture()).unwrap();
        assert_eq!(s.answer().as_deref(), Some("."));
    }

    #[test]
    fn choose_needs_choose_here_selected() {
        let on_dir = state("/proj", None).move_down();
        let same = on_dir.choose();
        assert_eq!(same.status(), Status::Browsing);
        assert_eq!(same.answer(), None);
        assert_eq!(same.selected(), on_dir.selected());
    }

    #[test]
    fn back_action_ignores_selection() {
        let fs = fixture();
        let inside = state("/proj", Some("/proj/docs")).move_down();
        assert!(inside.selected_entry().and_then(|e| e.directory_name()).is_some());

        let up = inside.apply(Action::Back, &fs).unwrap();
        assert_eq!(up.current_path(), Path::new("/proj"));
        assert_eq!(up.depth(), 0);
        assert_eq!(up.selected(), 0);
    }

    #[test]
    fn failed_drill_keeps_previous_state() {
        let fs = fixture();
        let s = state("/proj", None);
        let on_src = select_dir(&s, "src");
        let mut broken = fs.clone();
        broken.remove_dir(Path::new("/proj/src"));

        let err = on_src.drill(&broken).unwrap_err();
        assert_eq!(err.path, Path::new("/proj/src"));
        assert_eq!(on_src.current_path(), Path::new("/proj"));
    }

    #[test]
    fn finished_state_ignores_actions() {
        let fs = fixture();
        let done = state("/proj", None).apply(Action::Submit, &fs).unwrap();
        let after = done.apply(Action::MoveDown, &fs).unwrap();
        assert_eq!(after.selected(), done.selected());

        let cancelled = state("/proj", None).apply(Action::Cancel, &fs).unwrap();
        assert_eq!(cancelled.status(), Status::Cancelled);
        assert_eq!(cancelled.answer(), None);
    }

    #[test]
    fn search_selects_prefix_match() {
        let s = state("/proj", None).start_search();
        assert!(s.search_active());
        let s = s.append_search_char('D').append_search_char('o');
        assert_eq!(s.search_term(), "Do");
        assert_eq!(s.selected_entry().and_then(|e| e.directory_name()), Some("docs"));
    }

    #[test]
    fn search_without_match_keeps_selection() {
        let s = state("/proj", None).start_search().append_search_char('s');
        assert_eq!(s.selected(), 2);
        let s = s.append_search_char('x');
        assert_eq!(s.selected(), 2);
    }

    #[test]
    fn backspace_to_empty_leaves_search_mode() {
        let s = state("/proj", None)
            .start_search()
            .append_search_char('s')
            .append_search_char('r');
        let s = s.remove_search_char();
        assert!(s.search_active());
        assert_eq!(s.search_term(), "s");
        let s = s.remove_search_char();
        assert!(!s.search_active());
        assert_eq!(s.selected(), 2);

        let empty = state("/proj", None).start_search().remove_search_char();
        assert!(!empty.search_active());
    }

    #[test]
    fn search_chars_ignored_outside_search() {
        let s = state("/proj", None).append_search_char('d');
        assert_eq!(s.search_term(), "");
        assert_eq!(s.selected(), 0);
    }
}
