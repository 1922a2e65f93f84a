use std::path::Path;

use crate::error::ListError;
use crate::listing::FileSystemProvider;

pub const BACK_LABEL: &str = "..";
pub const CHOOSE_LABEL: &str = "Choose directory here";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChoiceEntry {
    Back,
    ChooseHere,
    Directory { name: String },
    File { name: String },
    Spacer,
}

impl ChoiceEntry {
    pub fn is_selectable(&self) -> bool {
        matches!(
            self,
            ChoiceEntry::Back | ChoiceEntry::ChooseHere | ChoiceEntry::Directory { .. }
        )
    }

    /// Directory name, for the entries that carry one and can be searched.
    pub fn directory_name(&self) -> Option<&str> {
        match self {
            ChoiceEntry::Directory { name } => Some(name),
            _ => None,
        }
    }
}

/// Ordered entries of one directory, addressable by selectable index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChoiceList {
    entries: Vec<ChoiceEntry>,
    /// Position in `entries` of each selectable entry.
    selectable: Vec<usize>,
}

impl ChoiceList {
    pub fn new(entries: Vec<ChoiceEntry>) -> Self {
        let selectable = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_selectable())
            .map(|(i, _)| i)
            .collect();
        Self {
            entries,
            selectable,
        }
    }

    pub fn entries(&self) -> &[ChoiceEntry] {
        &self.entries
    }

    pub fn selectable_count(&self) -> usize {
        self.selectable.len()
    }

    pub fn selectable_at(&self, index: usize) -> Option<&ChoiceEntry> {
        self.selectable.get(index).map(|&i| &self.entries[i])
    }

    /// Row of the selectable entry `index` within `entries()`.
    pub fn line_of(&self, index: usize) -> Option<usize> {
        self.selectable.get(index).copied()
    }

    pub fn selectable(&self) -> impl Iterator<Item = &ChoiceEntry> {
        self.selectable.iter().map(|&i| &self.entries[i])
    }
}

/// List `path` and lay its children out as choices for a cursor `depth`
/// levels below the base path.
pub fn build(
    fs: &dyn FileSystemProvider,
    path: &Path,
    depth: usize,
) -> Result<ChoiceList, ListError> {
    let listed = fs.list_entries(path).map_err(|source| ListError {
        path: path.to_path_buf(),
        source,
    })?;

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in listed {
        if entry.is_symlink || entry.name.starts_with('.') {
            continue;
        }
        if entry.is_directory {
            dirs.push(entry.name);
        } else {
            files.push(entry.name);
        }
    }
    // String ordering is byte order, which for UTF-8 is code-point order.
    dirs.sort();
    files.sort();

    let has_children = !dirs.is_empty() || !files.is_empty();
    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 4);
    if depth > 0 {
        entries.push(ChoiceEntry::Back);
    }
    entries.push(ChoiceEntry::ChooseHere);
    if has_children {
        entries.push(ChoiceEntry::Spacer);
    }
    entries.extend(dirs.into_iter().map(|name| ChoiceEntry::Directory { name }));
    entries.extend(files.into_iter().map(|name| ChoiceEntry::File { name }));
    if has_children {
        entries.push(ChoiceEntry::Spacer);
    }

    Ok(ChoiceList::new(entries))
}
