use crate::nav::choices::ChoiceList;

/// Selectable index of the first directory whose name starts with `term`,
/// ignoring case. Back and ChooseHere never match.
pub fn find_prefix(list: &ChoiceList, term: &str) -> Option<usize> {
    let term = term.to_lowercase();
    list.selectable().position(|entry| {
        entry
            .directory_name()
            .is_some_and(|name| name.to_lowercase().starts_with(&term))
    })
}

/// Whether a typed character extends the search term.
pub fn is_search_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '.' | '-')
}
