use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::nav::state::{NavigationState, Status};
use crate::ui::components::choice_list;
use crate::ui::paginator::Paginator;
use crate::ui::theme::Theme;

pub const ARROW_HINT: &str = "(Use arrow keys)";
pub const SEARCH_HINT: &str = "(Use \"/\" key to search this directory)";

/// Per-frame inputs that are not part of the navigation state.
pub struct FrameView<'a> {
    pub message: &'a str,
    /// Base path as shown to the user, relative to the working directory.
    pub base_display: &'a str,
    pub page_size: usize,
    pub first_render: bool,
    pub error: Option<&'a str>,
}

/// Compose the whole prompt: question, location, windowed list, transient
/// error and the search line.
pub fn compose(
    state: &NavigationState,
    paginator: &mut Paginator,
    view: &FrameView<'_>,
    theme: &dyn Theme,
) -> Text<'static> {
    let mut lines = Vec::new();

    let mut question = vec![
        Span::styled("? ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{} ", view.message),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if state.status() == Status::Answered {
        question.push(theme.highlight(state.relative_path()));
        lines.push(Line::from(question));
    } else {
        if view.first_render {
            question.push(theme.dim(ARROW_HINT.to_string()));
        }
        lines.push(Line::from(question));

        let current = if state.depth() == 0 {
            String::new()
        } else {
            state.relative_path()
        };
        lines.push(Line::from(vec![
            Span::styled("Directory: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{}/", view.base_display)),
            theme.highlight(current),
        ]));

        let list = choice_list::render_lines(state.choices(), state.selected(), theme);
        let active = state.choices().line_of(state.selected()).unwrap_or(0);
        lines.extend(paginator.paginate(list, active, view.page_size, theme));

        if let Some(error) = view.error {
            lines.push(Line::from(theme.error(error.to_string())));
        }
    }

    if state.search_active() {
        lines.push(Line::from(format!("Search: {}", state.search_term())));
    } else {
        lines.push(Line::from(theme.dim(SEARCH_HINT.to_string())));
    }

    Text::from(lines)
}
