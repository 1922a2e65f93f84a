use ratatui::text::{Line, Span};

use crate::nav::choices::{BACK_LABEL, CHOOSE_LABEL, ChoiceEntry, ChoiceList};
use crate::ui::theme::Theme;

pub const SPACER_RULE: &str = "──────────────";

/// One line per entry. `selected` is a selectable index; files and spacers
/// are never highlighted.
pub fn render_lines(list: &ChoiceList, selected: usize, theme: &dyn Theme) -> Vec<Line<'static>> {
    let mut selectable_index = 0;
    list.entries()
        .iter()
        .map(|entry| {
            let label = match entry {
                ChoiceEntry::Spacer => {
                    return Line::from(theme.dim(format!("  {SPACER_RULE}")));
                }
                ChoiceEntry::File { name } => return Line::from(theme.dim(format!("  {name}"))),
                ChoiceEntry::Back => BACK_LABEL,
                ChoiceEntry::ChooseHere => CHOOSE_LABEL,
                ChoiceEntry::Directory { name } => name.as_str(),
            };

            let is_selected = selectable_index == selected;
            selectable_index += 1;
            if is_selected {
                return Line::from(theme.highlight(format!("{} {label}", theme.pointer_glyph())));
            }
            let label = match entry {
                ChoiceEntry::Directory { .. } => Span::raw(label.to_string()),
                _ => theme.accent(label.to_string()),
            };
            Line::from(vec![Span::raw("  "), label])
        })
        .collect()
}
