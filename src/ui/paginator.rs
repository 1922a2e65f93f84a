use ratatui::text::Line;

use crate::ui::theme::Theme;

pub const MORE_HINT: &str = "(Move up and down to reveal more choices)";

/// How quickly the highlighted row drifts down from the top of the window.
/// The pointer only grows on small downward steps, so a held key scrolls
/// smoothly while big jumps (wrapping, search hits) do not move it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollDamping {
    pub max_pointer: usize,
    pub max_jump: usize,
}

impl Default for ScrollDamping {
    fn default() -> Self {
        Self {
            max_pointer: 3,
            max_jump: 9,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Paginator {
    /// Row of the active line within the window.
    pointer: usize,
    last_index: usize,
    damping: ScrollDamping,
}

impl Paginator {
    pub fn new(damping: ScrollDamping) -> Self {
        Self {
            pointer: 0,
            last_index: 0,
            damping,
        }
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Window `lines` around `active`. Short lists come back untouched;
    /// longer ones yield exactly `page_size` lines plus the footer hint.
    pub fn paginate(
        &mut self,
        lines: Vec<Line<'static>>,
        active: usize,
        page_size: usize,
        theme: &dyn Theme,
    ) -> Vec<Line<'static>> {
        if lines.len() <= page_size + 2 {
            return lines;
        }

        let ScrollDamping {
            max_pointer,
            max_jump,
        } = self.damping;
        if self.pointer < max_pointer
            && self.last_index < active
            && active - self.last_index < max_jump
        {
            self.pointer = max_pointer.min(self.pointer + active - self.last_index);
        }
        self.last_index = active;

        // The list repeats end to end, so a window that runs past the last
        // line continues with the first ones.
        let top = active.saturating_sub(self.pointer);
        let mut window: Vec<Line<'static>> =
            lines.iter().cycle().skip(top).take(page_size).cloned().collect();
        window.push(Line::from(theme.dim(MORE_HINT.to_string())));
        window
    }
}
