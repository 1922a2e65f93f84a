use std::fs;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use serde::{Deserialize, Serialize};

/// Styling capability handed to the renderer, so list and frame layout never
/// depend on a particular terminal or colour scheme.
pub trait Theme {
    fn highlight(&self, text: String) -> Span<'static>;
    fn dim(&self, text: String) -> Span<'static>;
    fn accent(&self, text: String) -> Span<'static>;
    fn error(&self, text: String) -> Span<'static>;
    fn pointer_glyph(&self) -> &str;
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    #[serde(default = "default_pointer")]
    pub pointer: String,
    pub colors: PaletteColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaletteColors {
    pub highlight: String,
    pub dim: String,
    pub accent: String,
    pub error: String,
}

fn default_pointer() -> String {
    "❯".to_string()
}

impl Palette {
    /// Look up a palette by name: user themes first, then the built-ins.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("dirnav").join("themes").join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&path) {
                if let Ok(palette) = toml::from_str::<Palette>(&content) {
                    return Some(palette);
                }
            }
        }
        Self::builtin(name)
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "plain" => Some(Self::plain()),
            _ => None,
        }
    }

    /// No colours at all; used when output must stay free of styling.
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            pointer: ">".to_string(),
            colors: PaletteColors {
                highlight: "reset".to_string(),
                dim: "reset".to_string(),
                accent: "reset".to_string(),
                error: "reset".to_string(),
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            pointer: default_pointer(),
            colors: PaletteColors::default(),
        }
    }
}

impl Default for PaletteColors {
    fn default() -> Self {
        Self {
            highlight: "cyan".to_string(),
            dim: "darkgray".to_string(),
            accent: "blue".to_string(),
            error: "red".to_string(),
        }
    }
}

impl PaletteColors {
    /// Accepts colour names and `#rrggbb`; anything else falls back to the
    /// terminal's default colour.
    pub fn parse_color(value: &str) -> Color {
        Color::from_str(value.trim()).unwrap_or(Color::Reset)
    }

    pub fn highlight(&self) -> Color { Self::parse_color(&self.highlight) }
    pub fn dim(&self) -> Color { Self::parse_color(&self.dim) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
}

impl Theme for Palette {
    fn highlight(&self, text: String) -> Span<'static> {
        Span::styled(text, Style::default().fg(self.colors.highlight()))
    }

    fn dim(&self, text: String) -> Span<'static> {
        Span::styled(text, Style::default().fg(self.colors.dim()).add_modifier(Modifier::DIM))
    }

    fn accent(&self, text: String) -> Span<'static> {
        Span::styled(text, Style::default().fg(self.colors.accent()).add_modifier(Modifier::BOLD))
    }

    fn error(&self, text: String) -> Span<'static> {
        Span::styled(text, Style::default().fg(self.colors.error()))
    }

    fn pointer_glyph(&self) -> &str {
        &self.pointer
    }
}
