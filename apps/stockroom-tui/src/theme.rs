//! Dark and light palettes

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the whole UI, toggled at runtime with `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub dim: Color,
    pub accent: Color,
    pub warn: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            bg: Color::Black,
            fg: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            warn: Color::Yellow,
            highlight_bg: Color::Blue,
            highlight_fg: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            bg: Color::White,
            fg: Color::Black,
            dim: Color::Gray,
            accent: Color::Blue,
            warn: Color::Red,
            highlight_bg: Color::LightBlue,
            highlight_fg: Color::Black,
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn base(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn header(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default().bg(self.highlight_bg).fg(self.highlight_fg)
    }

    pub fn hint(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warn)
    }
}
