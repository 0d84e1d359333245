use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Arrow,
    Watch,
    Deploy,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        if supports_unicode {
            match self {
                Icon::Success => theme::icons::SUCCESS,
                Icon::Error => theme::icons::ERROR,
                Icon::Warning => theme::icons::WARNING,
                Icon::Progress => theme::icons::PROGRESS,
                Icon::Arrow => theme::icons::ARROW,
                Icon::Watch => theme::icons::WATCH,
                Icon::Deploy => theme::icons::DEPLOY,
            }
        } else {
            match self {
                Icon::Success => theme::icons_ascii::SUCCESS,
                Icon::Error => theme::icons_ascii::ERROR,
                Icon::Warning => theme::icons_ascii::WARNING,
                Icon::Progress => theme::icons_ascii::PROGRESS,
                Icon::Arrow => theme::icons_ascii::ARROW,
                Icon::Watch => theme::icons_ascii::WATCH,
                Icon::Deploy => theme::icons_ascii::DEPLOY,
            }
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Arrow => theme::colors::DIM,
            Icon::Watch | Icon::Deploy => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
