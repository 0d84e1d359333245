use crossterm::style::{Color, Stylize};

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticColor {
    Success,
    Error,
    Warning,
    Info,
    Dim,
}

impl SemanticColor {
    fn color(self) -> Color {
        match self {
            SemanticColor::Success => theme::colors::SUCCESS,
            SemanticColor::Error => theme::colors::ERROR,
            SemanticColor::Warning => theme::colors::WARNING,
            SemanticColor::Info => theme::colors::INFO,
            SemanticColor::Dim => theme::colors::DIM,
        }
    }
}

/// Text with an optional semantic color, rendered only when the terminal
/// supports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    text: String,
    color: Option<SemanticColor>,
    bold: bool,
}

impl ColoredText {
    fn new(text: impl Into<String>, color: Option<SemanticColor>) -> Self {
        Self {
            text: text.into(),
            color,
            bold: false,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Some(SemanticColor::Success))
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Some(SemanticColor::Error))
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, Some(SemanticColor::Warning))
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Some(SemanticColor::Info))
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self::new(text, Some(SemanticColor::Dim))
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn render(&self, supports_color: bool) -> String {
        if !supports_color || (self.color.is_none() && !self.bold) {
            return self.text.clone();
        }

        let mut styled = self.text.as_str().stylize();
        if let Some(color) = self.color {
            styled = styled.with(color.color());
        }
        if self.bold {
            styled = styled.bold();
        }
        format!("{}", styled)
    }
}
