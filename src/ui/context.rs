use stagehand::config::{ColorMode, Settings};

use crate::cli::ColorWhen;
use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorWhen>, settings: &Settings) -> Self {
        Self::from_caps(json, verbose, cli_color, settings, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        settings: &Settings,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = settings.output.unicode && caps.supports_unicode;

        let color = !json
            && match cli_color {
                Some(ColorWhen::Never) => false,
                Some(ColorWhen::Always) => true,
                Some(ColorWhen::Auto) | None => match settings.output.color {
                    ColorMode::Never => false,
                    ColorMode::Always => true,
                    ColorMode::Auto => caps.supports_color && !caps.is_ci,
                },
            };

        Self {
            json,
            verbose,
            color,
            unicode,
        }
    }
}
