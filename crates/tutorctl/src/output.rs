//! Output formatting - plain ASCII sections, optional color

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use tutor_common::config::ColorMode;

/// Renders strings with or without ANSI colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    color: bool,
}

impl Output {
    pub fn new(mode: ColorMode) -> Self {
        let color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none()
            }
        };
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    /// Section header such as `[EXAMPLES]`
    pub fn header(&self, title: &str) -> String {
        let text = format!("[{}]", title);
        if self.color {
            text.bold().to_string()
        } else {
            text
        }
    }

    pub fn success(&self, text: &str) -> String {
        if self.color {
            text.bright_green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn failure(&self, text: &str) -> String {
        if self.color {
            text.bright_red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn hint(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Display an error on stderr
pub fn display_error(output: &Output, message: &str) {
    eprintln!("[ERROR] {}", output.failure(message));
}
