use std::env;
use std::fmt;

use owo_colors::{OwoColorize, Style};

/// When stderr messages carry ANSI styling
///
/// stdout holds the status report and is never styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Use colors when stderr supports them
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorMode {
    /// Pick the mode from the `--color` flag, then `NO_COLOR`, then `TERM=dumb`
    #[must_use]
    pub fn resolve(flag: Option<Self>) -> Self {
        flag.unwrap_or_else(|| {
            let no_color = env::var_os("NO_COLOR").is_some();
            let dumb_term = env::var("TERM").is_ok_and(|term| term == "dumb");
            if no_color || dumb_term {
                Self::Never
            } else {
                Self::Auto
            }
        })
    }

    #[must_use]
    pub fn should_colorize(self) -> bool {
        match self {
            Self::Always => true,
            Self::Auto => supports_color::on_cached(supports_color::Stream::Stderr).is_some(),
            Self::Never => false,
        }
    }

    /// Shell name as shown in progress lines (bold cyan)
    #[must_use]
    pub fn colorize_shell(self, name: &str) -> String {
        if self.should_colorize() {
            name.style(Style::new().bold().cyan()).to_string()
        } else {
            name.to_string()
        }
    }
}

/// Severity of a stderr line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warn,
    Error,
}

impl Level {
    const fn symbol(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Info => "ℹ",
            Self::Warn => "⚠",
            Self::Error => "✗",
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Success => Style::new().bright_green().bold(),
            Self::Info => Style::new().bright_cyan(),
            Self::Warn => Style::new().bright_yellow(),
            Self::Error => Style::new().bright_red().bold(),
        }
    }
}

/// A stderr line: level symbol, then the message
pub struct Message<D> {
    level: Level,
    mode: ColorMode,
    body: D,
}

impl<D: fmt::Display> fmt::Display for Message<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.level.symbol();
        if self.mode.should_colorize() {
            write!(f, "{} {}", symbol.style(self.level.style()), self.body)
        } else {
            write!(f, "{symbol} {}", self.body)
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn message<D: fmt::Display>(level: Level, mode: ColorMode, body: D) -> Message<D> {
    Message { level, mode, body }
}

pub fn success<D: fmt::Display>(mode: ColorMode, body: D) -> Message<D> {
    message(Level::Success, mode, body)
}

pub fn info<D: fmt::Display>(mode: ColorMode, body: D) -> Message<D> {
    message(Level::Info, mode, body)
}

pub fn warn<D: fmt::Display>(mode: ColorMode, body: D) -> Message<D> {
    message(Level::Warn, mode, body)
}

pub fn error<D: fmt::Display>(mode: ColorMode, body: D) -> Message<D> {
    message(Level::Error, mode, body)
}

/// Secondary text such as hints
pub struct Dimmed<D> {
    mode: ColorMode,
    text: D,
}

impl<D: fmt::Display> fmt::Display for Dimmed<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mode.should_colorize() {
            write!(f, "{}", self.text.dimmed())
        } else {
            write!(f, "{}", self.text)
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
pub fn dim<D: fmt::Display>(mode: ColorMode, text: D) -> Dimmed<D> {
    Dimmed { mode, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_over_environment() {
        temp_env::with_var("NO_COLOR", Some("1"), || {
            assert_eq!(
                ColorMode::resolve(Some(ColorMode::Always)),
                ColorMode::Always
            );
            assert_eq!(ColorMode::resolve(None), ColorMode::Never);
        });
    }

    #[test]
    fn test_dumb_terminal_disables_color() {
        temp_env::with_vars([("TERM", Some("dumb")), ("NO_COLOR", None::<&str>)], || {
            assert_eq!(ColorMode::resolve(None), ColorMode::Never);
        });
        temp_env::with_vars(
            [("TERM", Some("xterm-256color")), ("NO_COLOR", None::<&str>)],
            || {
                assert_eq!(ColorMode::resolve(None), ColorMode::Auto);
            },
        );
    }

    #[test]
    fn test_shell_name_styling() {
        assert_eq!(ColorMode::Never.colorize_shell("zsh"), "zsh");

        let styled = ColorMode::Always.colorize_shell("zsh");
        assert!(styled.starts_with('\x1b'));
        assert!(styled.contains("zsh"));
        assert_ne!(styled, "zsh");
    }

    #[test]
    fn test_plain_messages() {
        let mode = ColorMode::Never;
        assert_eq!(success(mode, "Shell setup complete").to_string(), "✓ Shell setup complete");
        assert_eq!(info(mode, "Setting up bash").to_string(), "ℹ Setting up bash");
        assert_eq!(warn(mode, "1 shell operation failed").to_string(), "⚠ 1 shell operation failed");
        assert_eq!(error(mode, "bash completion: denied").to_string(), "✗ bash completion: denied");
    }

    #[test]
    fn test_styled_message_keeps_body_plain() {
        let output = error(ColorMode::Always, "zsh RC: denied").to_string();
        assert!(output.starts_with('\x1b'));
        assert!(output.ends_with(" zsh RC: denied"));
    }

    #[test]
    fn test_dim() {
        assert_eq!(dim(ColorMode::Never, "(see errors above)").to_string(), "(see errors above)");
        assert!(dim(ColorMode::Always, "hint").to_string().contains('\x1b'));
    }
}
