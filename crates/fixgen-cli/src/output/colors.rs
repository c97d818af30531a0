//! Terminal color support detection and formatting.
//!
//! Colors are used only when both stdout and stderr are terminals and
//! `NO_COLOR` is unset.

use std::env;
use std::io::{self, IsTerminal};

/// Color support detection and formatting
#[derive(Debug, Clone, Copy)]
pub struct ColorSupport {
    enabled: bool,
}

impl ColorSupport {
    /// Explicitly enable or disable colors
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Detect color support automatically
    pub fn detect() -> Self {
        Self::new(Self::should_use_colors())
    }

    fn should_use_colors() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        io::stderr().is_terminal() && io::stdout().is_terminal()
    }

    fn paint(&self, code: u8, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    /// Format text in green
    pub fn green(&self, text: &str) -> String {
        self.paint(32, text)
    }

    /// Format text in yellow
    pub fn yellow(&self, text: &str) -> String {
        self.paint(33, text)
    }

    /// Format text in red
    pub fn red(&self, text: &str) -> String {
        self.paint(31, text)
    }

    /// Format text as dim/gray
    pub fn dim(&self, text: &str) -> String {
        self.paint(2, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_leaves_text_alone() {
        let colors = ColorSupport::new(false);
        assert_eq!(colors.red("error"), "error");
        assert_eq!(colors.dim("help"), "help");
    }

    #[test]
    fn test_enabled_wraps_in_escape_codes() {
        let colors = ColorSupport::new(true);
        assert_eq!(colors.green("ok"), "\x1b[32mok\x1b[0m");
        assert_eq!(colors.yellow("warn"), "\x1b[33mwarn\x1b[0m");
    }
}
