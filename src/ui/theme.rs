//! Theme management and ANSI escape sequence generation.
//!
//! Themes are either built in (embedded TOML) or loaded from a custom TOML
//! file. Colors are hex strings converted to 24-bit ANSI escapes on use.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! sort_indicator_fg = "#f9e2af"
//! filter_fg = "#89b4fa"
//! empty_state_fg = "#89b4fa"
//! loading_fg = "#94e2d5"
//! action_primary_fg = "#89b4fa"
//! action_secondary_fg = "#a6adc8"
//! action_danger_fg = "#f38ba8"
//! action_success_fg = "#a6e3a1"
//! ```
//!
//! # Example
//!
//! ```rust
//! use datatable::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::{Result, TableError};
use crate::table::Variant;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Column header text color.
    pub header_fg: String,
    /// Optional column header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected row foreground color.
    pub selection_fg: String,
    /// Selected row background color.
    pub selection_bg: String,

    pub text_normal: String,
    /// Secondary text (card labels, pagination, hints).
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    /// Sort indicator glyph color.
    pub sort_indicator_fg: String,
    /// Filter bar color.
    pub filter_fg: String,

    pub empty_state_fg: String,
    pub loading_fg: String,

    pub action_primary_fg: String,
    pub action_secondary_fg: String,
    pub action_danger_fg: String,
    pub action_success_fg: String,
}

impl ThemeColors {
    /// Foreground color of an action button.
    #[must_use]
    pub fn action_fg(&self, variant: Variant) -> &str {
        match variant {
            Variant::Primary => &self.action_primary_fg,
            Variant::Secondary => &self.action_secondary_fg,
            Variant::Danger => &self.action_danger_fg,
            Variant::Success => &self.action_success_fg,
        }
    }
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` if the name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TableError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| TableError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// 24-bit escape for `hex` on the given SGR layer (38 fg, 48 bg).
    ///
    /// Anything but six hex digits, with or without `#`, renders as white.
    fn escape(layer: u8, hex: &str) -> String {
        let digits = hex.trim().trim_start_matches('#');
        let valid = digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit());
        let rgb = if valid { u32::from_str_radix(digits, 16).unwrap_or(0x00ff_ffff) } else { 0x00ff_ffff };
        let [_, r, g, b] = rgb.to_be_bytes();
        format!("\u{001b}[{layer};2;{r};{g};{b}m")
    }

    /// ANSI foreground escape for `hex`.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        Self::escape(38, hex)
    }

    /// ANSI background escape for `hex`.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        Self::escape(48, hex)
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case("catppuccin-mocha")]
    #[case("catppuccin-latte")]
    fn test_builtin_themes_parse(#[case] name: &str) {
        let theme = Theme::from_name(name).unwrap();
        assert_eq!(theme.name, name);
    }

    #[test]
    fn test_unknown_theme() {
        assert!(Theme::from_name("solarized").is_none());
    }

    #[rstest]
    #[case("#cdd6f4", "\u{1b}[38;2;205;214;244m")]
    #[case("000000", "\u{1b}[38;2;0;0;0m")]
    #[case("#fff", "\u{1b}[38;2;255;255;255m")]
    #[case("+12345", "\u{1b}[38;2;255;255;255m")]
    fn test_fg_escapes(#[case] hex: &str, #[case] expected: &str) {
        assert_eq!(Theme::fg(hex), expected);
    }

    #[test]
    fn test_bg_escape() {
        assert_eq!(Theme::bg("#1e1e2e"), "\u{1b}[48;2;30;30;46m");
    }

    #[test]
    fn test_from_file_round_trips_builtin() {
        let mocha = toml::to_string(&Theme::default()).unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(mocha.replace("catppuccin-mocha", "custom").as_bytes())
            .unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
        assert_eq!(theme.colors.action_fg(Variant::Danger), "#f38ba8");
    }

    #[test]
    fn test_from_file_errors_are_theme_errors() {
        assert!(matches!(
            Theme::from_file("/nonexistent/theme.toml"),
            Err(TableError::Theme(_))
        ));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = \"broken\"").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(TableError::Theme(_))));
    }
}
