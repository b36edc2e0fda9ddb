//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two are built in: `escuro` (dark, default) and
//! `claro` (light). A custom file can be given with the `theme_file` option.
//!
//! # TOML Format
//!
//! ```toml
//! name = "meu-tema"
//!
//! [colors]
//! header_fg = "#e6e6e6"
//! selection_fg = "#101418"
//! selection_bg = "#7ecbff"
//! text_normal = "#e6e6e6"
//! text_dim = "#7a8088"
//! border = "#3a4048"
//! search_bar_border = "#7ecbff"
//! empty_state_fg = "#7ecbff"
//! cursor_fg = "#ffffff"
//!
//! [status]
//! approved = "#2ecc71"
//! under_review = "#f1c40f"
//! pending = "#e67e22"
//! to_start = "#3498db"
//! unknown = "#808080"
//!
//! [validity]
//! no_data = "#7a8088"
//! expired = "#e74c3c"
//! near_expiry = "#f39c12"
//! ok = "#2ecc71"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::error::{LicenseMapError, Result};
use crate::domain::{StatusBucket, ValidityClass};

/// Built-in theme names.
pub const BUILT_IN: [&str; 2] = ["escuro", "claro"];

/// Color scheme for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    /// Marker and legend colors per status bucket.
    pub status: StatusColors,
    /// Validity line colors per classification.
    pub validity: ValidityColors,
}

/// Chrome colors. All values are hex strings such as `"#e6e6e6"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, hints and secondary list lines.
    pub text_dim: String,

    pub border: String,

    /// Frame of the search field being edited.
    pub search_bar_border: String,

    pub empty_state_fg: String,

    /// Map cursor.
    pub cursor_fg: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusColors {
    pub approved: String,
    pub under_review: String,
    pub pending: String,
    pub to_start: String,
    pub unknown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidityColors {
    pub no_data: String,
    pub expired: String,
    pub near_expiry: String,
    pub ok: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use licensemap::ui::Theme;
    ///
    /// let theme = Theme::from_name("claro").unwrap();
    /// assert_eq!(theme.name, "claro");
    /// assert!(Theme::from_name("neon").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "escuro" => include_str!("../../themes/escuro.toml"),
            "claro" => include_str!("../../themes/claro.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseMapError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| LicenseMapError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| LicenseMapError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    #[must_use]
    pub fn status_color(&self, bucket: StatusBucket) -> &str {
        match bucket {
            StatusBucket::Approved => &self.status.approved,
            StatusBucket::UnderReview => &self.status.under_review,
            StatusBucket::Pending => &self.status.pending,
            StatusBucket::ToStart => &self.status.to_start,
            StatusBucket::Unknown => &self.status.unknown,
        }
    }

    #[must_use]
    pub fn validity_color(&self, class: ValidityClass) -> &str {
        match class {
            ValidityClass::NoData => &self.validity.no_data,
            ValidityClass::Expired => &self.validity.expired,
            ValidityClass::NearExpiry => &self.validity.near_expiry,
            ValidityClass::Ok => &self.validity.ok,
        }
    }

    /// Parses `#rrggbb`; anything else is white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `escuro` theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("escuro").expect("built-in escuro theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_themes_parse() {
        for name in BUILT_IN {
            let theme = Theme::from_name(name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn status_palette_matches_legend() {
        let theme = Theme::default();
        assert_eq!(theme.status_color(StatusBucket::Approved), "#2ecc71");
        assert_eq!(theme.status_color(StatusBucket::UnderReview), "#f1c40f");
        assert_eq!(theme.status_color(StatusBucket::Pending), "#e67e22");
        assert_eq!(theme.status_color(StatusBucket::ToStart), "#3498db");
        assert_eq!(theme.status_color(StatusBucket::Unknown), "#808080");
    }

    #[test]
    fn escapes() {
        assert_eq!(Theme::fg("#2ecc71"), "\u{1b}[38;2;46;204;113m");
        assert_eq!(Theme::bg("3498db"), "\u{1b}[48;2;52;152;219m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn custom_theme_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("tema.toml");
        fs::write(&path, include_str!("../../themes/claro.toml").replace("\"claro\"", "\"meu\"")).unwrap();
        assert_eq!(Theme::from_file(&path).unwrap().name, "meu");

        fs::write(&path, "name = 1").unwrap();
        assert!(matches!(Theme::from_file(&path), Err(LicenseMapError::Theme(_))));
        assert!(Theme::from_file(dir.path().join("ausente.toml")).is_err());
    }
}
