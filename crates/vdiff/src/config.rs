//! Configuration file support for vdiff
//!
//! Config file location: `~/.config/vdiff/config.toml` (XDG_CONFIG_HOME)
//!
//! Example config:
//! ```toml
//! [ui]
//! dark = false
//! line_numbers = true
//! scrollbar = true
//! tab_width = 8
//!
//! [scroll]
//! wheel_lines = 3
//! pan_columns = 8
//!
//! [theme.dark.addition]
//! bg = "#1f3a2b"
//!
//! [theme.light.scrollbar]
//! fg = "white"
//! bg = "#999999"
//! ```

use crate::color::{resolve_color, rgb};
use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use vdiff_core::LineRole;

// ============================================================================
// Theme Configuration
// ============================================================================

/// Foreground/background override pair
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColorPair {
    pub fg: Option<String>,
    pub bg: Option<String>,
}

/// Overrides for one colour scheme
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchemeOverrides {
    pub file: ColorPair,
    pub separator: ColorPair,
    pub addition: ColorPair,
    pub deletion: ColorPair,
    pub context: ColorPair,
    /// `bg` is the track, `fg` the thumb
    pub scrollbar: ColorPair,
}

/// Theme configuration (per-scheme overrides)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub dark: SchemeOverrides,
    pub light: SchemeOverrides,
}

/// Concrete colours for one kind of row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowColors {
    pub fg: Color,
    pub bg: Color,
}

impl RowColors {
    const fn new(fg: u32, bg: u32) -> Self {
        Self {
            fg: rgb(fg),
            bg: rgb(bg),
        }
    }

    fn with_overrides(self, pair: &ColorPair) -> Self {
        let pick = |value: &Option<String>, fallback: Color| {
            value
                .as_deref()
                .and_then(|v| {
                    let color = resolve_color(v);
                    if color.is_none() {
                        tracing::warn!(value = v, "ignoring unknown theme colour");
                    }
                    color
                })
                .unwrap_or(fallback)
        };
        Self {
            fg: pick(&pair.fg, self.fg),
            bg: pick(&pair.bg, self.bg),
        }
    }
}

/// Resolved theme: concrete ratatui colours per row role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTheme {
    pub file: RowColors,
    pub separator: RowColors,
    pub addition: RowColors,
    pub deletion: RowColors,
    pub context: RowColors,
    pub scrollbar: RowColors,
}

const DARK: ResolvedTheme = ResolvedTheme {
    file: RowColors::new(0xADBAC7, 0x2D333B),
    separator: RowColors::new(0xADBAC7, 0x263549),
    addition: RowColors::new(0xADBAC7, 0x273732),
    deletion: RowColors::new(0xADBAC7, 0x3F2D32),
    context: RowColors::new(0xADBAC7, 0x22272E),
    scrollbar: RowColors::new(0x22272E, 0xADBAC7),
};

const LIGHT: ResolvedTheme = ResolvedTheme {
    file: RowColors::new(0x000000, 0xEFEFEF),
    separator: RowColors::new(0x000000, 0xEAFFFF),
    addition: RowColors::new(0x000000, 0xE6FFED),
    deletion: RowColors::new(0x000000, 0xFFEEF0),
    context: RowColors::new(0x000000, 0xFFFFFF),
    scrollbar: RowColors::new(0xFFFFFF, 0x999999),
};

impl ResolvedTheme {
    /// Colours for a row of the given role
    pub fn row(&self, role: LineRole) -> RowColors {
        match role {
            LineRole::FileHeader => self.file,
            LineRole::HunkSeparator => self.separator,
            LineRole::Addition => self.addition,
            LineRole::Deletion => self.deletion,
            LineRole::Context => self.context,
        }
    }
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        ThemeConfig::default().resolve(false)
    }
}

impl ThemeConfig {
    /// Resolve to concrete colours for the dark or light scheme
    pub fn resolve(&self, dark: bool) -> ResolvedTheme {
        let (base, overrides) = if dark {
            (DARK, &self.dark)
        } else {
            (LIGHT, &self.light)
        };
        ResolvedTheme {
            file: base.file.with_overrides(&overrides.file),
            separator: base.separator.with_overrides(&overrides.separator),
            addition: base.addition.with_overrides(&overrides.addition),
            deletion: base.deletion.with_overrides(&overrides.deletion),
            context: base.context.with_overrides(&overrides.context),
            scrollbar: base.scrollbar.with_overrides(&overrides.scrollbar),
        }
    }
}

/// UI configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Dark colour scheme (the `-b` flag forces it on)
    pub dark: bool,
    /// Show new-file line numbers in a gutter
    pub line_numbers: bool,
    /// Show the scrollbar
    pub scrollbar: bool,
    /// Columns a tab expands to
    pub tab_width: u8,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            dark: false,
            line_numbers: true,
            scrollbar: true,
            tab_width: 8,
        }
    }
}

/// Scrolling configuration
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Lines moved per mouse wheel notch
    pub wheel_lines: usize,
    /// Columns moved per horizontal pan step
    pub pan_columns: usize,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            wheel_lines: vdiff_core::viewport::DEFAULT_WHEEL_STEP,
            pan_columns: 8,
        }
    }
}

/// Root configuration
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub scroll: ScrollConfig,
    pub theme: ThemeConfig,
}

impl Config {
    /// Get all possible config file paths in priority order
    fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG_CONFIG_HOME (if set)
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            paths.push(PathBuf::from(xdg).join("vdiff").join("config.toml"));
        }

        // 2. ~/.config/vdiff/config.toml (XDG default, works on all platforms)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("vdiff").join("config.toml"));
        }

        // 3. Platform-specific config dir (~/Library/Application Support on macOS)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("vdiff").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        paths
    }

    /// Get the first existing config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_paths().into_iter().find(|p| p.exists())
    }

    /// Load from an explicit path (errors are fatal) or the first existing
    /// default location (errors fall back to defaults)
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            return Self::from_toml_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()));
        }

        Ok(Self::config_path()
            .and_then(|path| std::fs::read_to_string(&path).ok())
            .and_then(|content| {
                Self::from_toml_str(&content)
                    .map_err(|e| {
                        tracing::warn!(error = %e, "failed to parse config, using defaults");
                        e
                    })
                    .ok()
            })
            .unwrap_or_default())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
