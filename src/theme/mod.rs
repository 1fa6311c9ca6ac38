//! Light/dark theme preference.
//!
//! The preference is resolved from storage first and the system color scheme
//! second. [`ThemeController`] owns that logic; on the web, `dom` reflects the
//! active theme into the page and wires the toggle button and the
//! `prefers-color-scheme` listener to the controller.

mod controller;
#[cfg(target_arch = "wasm32")]
pub mod dom;
mod store;

pub use controller::ThemeController;
#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageThemeStore;
pub use store::{MemoryThemeStore, ThemeStore};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Errors that can occur while reading or persisting the theme.
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeError {
    /// A stored or supplied value is not a known theme name.
    UnknownTheme(String),
    /// No storage backend is available (no window, storage disabled).
    StorageUnavailable,
    /// The storage backend rejected the operation.
    Storage(String),
    /// A DOM call needed to reflect the theme failed.
    Dom(String),
}

impl std::fmt::Display for ThemeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeError::UnknownTheme(name) => write!(f, "Unknown theme: {}", name),
            ThemeError::StorageUnavailable => write!(f, "Theme storage unavailable"),
            ThemeError::Storage(msg) => write!(f, "Theme storage error: {}", msg),
            ThemeError::Dom(msg) => write!(f, "DOM error: {}", msg),
        }
    }
}

impl std::error::Error for ThemeError {}

/// UI color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Name used in storage and in the `data-theme` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Theme implied by the system `prefers-color-scheme` setting.
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::UnknownTheme(other.to_string())),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the theme toggle button presents the active theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleAppearance {
    /// Value for the `data-theme-current` attribute.
    pub current: &'static str,
    /// Icon class for the `[data-theme-icon]` child.
    pub icon_class: &'static str,
    /// Text for the `[data-theme-label]` child.
    pub label: &'static str,
}

impl ToggleAppearance {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                current: "dark",
                icon_class: "fa-solid fa-moon",
                label: "Dark",
            },
            Theme::Light => Self {
                current: "light",
                icon_class: "fa-solid fa-sun",
                label: "Light",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(
            "Dark".parse::<Theme>(),
            Err(ThemeError::UnknownTheme("Dark".to_string()))
        );
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn test_toggle_appearance() {
        let dark = ToggleAppearance::for_theme(Theme::Dark);
        assert_eq!(dark.current, "dark");
        assert_eq!(dark.icon_class, "fa-solid fa-moon");
        assert_eq!(dark.label, "Dark");

        let light = ToggleAppearance::for_theme(Theme::Light);
        assert_eq!(light.icon_class, "fa-solid fa-sun");
        assert_eq!(light.label, "Light");
    }
}
