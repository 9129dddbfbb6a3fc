//! Light/dark theme preference.
//!
//! The only state persisted by the app. The value is read once at startup,
//! falling back to the system colour scheme and then to light, and written back
//! on every toggle.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("unknown theme: {0:?}")]
    Parse(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ThemeError::Parse(other.to_owned())),
        }
    }
}

/// Key-value storage for the theme flag (`localStorage` in the browser).
pub trait ThemeStore {
    fn load(&self) -> Option<String>;
    fn save(&self, theme: Theme) -> Result<(), ThemeError>;
}

/// Saved preference first, then the system colour scheme, then light.
pub fn resolve_initial(saved: Option<&str>, prefers_dark: bool) -> Theme {
    match saved.map(Theme::from_str) {
        Some(Ok(theme)) => theme,
        _ if prefers_dark => Theme::Dark,
        _ => Theme::Light,
    }
}

#[derive(Debug)]
pub struct ThemePreference<S: ThemeStore> {
    store: S,
    theme: Theme,
}

impl<S: ThemeStore> ThemePreference<S> {
    pub fn load(store: S, prefers_dark: bool) -> Self {
        let theme = resolve_initial(store.load().as_deref(), prefers_dark);
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flips the theme and persists it. The in-memory value changes even when
    /// the store refuses the write.
    pub fn toggle(&mut self) -> Result<Theme, ThemeError> {
        self.set(self.theme.toggled())
    }

    pub fn set(&mut self, theme: Theme) -> Result<Theme, ThemeError> {
        self.theme = theme;
        self.store.save(theme)?;
        Ok(theme)
    }
}
