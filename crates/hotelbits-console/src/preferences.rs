//! Theme and density preferences.
//!
//! Stored next to the layout in the same [`SettingsStore`], under the
//! `theme` and `density` keys, as plain lowercase strings.

use std::fmt;
use std::str::FromStr;

use widget_board::SettingsStore;

/// Store key for the theme preference.
pub const THEME_KEY: &str = "theme";
/// Store key for the density preference.
pub const DENSITY_KEY: &str = "density";

/// Requested color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemePreference {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the terminal.
    #[default]
    System,
}

impl ThemePreference {
    /// Next value in the `t` key cycle: system, light, dark.
    pub fn next(self) -> Self {
        match self {
            ThemePreference::System => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::System,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

/// Spacing density.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Density {
    /// Padded panels.
    #[default]
    Comfortable,
    /// No panel padding.
    Compact,
}

impl Density {
    /// The other density.
    pub fn toggled(self) -> Self {
        match self {
            Density::Comfortable => Density::Compact,
            Density::Compact => Density::Comfortable,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Density::Comfortable => "comfortable",
            Density::Compact => "compact",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Density {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comfortable" => Ok(Density::Comfortable),
            "compact" => Ok(Density::Compact),
            other => Err(format!("unknown density: {other}")),
        }
    }
}

/// Concrete color mode after resolving [`ThemePreference::System`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Light background.
    Light,
    /// Dark background.
    Dark,
}

/// Resolves a preference against the terminal's own scheme.
pub fn resolve_mode(pref: ThemePreference, system_prefers_dark: bool) -> Mode {
    match pref {
        ThemePreference::Light => Mode::Light,
        ThemePreference::Dark => Mode::Dark,
        ThemePreference::System if system_prefers_dark => Mode::Dark,
        ThemePreference::System => Mode::Light,
    }
}

/// Whether the terminal advertises a dark background through `COLORFGBG`.
/// Terminals that don't set it are assumed dark.
pub fn system_prefers_dark() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| colorfgbg_is_dark(&v))
        .unwrap_or(true)
}

/// Reads a `COLORFGBG` value such as `15;0` or `0;default;15`.
///
/// The last field is the background palette index; 0-6 and 8 are dark.
pub fn colorfgbg_is_dark(value: &str) -> Option<bool> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    Some(matches!(background, 0..=6 | 8))
}

/// Both preferences as loaded from the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    /// Theme preference.
    pub theme: ThemePreference,
    /// Density preference.
    pub density: Density,
}

impl Preferences {
    /// Reads both keys. Absent, unknown or unreadable values fall back to the
    /// defaults.
    pub fn load<S: SettingsStore>(store: &S) -> Self {
        Self {
            theme: read_key(store, THEME_KEY),
            density: read_key(store, DENSITY_KEY),
        }
    }

    /// Writes the theme preference.
    pub fn save_theme<S: SettingsStore>(
        store: &mut S,
        theme: ThemePreference,
    ) -> widget_board::Result<()> {
        tracing::debug!("saving theme preference {theme}");
        store.set(THEME_KEY, theme.as_str())
    }

    /// Writes the density preference.
    pub fn save_density<S: SettingsStore>(
        store: &mut S,
        density: Density,
    ) -> widget_board::Result<()> {
        tracing::debug!("saving density preference {density}");
        store.set(DENSITY_KEY, density.as_str())
    }

    /// Effective color mode.
    pub fn mode(&self, system_prefers_dark: bool) -> Mode {
        resolve_mode(self.theme, system_prefers_dark)
    }
}

fn read_key<S, T>(store: &S, key: &str) -> T
where
    S: SettingsStore,
    T: FromStr<Err = String> + Default,
{
    match store.get(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            tracing::debug!("ignoring stored {key}: {e}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!("failed to read {key}: {e}");
            T::default()
        }
    }
}
