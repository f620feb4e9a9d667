//! Preference CLI Helpers

use crate::error::{Error, ErrorKind};
use crate::{Preferences, Theme};
use std::str::FromStr;

/// Optional positional argument; omitted means "show the current value".
pub type Flag = Option<String>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FontAdjustment {
    Increase,
    Decrease,
    Reset,
    /// Explicit size, clamped when applied
    Set(u32),
    Show,
}
impl FromStr for FontAdjustment {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "increase" | "inc" | "+" => Self::Increase,
            "decrease" | "dec" | "-" => Self::Decrease,
            "reset" | "default" => Self::Reset,
            other => match other.parse::<u32>() {
                Ok(size) => Self::Set(size),
                Err(_) => exn::bail!(ErrorKind::ParseError {
                    field: "font size",
                    value: s.to_string(),
                }),
            },
        })
    }
}
impl TryFrom<Flag> for FontAdjustment {
    type Error = Error;
    fn try_from(value: Flag) -> Result<Self, Self::Error> {
        match value {
            Some(s) if s.trim().is_empty() => Ok(Self::Show),
            Some(s) => Self::from_str(&s),
            None => Ok(Self::Show),
        }
    }
}
impl FontAdjustment {
    /// Apply to `preferences`, returning the font size now in effect.
    pub fn apply(&self, preferences: &Preferences) -> u32 {
        match self {
            Self::Increase => preferences.increase_font_size(),
            Self::Decrease => preferences.decrease_font_size(),
            Self::Reset => preferences.reset_font_size(),
            Self::Set(size) => preferences.set_font_size(*size),
            Self::Show => preferences.font_size(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ThemeChoice {
    Toggle,
    Explicit(Theme),
    Show,
}
impl TryFrom<Flag> for ThemeChoice {
    type Error = Error;
    fn try_from(value: Flag) -> Result<Self, Self::Error> {
        match value {
            Some(s) if s.trim().eq_ignore_ascii_case("toggle") => Ok(Self::Toggle),
            Some(s) if s.trim().is_empty() => Ok(Self::Show),
            Some(s) => Ok(Self::Explicit(Theme::from_str(&s)?)),
            None => Ok(Self::Show),
        }
    }
}
impl ThemeChoice {
    pub fn apply(&self, preferences: &Preferences) -> Theme {
        match self {
            Self::Toggle => preferences.toggle_theme(),
            Self::Explicit(theme) => {
                preferences.set_theme(*theme);
                *theme
            },
            Self::Show => preferences.theme(),
        }
    }
}
