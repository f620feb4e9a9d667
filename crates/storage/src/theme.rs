use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Light or dark presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
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

    /// The other theme.
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
impl FromStr for Theme {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "light" | "day" => Self::Light,
            "dark" | "night" => Self::Dark,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "theme",
                value: format!("unknown theme: {}", s),
            }),
        })
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("light", Theme::Light)]
    #[case("Dark", Theme::Dark)]
    #[case(" night ", Theme::Dark)]
    #[case("DAY", Theme::Light)]
    fn test_parse(#[case] input: &str, #[case] expected: Theme) {
        assert_eq!(input.parse::<Theme>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_toggled() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::default(), Theme::Light);
    }
}
