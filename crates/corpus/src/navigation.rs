use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Direction of travel through the reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}
impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Previous => "previous",
            Direction::Next => "next",
        }
    }
}
impl FromStr for Direction {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "p" | "prev" | "previous" | "back" => Self::Previous,
            "n" | "next" | "forward" => Self::Next,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "direction",
                value: format!("unknown direction: {}", s),
            }),
        })
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("next", Direction::Next)]
    #[case("N", Direction::Next)]
    #[case(" forward ", Direction::Next)]
    #[case("previous", Direction::Previous)]
    #[case("Prev", Direction::Previous)]
    #[case("back", Direction::Previous)]
    fn test_parse(#[case] input: &str, #[case] expected: Direction) {
        assert_eq!(input.parse::<Direction>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::ParseError { field: "direction", .. }));
    }
}
