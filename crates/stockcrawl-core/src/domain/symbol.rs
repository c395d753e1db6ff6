use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Uppercase ticker symbol. Used as a request parameter and a file-name key,
/// never interpreted beyond that: `^GSPC`, `BRK/B` and `BF B` are all valid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Trims and uppercases `input`. Only blank input is rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" aapl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "AAPL");
    }

    #[test]
    fn accepts_class_suffixes_and_leading_digits() {
        assert_eq!(Symbol::parse("brk.b").expect("valid").as_str(), "BRK.B");
        assert_eq!(Symbol::parse("0700.HK").expect("valid").as_str(), "0700.HK");
    }

    #[test]
    fn index_and_share_class_tickers_are_kept_verbatim() {
        for (input, expected) in [
            ("^gspc", "^GSPC"),
            ("BRK/B", "BRK/B"),
            (" bf b ", "BF B"),
            ("VERYLONGTICKERNAME", "VERYLONGTICKERNAME"),
        ] {
            assert_eq!(Symbol::parse(input).expect("valid").as_str(), expected);
        }
    }

    #[test]
    fn rejects_only_blank_input() {
        assert_eq!(Symbol::parse(""), Err(ValidationError::EmptySymbol));
        assert_eq!(Symbol::parse(" \t "), Err(ValidationError::EmptySymbol));
    }
}
