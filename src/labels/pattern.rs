//! Textual syntaxes for writing a label directive.
//!
//! Every pattern captures the checkbox mark in group 1 and the label name in group 2.
use std::fmt::{Display, Formatter};

use regex::Regex;

use crate::config::ConfigError;
use crate::labels::{extract_directives, Directive};

/// Matches ``- [ ] `abc` ...``
pub const BACKTICK: &str = r"- \[(.*?)\] ?`(.+?)`";
/// Matches `- [ ] abc: ...`
pub const COLON: &str = r"- \[(.*?)\] ?(.+?):";
/// Matches `- [ ] *abc* ...`
pub const ASTERISK: &str = r"- \[(.*?)\] ?\*(.+?)\*";
/// Matches `- [ ] **abc** ...`
pub const DOUBLE_ASTERISK: &str = r"- \[(.*?)\] ?\*\*(.+?)\*\*";

/// How label directives are written in a description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LabelPattern {
    Backtick,
    Colon,
    Asterisk,
    DoubleAsterisk,
    /// A user supplied regular expression with the same two capture groups as the built-ins.
    Custom(String),
}

impl LabelPattern {
    /// Resolves an action input into a pattern.
    ///
    /// Names of the built-in patterns are matched case-insensitively, anything else is taken as a
    /// custom regular expression.
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "backtick" => Self::Backtick,
            "colon" => Self::Colon,
            "asterisk" => Self::Asterisk,
            "double-asterisk" | "double_asterisk" => Self::DoubleAsterisk,
            _ => Self::Custom(input.to_string()),
        }
    }

    pub fn as_regex(&self) -> &str {
        match self {
            Self::Backtick => BACKTICK,
            Self::Colon => COLON,
            Self::Asterisk => ASTERISK,
            Self::DoubleAsterisk => DOUBLE_ASTERISK,
            Self::Custom(pattern) => pattern,
        }
    }
}

impl Display for LabelPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backtick => f.write_str("backtick"),
            Self::Colon => f.write_str("colon"),
            Self::Asterisk => f.write_str("asterisk"),
            Self::DoubleAsterisk => f.write_str("double-asterisk"),
            Self::Custom(pattern) => write!(f, "custom ({pattern})"),
        }
    }
}

/// A compiled [`LabelPattern`], ready to be matched against descriptions.
#[derive(Clone, Debug)]
pub struct DirectivePattern {
    regex: Regex,
}

impl DirectivePattern {
    pub fn compile(pattern: &LabelPattern) -> Result<Self, ConfigError> {
        let source = pattern.as_regex();
        let regex = Regex::new(source).map_err(|error| ConfigError::InvalidPattern {
            pattern: source.to_string(),
            source: error,
        })?;

        // `captures_len` includes the implicit group of the whole match.
        let groups = regex.captures_len() - 1;
        if groups < 2 {
            return Err(ConfigError::MissingCaptureGroups {
                pattern: source.to_string(),
                groups,
            });
        }
        Ok(Self { regex })
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn extract(&self, description: &str) -> Vec<Directive> {
        extract_directives(description, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks that the pattern captures `(mark, name)` for each input.
    fn check_captures(pattern: &str, cases: &[(&str, &str, &str)]) {
        let regex = Regex::new(pattern).unwrap();
        for (input, mark, name) in cases {
            let captures = regex
                .captures(input)
                .unwrap_or_else(|| panic!("`{input}` did not match {pattern}"));
            assert_eq!(&captures[1], *mark, "mark of `{input}`");
            assert_eq!(&captures[2], *name, "name of `{input}`");
        }
    }

    #[test]
    fn backtick() {
        check_captures(
            BACKTICK,
            &[
                ("- [] `abc`", "", "abc"),
                ("- [ ] `abc`", " ", "abc"),
                ("- [  ] `abc`", "  ", "abc"),
                ("- [x] `abc`", "x", "abc"),
                ("- [ x] `abc`", " x", "abc"),
                ("- [x ] `abc`", "x ", "abc"),
                ("- [ x ] `abc`", " x ", "abc"),
            ],
        );
    }

    #[test]
    fn colon() {
        check_captures(
            COLON,
            &[
                ("- [] abc:", "", "abc"),
                ("- [ ] abc:", " ", "abc"),
                ("- [  ] abc:", "  ", "abc"),
                ("- [x] abc:", "x", "abc"),
                ("- [ x] abc:", " x", "abc"),
                ("- [x ] abc:", "x ", "abc"),
                ("- [ x ] abc: description", " x ", "abc"),
            ],
        );
    }

    #[test]
    fn asterisk() {
        check_captures(
            ASTERISK,
            &[
                ("- [] *abc*", "", "abc"),
                ("- [ ] *abc*", " ", "abc"),
                ("- [  ] *abc*", "  ", "abc"),
                ("- [x] *abc*", "x", "abc"),
                ("- [ x] *abc*", " x", "abc"),
                ("- [x ] *abc*", "x ", "abc"),
                ("- [ x ] *abc*", " x ", "abc"),
            ],
        );
    }

    #[test]
    fn double_asterisk() {
        check_captures(
            DOUBLE_ASTERISK,
            &[
                // The lazy name stops at the first closing `**`.
                ("- [] **abc***", "", "abc"),
                ("- [ ] **abc**", " ", "abc"),
                ("- [  ] **abc**", "  ", "abc"),
                ("- [x] **abc**", "x", "abc"),
                ("- [ x] **abc**", " x", "abc"),
                ("- [x ] **abc**", "x ", "abc"),
                ("- [ x ] **abc**", " x ", "abc"),
            ],
        );
    }

    #[test]
    fn pattern_from_input() {
        assert_eq!(LabelPattern::from_input("backtick"), LabelPattern::Backtick);
        assert_eq!(LabelPattern::from_input("Colon"), LabelPattern::Colon);
        assert_eq!(LabelPattern::from_input("asterisk"), LabelPattern::Asterisk);
        assert_eq!(
            LabelPattern::from_input("double-asterisk"),
            LabelPattern::DoubleAsterisk
        );
        assert_eq!(
            LabelPattern::from_input(BACKTICK),
            LabelPattern::Custom(BACKTICK.to_string())
        );
    }

    #[test]
    fn compile_builtins() {
        for pattern in [
            LabelPattern::Backtick,
            LabelPattern::Colon,
            LabelPattern::Asterisk,
            LabelPattern::DoubleAsterisk,
        ] {
            assert!(DirectivePattern::compile(&pattern).is_ok(), "{pattern}");
        }
    }

    #[test]
    fn compile_custom() {
        let pattern = LabelPattern::Custom(r"\* \[(.*?)\] label:(\S+)".to_string());
        assert!(DirectivePattern::compile(&pattern).is_ok());
    }

    #[test]
    fn compile_invalid_regex() {
        let pattern = LabelPattern::Custom(r"- \[(.*?)\] `(.+?`".to_string());
        let error = DirectivePattern::compile(&pattern).unwrap_err();
        assert!(matches!(error, ConfigError::InvalidPattern { .. }));
        assert!(error.to_string().starts_with("Invalid label pattern"));
    }

    #[test]
    fn compile_missing_capture_groups() {
        let pattern = LabelPattern::Custom(r"- \[.*?\] `(.+?)`".to_string());
        let error = DirectivePattern::compile(&pattern).unwrap_err();
        insta::assert_snapshot!(error.to_string(), @"Label pattern `- \\[.*?\\] `(.+?)`` must capture a checkbox mark and a label name, but it has 1 capture group(s)");
    }
}
