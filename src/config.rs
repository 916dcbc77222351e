//! Inputs of the action, validated before any issue is touched.
use itertools::Itertools;
use thiserror::Error;

use crate::labels::{DirectivePattern, LabelPattern};
use crate::utils::offset::{Offset, OffsetParseError};

/// Invalid configuration. It is reported as-is, no input ever falls back to a default after it
/// failed to parse.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("`{input}` must be one of [{expected}], but got '{got}'")]
    InvalidChoice {
        input: &'static str,
        expected: String,
        got: String,
    },
    #[error("Invalid label pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("Label pattern `{pattern}` must capture a checkbox mark and a label name, but it has {groups} capture group(s)")]
    MissingCaptureGroups { pattern: String, groups: usize },
    #[error("Invalid offset: {0}")]
    InvalidOffset(#[from] OffsetParseError),
    #[error("Missing input `{0}`")]
    MissingInput(&'static str),
    #[error("Invalid repository `{0}`, expected `<owner>/<name>`")]
    InvalidRepository(String),
}

/// An input that accepts one value out of a closed set.
pub trait InputChoice: Sized + Copy + 'static {
    /// Name of the input, used in error messages.
    const INPUT: &'static str;
    /// Accepted values and their meaning.
    const CHOICES: &'static [(&'static str, Self)];
}

/// Parses `value` into one of the choices of `T`.
pub fn parse_choice<T: InputChoice>(value: &str) -> Result<T, ConfigError> {
    T::CHOICES
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, choice)| *choice)
        .ok_or_else(|| ConfigError::InvalidChoice {
            input: T::INPUT,
            expected: T::CHOICES
                .iter()
                .map(|(name, _)| format!("'{name}'"))
                .join(", "),
            got: value.to_string(),
        })
}

/// Should debug output be suppressed?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Quiet {
    True,
    #[default]
    False,
}

impl Quiet {
    pub fn is_quiet(self) -> bool {
        self == Quiet::True
    }
}

impl InputChoice for Quiet {
    const INPUT: &'static str = "quiet";
    const CHOICES: &'static [(&'static str, Self)] =
        &[("true", Quiet::True), ("false", Quiet::False)];
}

/// Validated inputs of a single run.
#[derive(Debug)]
pub struct ActionConfig {
    pub label_pattern: LabelPattern,
    pub pattern: DirectivePattern,
    pub quiet: Quiet,
    offset: Option<Offset>,
}

impl ActionConfig {
    /// Validates raw action inputs. Empty optional inputs count as missing, since that is how
    /// GitHub Actions passes inputs that were not set.
    pub fn from_inputs(
        label_pattern: &str,
        quiet: Option<&str>,
        offset: Option<&str>,
    ) -> Result<Self, ConfigError> {
        if label_pattern.trim().is_empty() {
            return Err(ConfigError::MissingInput("label-pattern"));
        }
        let label_pattern = LabelPattern::from_input(label_pattern);
        let pattern = DirectivePattern::compile(&label_pattern)?;

        let quiet = match non_empty(quiet) {
            Some(quiet) => parse_choice(quiet)?,
            None => Quiet::default(),
        };
        let offset = non_empty(offset).map(str::parse::<Offset>).transpose()?;

        Ok(Self {
            label_pattern,
            pattern,
            quiet,
            offset,
        })
    }

    /// How far back a scheduled scan looks. Only scheduled runs require it.
    pub fn offset(&self) -> Result<Offset, ConfigError> {
        self.offset.ok_or(ConfigError::MissingInput("offset"))
    }
}

fn non_empty(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|input| !input.is_empty())
}
