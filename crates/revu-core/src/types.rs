//! Shared diff and identifier types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The pane a rendered diff line belongs to.
///
/// `Left` is the base revision, `Right` the patch revision. Sides are
/// compared by value everywhere; the string tokens exist only at the
/// markup boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Base revision pane.
    Left,
    /// Patch revision pane.
    Right,
}

impl Side {
    /// The attribute/class token used for this side in rendered markup.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a valid side token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid side: {0}")]
pub struct ParseSideError(String);

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ParseSideError(other.to_string())),
        }
    }
}

/// Classification of one rendered diff row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineType {
    /// Present only in the patch revision.
    Add,
    /// Present only in the base revision.
    Remove,
    /// Unchanged, present in both revisions.
    Both,
    /// Filler row with no content on this side.
    Blank,
}

/// Descriptor for one rendered row of a file comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Row classification.
    pub line_type: DiffLineType,
    /// 1-based line number in the base revision, if the row exists there.
    pub before_number: Option<u32>,
    /// 1-based line number in the patch revision, if the row exists there.
    pub after_number: Option<u32>,
    /// Rendered text of the row.
    pub text: String,
}

impl DiffLine {
    /// A filler row carrying no content.
    #[must_use]
    pub fn blank() -> Self {
        Self {
            line_type: DiffLineType::Blank,
            before_number: None,
            after_number: None,
            text: String::new(),
        }
    }
}

/// Opaque change identifier (e.g. `I0123abc...`).
///
/// No format validation is applied; identifiers are whatever the server
/// handed out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeId(String);

impl ChangeId {
    /// Wrap a raw identifier string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChangeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ChangeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_round_trips_through_tokens() {
        assert_eq!("left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!("right".parse::<Side>().unwrap(), Side::Right);
        assert_eq!(Side::Left.as_str(), "left");
        assert_eq!(Side::Right.to_string(), "right");
    }

    #[test]
    fn side_rejects_free_form_strings() {
        assert!("Left".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
        assert!("both".parse::<Side>().is_err());
    }

    #[test]
    fn side_serde_uses_lowercase_tokens() {
        assert_eq!(serde_json::to_string(&Side::Left).unwrap(), "\"left\"");
        let side: Side = serde_json::from_str("\"right\"").unwrap();
        assert_eq!(side, Side::Right);
    }

    #[test]
    fn blank_line_has_no_numbers() {
        let line = DiffLine::blank();
        assert_eq!(line.line_type, DiffLineType::Blank);
        assert!(line.before_number.is_none());
        assert!(line.after_number.is_none());
        assert!(line.text.is_empty());
    }

    #[test]
    fn change_id_is_opaque() {
        let id = ChangeId::new("I0123abc");
        assert_eq!(id.as_str(), "I0123abc");
        assert_eq!(id.to_string(), "I0123abc");
    }
}
