//! The localized entry type shared by parsing, tables, and output.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One `source = translation` record from a `.strings` file, with an
/// optional block comment.
///
/// The source string is the identity key of the entry and is never empty;
/// construction enforces this. The stored translation may be empty, in which
/// case [`effective_translation`](LocalizedString::effective_translation)
/// falls back to the source text. Serialization always writes the raw stored
/// translation, so an untranslated entry renders as `"key" = "";`.
///
/// Two entries are equal iff source, raw stored translation, and comment all
/// match exactly (no fallback applied during comparison).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLocalizedString")]
pub struct LocalizedString {
    source: String,
    translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
}

/// Unvalidated mirror used to funnel deserialization through [`LocalizedString::new`].
#[derive(Deserialize)]
struct RawLocalizedString {
    source: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    comment: Option<String>,
}

impl TryFrom<RawLocalizedString> for LocalizedString {
    type Error = Error;

    fn try_from(raw: RawLocalizedString) -> Result<Self, Self::Error> {
        LocalizedString::new(raw.source, Some(raw.translation), raw.comment)
    }
}

impl LocalizedString {
    /// Creates a new entry.
    ///
    /// Returns [`Error::EmptySource`] if `source` is empty. A `None` (or
    /// empty) translation is stored as the empty string, meaning
    /// "not translated yet".
    pub fn new(
        source: impl Into<String>,
        translation: Option<String>,
        comment: Option<String>,
    ) -> Result<Self, Error> {
        let source = source.into();
        if source.is_empty() {
            return Err(Error::EmptySource);
        }
        Ok(Self {
            source,
            translation: translation.unwrap_or_default(),
            comment,
        })
    }

    /// The source string, i.e. the lookup key.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The raw stored translation. Empty if the entry is not translated.
    pub fn translation(&self) -> &str {
        &self.translation
    }

    /// The stored translation if non-empty, otherwise the source string.
    ///
    /// This is the display value format-agnostic consumers should use;
    /// serialization uses the raw value instead.
    pub fn effective_translation(&self) -> &str {
        if self.translation.is_empty() {
            &self.source
        } else {
            &self.translation
        }
    }

    pub fn set_translation(&mut self, translation: impl Into<String>) {
        self.translation = translation.into();
    }

    /// Whether a non-empty translation is stored.
    pub fn is_translated(&self) -> bool {
        !self.translation.is_empty()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }
}

/// Renders the exact on-disk form: an optional `/* comment */` line followed
/// by `"source" = "translation";`, with `"` escaped as `\"` in both quoted
/// parts. The raw stored translation is written, not the effective one.
impl Display for LocalizedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(comment) = &self.comment {
            writeln!(f, "/* {} */", comment)?;
        }
        write!(
            f,
            "\"{}\" = \"{}\";",
            escape_quotes(&self.source),
            escape_quotes(&self.translation)
        )
    }
}

/// Precedes every literal `"` with a backslash. No other characters are
/// escaped in the `.strings` text format.
pub(crate) fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}
