/// Convenience result type used across svgmorph.
pub type SvgMorphResult<T> = Result<T, SvgMorphError>;

/// Top-level error taxonomy used by parser, driver and collaborator APIs.
///
/// Every variant aborts the operation that produced it before any displayed state changes.
/// Element-level problems are not errors; see [`ParseWarning`].
#[derive(thiserror::Error, Debug)]
pub enum SvgMorphError {
    /// Document-level structural failure (malformed XML, missing root or view box).
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid caller-provided input (durations, morph windows).
    #[error("validation error: {0}")]
    Validation(String),

    /// The markup rendering collaborator failed to produce a document.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgMorphError {
    /// Build a [`SvgMorphError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`SvgMorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SvgMorphError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SvgMorphError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

/// Non-fatal, element-level parse problem. The element is skipped (or the attribute
/// ignored) and parsing continues with the rest of the document.
#[derive(thiserror::Error, Clone, Debug, PartialEq, serde::Serialize)]
pub enum ParseWarning {
    /// A `<path>` without `d` data.
    #[error("blank path data at '{id}'")]
    MissingPathData {
        /// Element id, or empty when the element has none.
        id: String,
    },

    /// A `<path>` whose data could not be parsed or bounded.
    #[error("invalid path data at '{id}': {reason}")]
    InvalidPathData {
        /// Element id, or empty when the element has none.
        id: String,
        /// Parser message.
        reason: String,
    },

    /// A `<rect>` with missing or non-finite width/height.
    #[error("invalid rect size at '{id}'")]
    InvalidRectSize {
        /// Element id, or empty when the element has none.
        id: String,
    },

    /// A reference element whose target id does not exist.
    #[error("unresolved reference '{href}'")]
    UnresolvedReference {
        /// Raw href value.
        href: String,
    },

    /// A reference element that (transitively) references itself.
    #[error("reference cycle through '{href}'")]
    ReferenceCycle {
        /// Raw href value.
        href: String,
    },

    /// A `transform` attribute that could not be parsed; identity is used instead.
    #[error("invalid transform '{value}'")]
    InvalidTransform {
        /// Raw attribute value.
        value: String,
    },

    /// A paint value (`fill`/`stroke`) that is not a recognized color.
    #[error("unrecognized paint '{value}'")]
    InvalidPaint {
        /// Raw attribute value.
        value: String,
    },
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
