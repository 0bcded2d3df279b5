use crate::dsl::annotation::AnnotationFormatError;
use crate::dsl::time::{Time, TimeParseError};

/// Convenience result type used across vidfilter.
pub type VidfilterResult<T> = Result<T, VidfilterError>;

/// Which time field of an action a [`VidfilterError::Time`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeField {
    /// The segment start.
    Start,
    /// The segment end.
    End,
}

impl std::fmt::Display for TimeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Stable discriminant for [`VidfilterError`], handy for tests and embedders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Impossible lexer transition.
    Lex,
    /// Verb not in the `cut`/`mute` vocabulary.
    UnrecognizedVerb,
    /// Bad start or end time literal.
    Time,
    /// Bad annotation.
    Annotation,
    /// More than four tokens on one line.
    UnexpectedTokenCount,
    /// `end < start` inside one action.
    OutOfOrderWithinAction,
    /// Action shorter than the threshold.
    SegmentTooShort,
    /// Action starts before the previous one ends.
    OutOfOrderAcrossActions,
    /// Gap between two actions below the threshold.
    OverlapOrAdjacent,
    /// Nothing to compile.
    EmptyActionList,
    /// Verb the graph compiler has no lowering for.
    UnsupportedVerb,
    /// ffmpeg invocation failed.
    Encode,
    /// Wrapped lower-level error.
    Other,
}

/// Top-level error taxonomy used by every stage.
///
/// All variants are terminal for a run. Line numbers are 1-based; columns are 1-based
/// character indexes of the offending token.
#[derive(thiserror::Error, Debug)]
pub enum VidfilterError {
    /// Token stream the action builder cannot group (e.g. an empty group).
    #[error("lex error: line {line}: {message}")]
    Lex {
        /// Source line, or 0 when there is no token to point at.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// First token of a line is not a known verb.
    #[error("unrecognized verb: line {line}:{column}: '{verb}'")]
    UnrecognizedVerb {
        /// Source line.
        line: usize,
        /// Column of the verb token.
        column: usize,
        /// Raw verb text.
        verb: String,
    },

    /// Start or end time failed to parse.
    #[error("invalid {field} time: line {line}:{column}: {source}")]
    Time {
        /// Source line.
        line: usize,
        /// Column of the time token.
        column: usize,
        /// Start or end.
        field: TimeField,
        /// Parser failure.
        #[source]
        source: TimeParseError,
    },

    /// Annotation failed to parse.
    #[error("invalid annotation: line {line}:{column}: {source}")]
    Annotation {
        /// Source line.
        line: usize,
        /// Column of the annotation token.
        column: usize,
        /// Parser failure.
        #[source]
        source: AnnotationFormatError,
    },

    /// A line carried more tokens than verb, start, end and annotation.
    #[error("unexpected token count: line {line}:{column}: already have {count} tokens")]
    UnexpectedTokenCount {
        /// Source line.
        line: usize,
        /// Column of the surplus token.
        column: usize,
        /// Tokens already consumed for the line.
        count: usize,
    },

    /// End time precedes start time within one action.
    #[error(
        "out of order: line {line}: end time {end} ({}s) comes before start time {start} ({}s)",
        .end.total_seconds(),
        .start.total_seconds()
    )]
    OutOfOrderWithinAction {
        /// Source line.
        line: usize,
        /// Parsed start.
        start: Time,
        /// Parsed end.
        end: Time,
    },

    /// Action is shorter than the minimum segment length.
    #[error(
        "segment too short: line {line}: start time {}s and end time {}s are within {threshold}s of each other",
        .start.total_seconds(),
        .end.total_seconds()
    )]
    SegmentTooShort {
        /// Source line.
        line: usize,
        /// Parsed start.
        start: Time,
        /// Parsed end.
        end: Time,
        /// Minimum length in seconds.
        threshold: f64,
    },

    /// Action starts before the previous action ends.
    #[error("out of order: lines {prev_line}-{line}: segments are out of order")]
    OutOfOrderAcrossActions {
        /// Line of the earlier action.
        prev_line: usize,
        /// Line of the offending action.
        line: usize,
    },

    /// Gap between consecutive actions is below the minimum.
    #[error("overlap: lines {prev_line}-{line}: segments overlap or are too close")]
    OverlapOrAdjacent {
        /// Line of the earlier action.
        prev_line: usize,
        /// Line of the offending action.
        line: usize,
    },

    /// The filter script contained no actions.
    #[error("empty action list: no actions to perform")]
    EmptyActionList,

    /// The graph compiler met a verb it cannot lower.
    #[error("unsupported verb: action {index}: '{verb}'")]
    UnsupportedVerb {
        /// Index of the action in the list.
        index: usize,
        /// Verb name.
        verb: String,
    },

    /// Running the external ffmpeg binary failed.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VidfilterError {
    /// Build a [`VidfilterError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Stable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex { .. } => ErrorKind::Lex,
            Self::UnrecognizedVerb { .. } => ErrorKind::UnrecognizedVerb,
            Self::Time { .. } => ErrorKind::Time,
            Self::Annotation { .. } => ErrorKind::Annotation,
            Self::UnexpectedTokenCount { .. } => ErrorKind::UnexpectedTokenCount,
            Self::OutOfOrderWithinAction { .. } => ErrorKind::OutOfOrderWithinAction,
            Self::SegmentTooShort { .. } => ErrorKind::SegmentTooShort,
            Self::OutOfOrderAcrossActions { .. } => ErrorKind::OutOfOrderAcrossActions,
            Self::OverlapOrAdjacent { .. } => ErrorKind::OverlapOrAdjacent,
            Self::EmptyActionList => ErrorKind::EmptyActionList,
            Self::UnsupportedVerb { .. } => ErrorKind::UnsupportedVerb,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Primary source line the error points at, if any.
    ///
    /// For errors spanning two actions this is the later one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Lex { line, .. }
            | Self::UnrecognizedVerb { line, .. }
            | Self::Time { line, .. }
            | Self::Annotation { line, .. }
            | Self::UnexpectedTokenCount { line, .. }
            | Self::OutOfOrderWithinAction { line, .. }
            | Self::SegmentTooShort { line, .. }
            | Self::OutOfOrderAcrossActions { line, .. }
            | Self::OverlapOrAdjacent { line, .. } => Some(*line),
            Self::EmptyActionList
            | Self::UnsupportedVerb { .. }
            | Self::Encode(_)
            | Self::Other(_) => None,
        }
    }

    /// Source column for token-level errors.
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::UnrecognizedVerb { column, .. }
            | Self::Time { column, .. }
            | Self::Annotation { column, .. }
            | Self::UnexpectedTokenCount { column, .. } => Some(*column),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
