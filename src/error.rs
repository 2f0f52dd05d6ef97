use thiserror::Error;

/// Byte range into the parsed source, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub const fn from_range(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    #[error("invalid token")]
    InvalidToken,
    #[error("unterminated comment")]
    UnterminatedComment,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// A syntax error, positioned relative to the caller's input
/// (the synthesized `package` header is not counted).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    /// Builds an error from an offset into `input`. Offsets past the end
    /// are clamped to the end of input.
    pub fn at(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..floor_char_boundary(input, offset)];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(nl) => before[nl + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),
    #[error("failed to serialize model: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("result is required")]
    MissingResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_is_one_based() {
        let err = ParseError::at("type a\ninterface {", 7, "boom");
        assert_eq!((err.line, err.column), (2, 1));
        assert_eq!(err.to_string(), "2:1: boom");
    }

    #[test]
    fn position_clamps_past_end() {
        let err = ParseError::at("abc", 99, "eof");
        assert_eq!((err.line, err.column), (1, 4));
    }
}
