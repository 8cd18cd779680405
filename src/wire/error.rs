use std::fmt;

use thiserror::Error;

use super::WireType;

/// Failure while writing a message into a wire buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("insufficient buffer capacity (required: {required}, remaining: {remaining})")]
    InsufficientCapacity { required: usize, remaining: usize },
    #[error("{message} encodes to {size} bytes, over the {limit} byte limit")]
    TooLarge {
        message: &'static str,
        size: usize,
        limit: usize,
    },
}

/// What went wrong while reading a wire buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("buffer ended inside a field")]
    Truncated,
    #[error("varint longer than 64 bits")]
    VarintOverflow,
    #[error("invalid field key {0}")]
    InvalidKey(u64),
    #[error("field tag 0 is reserved")]
    InvalidTag,
    #[error("unsupported wire type {0}")]
    UnsupportedWireType(u64),
    #[error("expected wire type {expected:?}, found {actual:?}")]
    WireTypeMismatch { expected: WireType, actual: WireType },
    #[error("string field is not valid UTF-8")]
    InvalidUtf8,
    #[error("nested length overruns the enclosing message")]
    LengthOverrun,
    #[error("message nesting exceeds the recursion limit")]
    RecursionLimit,
}

/// A decode failure together with the field path that led to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    kind: DecodeErrorKind,
    /// (message, field) pairs, innermost first.
    stack: Vec<(&'static str, &'static str)>,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind) -> Self {
        DecodeError {
            kind,
            stack: Vec::new(),
        }
    }

    pub fn kind(&self) -> DecodeErrorKind {
        self.kind
    }

    pub fn path(&self) -> &[(&'static str, &'static str)] {
        &self.stack
    }

    /// Records that the failure happened while decoding `message.field`.
    pub fn within(mut self, message: &'static str, field: &'static str) -> Self {
        self.stack.push((message, field));
        self
    }
}

impl From<DecodeErrorKind> for DecodeError {
    fn from(kind: DecodeErrorKind) -> Self {
        DecodeError::new(kind)
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "failed to decode message: ")?;
        for (message, field) in self.stack.iter().rev() {
            write!(f, "{}.{}: ", message, field)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for DecodeError {}
