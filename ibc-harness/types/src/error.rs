//! Error types for parsing and constructing harness domain values.

use displaydoc::Display;

/// Errors that arise when parsing identifiers.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// id `{id}` has invalid length; must be between `{min}` and `{max}` characters
    InvalidLength { id: String, min: u64, max: u64 },
    /// id `{id}` can only contain alphanumeric characters or `.`, `_`, `+`, `-`, `#`, `[`, `]`, `<`, `>`
    InvalidCharacter { id: String },
    /// invalid prefix: `{prefix}`
    InvalidPrefix { prefix: String },
    /// role key `{key}` must be upper-case alphanumerics or `_` and must not start with a digit
    InvalidRoleKey { key: String },
    /// unknown {kind} `{value}`; expected one of: {expected}
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Errors that arise when constructing heights.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum HeightError {
    /// revision height cannot be zero
    ZeroRevisionHeight,
}

/// Errors that arise when building a packet for dispatch.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// packet has neither a timeout height nor a timeout timestamp
    MissingTimeout,
}

/// Errors that arise when building or parsing an address record.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// role `{role}` appears more than once
    DuplicateRole { role: String },
    /// malformed line {line}: `{description}`
    MalformedLine { line: usize, description: String },
    /// identifier error: `{0}`
    Identifier(IdentifierError),
}

impl From<IdentifierError> for RecordError {
    fn from(e: IdentifierError) -> Self {
        Self::Identifier(e)
    }
}

impl std::error::Error for IdentifierError {}

impl std::error::Error for HeightError {}

impl std::error::Error for PacketError {}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Identifier(e) => Some(e),
            _ => None,
        }
    }
}
