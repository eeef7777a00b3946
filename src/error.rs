use thiserror::Error;

/// Why a decoder stopped before the end of its buffer.
///
/// Both variants are terminal for the file being decoded: entries produced
/// before the error are kept, nothing after it is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A field declared more bytes than the buffer still holds.
    #[error("truncated at offset {offset:#x}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// An index or length value is outside of its valid range.
    #[error("invalid structure at offset {offset:#x}: {reason}")]
    StructuralInvalid { offset: usize, reason: String },
}

impl DecodeError {
    pub fn structural(offset: usize, reason: impl Into<String>) -> Self {
        DecodeError::StructuralInvalid {
            offset,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
