//! Error types for the protocol layer

use thiserror::Error;

/// Encoder and builder error types
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Payload violates a symbology or parameter constraint
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Character has no representation in the target code page
    #[error("Character '{ch}' (U+{codepoint:04X}) has no {code_page} representation")]
    Encoding {
        ch: char,
        codepoint: u32,
        code_page: &'static str,
    },
}

impl EncodeError {
    /// Stable discriminant for boundary consumers
    pub fn kind(&self) -> &'static str {
        match self {
            EncodeError::Validation(_) => "validation",
            EncodeError::Encoding { .. } => "encoding",
        }
    }

    pub(crate) fn unencodable(ch: char, code_page: &'static str) -> Self {
        EncodeError::Encoding {
            ch,
            codepoint: ch as u32,
            code_page,
        }
    }
}

/// Result type for encoder operations
pub type EncodeResult<T> = Result<T, EncodeError>;
