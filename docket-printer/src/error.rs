//! Error types for printer discovery, selection and transport

use crate::types::ConnectionKind;
use docket_escpos::EncodeError;
use thiserror::Error;

pub type PrinterResult<T> = Result<T, PrinterError>;

#[derive(Debug, Error)]
pub enum PrinterError {
    /// Payload could not be encoded (validation or code page failure)
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The platform enumeration facility itself failed
    #[error("Discovery failed: {0}")]
    Discovery(String),

    /// A printer was named that the current snapshot does not contain
    #[error("Printer not found: {0}")]
    NotFound(String),

    /// A hardware operation was attempted with no selection in place
    #[error("No printer selected")]
    NoPrinterSelected,

    /// The send or status channel failed; carries the channel and OS detail
    #[error("Transport failure ({kind}): {detail}")]
    Transport {
        kind: ConnectionKind,
        detail: String,
    },
}

impl PrinterError {
    /// Stable discriminant for wire-level error relaying
    pub fn kind(&self) -> &'static str {
        match self {
            PrinterError::Encode(e) => e.kind(),
            PrinterError::Discovery(_) => "discovery",
            PrinterError::NotFound(_) => "not_found",
            PrinterError::NoPrinterSelected => "no_printer_selected",
            PrinterError::Transport { .. } => "transport",
        }
    }
}
