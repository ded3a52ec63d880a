//! # docket-escpos
//!
//! ESC/POS command encoding - pure byte generation, no I/O.
//!
//! ## Scope
//!
//! This crate handles WHAT bytes a thermal printer receives:
//! - ESC/POS command constants and validation
//! - Code page text encoding (CP437, CP850, CP858, Windows-1252)
//! - Tagged command segments and print jobs
//! - Document composition (banners, tables, lists, receipts)
//!
//! Talking to actual hardware (spoolers, CUPS, sockets, device nodes)
//! lives in docket-printer.
//!
//! ## Example
//!
//! ```ignore
//! use docket_escpos::{encode, CutMode, DocumentBuilder, PrintJob};
//!
//! // Compose a receipt
//! let builder = DocumentBuilder::new(32);
//! let mut job = builder.banner("CAFE DOCKET", '*', None)?;
//! job.extend(builder.table(&rows)?);
//! job.push(encode::cut(CutMode::Full));
//!
//! // Hand the flat byte stream to a transport
//! let bytes = job.flatten();
//! ```

pub mod command;
mod codepage;
mod document;
pub mod encode;
mod error;
mod segment;

// Re-exports
pub use codepage::{Charset, CodePage};
pub use document::{DocumentBuilder, DEFAULT_WIDTH};
pub use encode::{BarcodeOptions, CutMode, DrawerPin, QrEcLevel, Symbology, TextStyle};
pub use error::{EncodeError, EncodeResult};
pub use segment::{CommandSegment, PrintJob, SegmentKind};
