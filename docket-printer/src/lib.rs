//! # docket-printer
//!
//! Thermal printer discovery, selection and transport for ESC/POS jobs.
//!
//! ## Scope
//!
//! This crate handles HOW bytes reach hardware:
//! - Platform discovery (Windows spooler, CUPS, raw device scan)
//! - Selection state and per-printer send serialization
//! - Transport channels: spooler, `lp`, TCP port 9100, device nodes
//! - Bounded status probes
//!
//! Byte generation (WHAT to print) lives in docket-escpos; this crate
//! only composes and ships it.
//!
//! ## Example
//!
//! ```ignore
//! use docket_printer::{PipelineOptions, PrintPipeline};
//!
//! let pipeline = PrintPipeline::new(PipelineOptions::default());
//!
//! // Pick a printer, send a receipt
//! pipeline.list_printers().await?;
//! pipeline.auto_select().await?;
//! pipeline
//!     .print_receipt(&lines, Some("Thank you!"), true)
//!     .await?;
//! ```

mod discovery;
mod error;
mod pipeline;
mod registry;
mod transport;
mod types;

// Re-exports
pub use discovery::{discover, filter_thermal};
pub use error::{PrinterError, PrinterResult};
pub use pipeline::PrintPipeline;
pub use registry::PrinterRegistry;
pub use transport::{
    dispatch, dispatch_status, CupsTransport, DeviceTransport, NetworkTransport, Transport,
    TransportConfig, DEFAULT_RAW_PORT,
};
pub use types::{
    ConnectionKind, OnlineState, PipelineOptions, PrinterDescriptor, PrinterStatus,
    PrinterSummary, SendStatus, TransportResult, DEFAULT_CONNECT_TIMEOUT, DEFAULT_STATUS_TIMEOUT,
};

#[cfg(windows)]
pub use transport::SpoolerTransport;
