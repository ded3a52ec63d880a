//! Transport channels: one way to move bytes per connection kind
//!
//! Send failures are reported in-band through [`TransportResult`] so the
//! pipeline can decide what a failure means; nothing here retries. Success
//! means the channel accepted the whole buffer, not that paper moved.

use crate::error::{PrinterError, PrinterResult};
use crate::types::{
    ConnectionKind, PipelineOptions, PrinterDescriptor, PrinterStatus, TransportResult,
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_STATUS_TIMEOUT,
};
use docket_escpos::command;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::process::Command;
use tracing::{info, instrument, warn};

/// JetDirect raw printing port, assumed when an address carries no port
pub const DEFAULT_RAW_PORT: u16 = 9100;

/// How long a raw device gets to answer a DLE EOT status request
const STATUS_REPLY_WINDOW: Duration = Duration::from_millis(500);

/// Timeout knobs shared by every channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Bound on connection establishment; sends themselves are unbounded
    pub connect_timeout: Duration,
    /// Bound on a whole status probe
    pub status_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            status_timeout: DEFAULT_STATUS_TIMEOUT,
        }
    }
}

impl From<&PipelineOptions> for TransportConfig {
    fn from(options: &PipelineOptions) -> Self {
        Self {
            connect_timeout: options.connect_timeout,
            status_timeout: options.status_timeout,
        }
    }
}

/// A single send/status channel
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Deliver one flattened job; failure is reported in-band
    async fn send(&self, printer: &PrinterDescriptor, bytes: &[u8]) -> TransportResult;

    /// Live status of the device behind this channel
    async fn query_status(&self, printer: &PrinterDescriptor) -> PrinterStatus;
}

/// Route one flattened job to the channel the descriptor names
#[instrument(skip(printer, bytes), fields(printer = %printer.name, kind = %printer.kind, len = bytes.len()))]
pub async fn dispatch(
    printer: &PrinterDescriptor,
    bytes: &[u8],
    config: &TransportConfig,
) -> TransportResult {
    match printer.kind {
        #[cfg(windows)]
        ConnectionKind::Spooler => SpoolerTransport.send(printer, bytes).await,
        #[cfg(not(windows))]
        ConnectionKind::Spooler => {
            TransportResult::failed("spooler transport is only available on Windows")
        }
        ConnectionKind::Cups => CupsTransport.send(printer, bytes).await,
        ConnectionKind::RawNetwork => {
            NetworkTransport::new(config.connect_timeout)
                .send(printer, bytes)
                .await
        }
        ConnectionKind::RawDevice => DeviceTransport.send(printer, bytes).await,
    }
}

/// Status probe for the descriptor's channel, bounded by the status timeout
pub async fn dispatch_status(
    printer: &PrinterDescriptor,
    config: &TransportConfig,
) -> PrinterStatus {
    let probe = async {
        match printer.kind {
            #[cfg(windows)]
            ConnectionKind::Spooler => SpoolerTransport.query_status(printer).await,
            #[cfg(not(windows))]
            ConnectionKind::Spooler => PrinterStatus::Unknown,
            ConnectionKind::Cups => CupsTransport.query_status(printer).await,
            ConnectionKind::RawNetwork => {
                NetworkTransport::new(config.connect_timeout)
                    .query_status(printer)
                    .await
            }
            ConnectionKind::RawDevice => DeviceTransport.query_status(printer).await,
        }
    };
    match tokio::time::timeout(config.status_timeout, probe).await {
        Ok(status) => status,
        Err(_) => {
            warn!(printer = %printer.name, "status probe timed out");
            PrinterStatus::Unknown
        }
    }
}

/// Convert a failed result into the typed error the pipeline returns
pub fn into_error(kind: ConnectionKind, result: &TransportResult) -> PrinterResult<()> {
    if result.is_ok() {
        return Ok(());
    }
    let detail = result
        .error_detail
        .clone()
        .unwrap_or_else(|| "transport failed without detail".to_string());
    Err(PrinterError::Transport { kind, detail })
}

// === CUPS ===

/// Sends through `lp -d NAME -o raw`, the portable CUPS path
pub struct CupsTransport;

impl Transport for CupsTransport {
    #[instrument(skip(self, printer, bytes), fields(printer = %printer.name, len = bytes.len()))]
    async fn send(&self, printer: &PrinterDescriptor, bytes: &[u8]) -> TransportResult {
        let file = match tempfile::NamedTempFile::new() {
            Ok(file) => file,
            Err(e) => return TransportResult::failed(format!("temp file: {e}")),
        };
        if let Err(e) = std::fs::write(file.path(), bytes) {
            return TransportResult::failed(format!("temp file write: {e}"));
        }

        let output = match Command::new("lp")
            .args(["-d", &printer.name, "-o", "raw"])
            .arg(file.path())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => return TransportResult::failed(format!("failed to run lp: {e}")),
        };
        // The temp file must outlive the command; lp reads it on submit
        drop(file);

        if output.status.success() {
            info!("job accepted by CUPS");
            TransportResult::ok(bytes.len())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            TransportResult::failed(format!("lp failed ({}): {}", output.status, stderr.trim()))
        }
    }

    async fn query_status(&self, printer: &PrinterDescriptor) -> PrinterStatus {
        let output = match Command::new("lpstat")
            .args(["-p", &printer.name])
            .output()
            .await
        {
            Ok(output) if output.status.success() => output,
            _ => return PrinterStatus::Unknown,
        };
        let text = String::from_utf8_lossy(&output.stdout).to_lowercase();
        if crate::discovery::FAILURE_KEYWORDS
            .iter()
            .any(|k| text.contains(k))
        {
            PrinterStatus::Offline
        } else if text.contains("disabled") {
            // Queue paused by an operator: jobs would sit, not print
            PrinterStatus::Error
        } else if text.contains("idle") || text.contains("printing") {
            PrinterStatus::Ready
        } else {
            PrinterStatus::Unknown
        }
    }
}

// === Raw Network ===

/// Direct TCP to the printer's raw port
pub struct NetworkTransport {
    connect_timeout: Duration,
}

impl NetworkTransport {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// `host:port` from the descriptor; a bare host gets the raw port
    fn target(printer: &PrinterDescriptor) -> String {
        let address = printer.address.as_deref().unwrap_or(&printer.name);
        if address.contains(':') {
            address.to_string()
        } else {
            format!("{address}:{DEFAULT_RAW_PORT}")
        }
    }
}

impl Default for NetworkTransport {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }
}

impl Transport for NetworkTransport {
    #[instrument(skip(self, printer, bytes), fields(printer = %printer.name, len = bytes.len()))]
    async fn send(&self, printer: &PrinterDescriptor, bytes: &[u8]) -> TransportResult {
        let target = Self::target(printer);

        let mut stream =
            match tokio::time::timeout(self.connect_timeout, TcpStream::connect(&target)).await {
                Ok(Ok(stream)) => stream,
                Ok(Err(e)) => return TransportResult::failed(format!("connect {target}: {e}")),
                Err(_) => {
                    return TransportResult::failed(format!(
                        "connect {target}: timed out after {:?}",
                        self.connect_timeout
                    ));
                }
            };

        if let Err(e) = stream.write_all(bytes).await {
            return TransportResult::failed(format!("write {target}: {e}"));
        }
        if let Err(e) = stream.flush().await {
            return TransportResult::failed(format!("flush {target}: {e}"));
        }
        let _ = stream.shutdown().await;

        info!("job sent");
        TransportResult::ok(bytes.len())
    }

    async fn query_status(&self, printer: &PrinterDescriptor) -> PrinterStatus {
        let target = Self::target(printer);
        let mut stream =
            match tokio::time::timeout(self.connect_timeout, TcpStream::connect(&target)).await {
                Ok(Ok(stream)) => stream,
                Ok(Err(_)) | Err(_) => return PrinterStatus::Offline,
            };

        // DLE EOT 1: one-byte real-time status reply, if the firmware speaks it
        if stream.write_all(&command::STATUS_PRINTER).await.is_err() {
            return PrinterStatus::Unknown;
        }
        let mut reply = [0u8; 1];
        match tokio::time::timeout(STATUS_REPLY_WINDOW, stream.read_exact(&mut reply)).await {
            Ok(Ok(_)) => {
                if reply[0] & command::STATUS_OFFLINE_BIT != 0 {
                    PrinterStatus::Offline
                } else {
                    PrinterStatus::Ready
                }
            }
            // Connection accepted but no reply: print servers often eat
            // status requests, so reachable is all we can claim
            _ => PrinterStatus::Unknown,
        }
    }
}

// === Raw Device ===

/// Writes straight to a local character device node
pub struct DeviceTransport;

impl DeviceTransport {
    fn path(printer: &PrinterDescriptor) -> String {
        printer
            .address
            .clone()
            .unwrap_or_else(|| printer.name.clone())
    }
}

impl Transport for DeviceTransport {
    #[instrument(skip(self, printer, bytes), fields(printer = %printer.name, len = bytes.len()))]
    async fn send(&self, printer: &PrinterDescriptor, bytes: &[u8]) -> TransportResult {
        let path = Self::path(printer);
        let mut file = match tokio::fs::OpenOptions::new().write(true).open(&path).await {
            Ok(file) => file,
            Err(e) => return TransportResult::failed(format!("open {path}: {e}")),
        };
        if let Err(e) = file.write_all(bytes).await {
            return TransportResult::failed(format!("write {path}: {e}"));
        }
        if let Err(e) = file.flush().await {
            return TransportResult::failed(format!("flush {path}: {e}"));
        }
        info!("job written to device");
        TransportResult::ok(bytes.len())
    }

    async fn query_status(&self, printer: &PrinterDescriptor) -> PrinterStatus {
        let path = Self::path(printer);
        match tokio::fs::metadata(&path).await {
            // The node exists; liveness would need an exclusive open
            Ok(_) => PrinterStatus::Unknown,
            Err(_) => PrinterStatus::Offline,
        }
    }
}

// === Windows Spooler ===

/// Raw-datatype job through the Windows print spooler
#[cfg(windows)]
pub struct SpoolerTransport;

#[cfg(windows)]
impl Transport for SpoolerTransport {
    #[instrument(skip(self, printer, bytes), fields(printer = %printer.name, len = bytes.len()))]
    async fn send(&self, printer: &PrinterDescriptor, bytes: &[u8]) -> TransportResult {
        // Win32 spooler calls are synchronous
        let name = printer.name.clone();
        let data = bytes.to_vec();
        match tokio::task::spawn_blocking(move || spooler::write_raw(&name, &data)).await {
            Ok(Ok(written)) => {
                info!("job accepted by spooler");
                TransportResult::ok(written)
            }
            Ok(Err(detail)) => TransportResult::failed(detail),
            Err(e) => TransportResult::failed(format!("print task failed: {e}")),
        }
    }

    async fn query_status(&self, printer: &PrinterDescriptor) -> PrinterStatus {
        let name = printer.name.clone();
        tokio::task::spawn_blocking(move || spooler::query_status(&name))
            .await
            .unwrap_or(PrinterStatus::Unknown)
    }
}

#[cfg(windows)]
mod spooler {
    use super::PrinterStatus;
    use core::ffi::c_void;
    use windows::core::{PCWSTR, PWSTR};
    use windows::Win32::Graphics::Printing::{
        ClosePrinter, EndDocPrinter, EndPagePrinter, GetPrinterW, OpenPrinterW, StartDocPrinterW,
        StartPagePrinter, WritePrinter, DOC_INFO_1W, PRINTER_HANDLE, PRINTER_INFO_6,
        PRINTER_STATUS_DOOR_OPEN, PRINTER_STATUS_ERROR, PRINTER_STATUS_OFFLINE,
        PRINTER_STATUS_PAPER_JAM, PRINTER_STATUS_PAPER_OUT,
    };

    fn to_wide(s: &str) -> Vec<u16> {
        s.encode_utf16().chain(std::iter::once(0)).collect()
    }

    /// OpenPrinter → StartDoc(RAW) → StartPage → Write → EndPage → EndDoc
    pub(super) fn write_raw(name: &str, data: &[u8]) -> Result<usize, String> {
        unsafe {
            let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
            let name_w = to_wide(name);

            OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None)
                .map_err(|e| format!("OpenPrinterW failed: {e}"))?;

            let doc_name_w = to_wide("Raw print job");
            let datatype_w = to_wide("RAW");
            let doc_info = DOC_INFO_1W {
                pDocName: PWSTR(doc_name_w.as_ptr() as *mut _),
                pOutputFile: PWSTR::null(),
                pDatatype: PWSTR(datatype_w.as_ptr() as *mut _),
            };

            if StartDocPrinterW(handle, 1, &doc_info as *const DOC_INFO_1W) == 0 {
                let _ = ClosePrinter(handle);
                return Err("StartDocPrinter failed".to_string());
            }
            if !StartPagePrinter(handle).as_bool() {
                let _ = EndDocPrinter(handle);
                let _ = ClosePrinter(handle);
                return Err("StartPagePrinter failed".to_string());
            }

            let mut written: u32 = 0;
            let ok = WritePrinter(
                handle,
                data.as_ptr() as *const c_void,
                data.len() as u32,
                &mut written,
            );

            let _ = EndPagePrinter(handle);
            let _ = EndDocPrinter(handle);
            let _ = ClosePrinter(handle);

            if !ok.as_bool() {
                return Err("WritePrinter failed".to_string());
            }
            if written != data.len() as u32 {
                return Err(format!(
                    "incomplete write: {written} of {} bytes accepted",
                    data.len()
                ));
            }
            Ok(written as usize)
        }
    }

    pub(super) fn query_status(name: &str) -> PrinterStatus {
        unsafe {
            let mut handle: PRINTER_HANDLE = PRINTER_HANDLE::default();
            let name_w = to_wide(name);
            if OpenPrinterW(PCWSTR::from_raw(name_w.as_ptr()), &mut handle, None).is_err() {
                return PrinterStatus::Offline;
            }

            let mut needed: u32 = 0;
            let _ = GetPrinterW(handle, 6, None, &mut needed);
            let status = if needed > 0 {
                let mut buf: Vec<u8> = vec![0; needed as usize];
                if GetPrinterW(handle, 6, Some(buf.as_mut_slice()), &mut needed).is_ok() {
                    let info = *(buf.as_ptr() as *const PRINTER_INFO_6);
                    map_status(info.dwStatus)
                } else {
                    PrinterStatus::Unknown
                }
            } else {
                PrinterStatus::Unknown
            };
            let _ = ClosePrinter(handle);
            status
        }
    }

    fn map_status(dw_status: u32) -> PrinterStatus {
        const ERROR_BITS: u32 = PRINTER_STATUS_ERROR
            | PRINTER_STATUS_PAPER_OUT
            | PRINTER_STATUS_PAPER_JAM
            | PRINTER_STATUS_DOOR_OPEN;
        if dw_status == 0 {
            PrinterStatus::Ready
        } else if dw_status & PRINTER_STATUS_OFFLINE != 0 {
            PrinterStatus::Offline
        } else if dw_status & ERROR_BITS != 0 {
            PrinterStatus::Error
        } else {
            PrinterStatus::Unknown
        }
    }
}
