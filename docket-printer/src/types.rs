//! Boundary types shared by discovery, registry, transport and pipeline
//!
//! Everything here derives serde with snake_case wire names so callers can
//! relay descriptors and send results verbatim.

use docket_escpos::CodePage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Default bound on transport connection establishment
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default bound on status probes
pub const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// How a printer is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    /// Windows print spooler queue
    Spooler,
    /// CUPS queue driven through lp/lpstat
    Cups,
    /// Direct TCP socket (JetDirect port 9100 convention)
    RawNetwork,
    /// Local character device node
    RawDevice,
}

impl ConnectionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionKind::Spooler => "spooler",
            ConnectionKind::Cups => "cups",
            ConnectionKind::RawNetwork => "raw_network",
            ConnectionKind::RawDevice => "raw_device",
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Connectivity as reported at discovery time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnlineState {
    Online,
    Offline,
    #[default]
    Unknown,
}

/// Live status as reported by a status probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrinterStatus {
    Ready,
    Offline,
    Error,
    Unknown,
}

/// Everything discovery knows about one printer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterDescriptor {
    pub name: String,
    pub kind: ConnectionKind,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub online: OnlineState,
    /// Channel address for the raw kinds: `host:port` or a device path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Platform key/value detail (ports, device URIs, status text)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub raw_metadata: BTreeMap<String, String>,
}

impl PrinterDescriptor {
    pub fn new(name: impl Into<String>, kind: ConnectionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            is_default: false,
            online: OnlineState::Unknown,
            address: None,
            raw_metadata: BTreeMap::new(),
        }
    }

    /// Descriptor for a direct TCP printer
    pub fn raw_network(host: &str, port: u16) -> Self {
        let address = format!("{host}:{port}");
        let mut descriptor = Self::new(address.clone(), ConnectionKind::RawNetwork);
        descriptor.address = Some(address);
        descriptor
    }

    /// Descriptor for a local device node
    pub fn raw_device(path: impl Into<String>) -> Self {
        let path = path.into();
        let mut descriptor = Self::new(path.clone(), ConnectionKind::RawDevice);
        descriptor.address = Some(path);
        descriptor
    }

    pub fn summary(&self) -> PrinterSummary {
        PrinterSummary {
            name: self.name.clone(),
            kind: self.kind,
            is_default: self.is_default,
            online: self.online,
        }
    }
}

/// The default listing shape: descriptor minus the bulky metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterSummary {
    pub name: String,
    pub kind: ConnectionKind,
    pub is_default: bool,
    pub online: OnlineState,
}

/// In-band outcome of one transport send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendStatus {
    Ok,
    Failed,
}

/// What a transport reports back: success/failure plus byte accounting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportResult {
    pub status: SendStatus,
    pub bytes_sent: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl TransportResult {
    pub fn ok(bytes_sent: usize) -> Self {
        Self {
            status: SendStatus::Ok,
            bytes_sent,
            error_detail: None,
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            status: SendStatus::Failed,
            bytes_sent: 0,
            error_detail: Some(detail.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == SendStatus::Ok
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Paper width in columns
    pub width: usize,
    /// Code page for all text encoding
    pub code_page: CodePage,
    /// Bound on transport connection establishment
    pub connect_timeout: Duration,
    /// Bound on status probes
    pub status_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            width: docket_escpos::DEFAULT_WIDTH,
            code_page: CodePage::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            status_timeout: DEFAULT_STATUS_TIMEOUT,
        }
    }
}
